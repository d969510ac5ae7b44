//! Events flowing from the lookup worker back to the UI.

use movie_client::MovieCard;

/// Decoded RGBA poster, ready for texture upload on the UI thread.
#[derive(Clone)]
pub struct PosterImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub enum UiEvent {
    /// Lookup finished with a renderable card.
    MovieLoaded(MovieCard),
    /// Lookup failed. The cause is logged worker-side; the UI shows one
    /// uniform error regardless of what went wrong.
    LookupFailed,
    /// Poster bytes for `url` arrived and decoded cleanly.
    PosterLoaded { url: String, image: PosterImage },
    /// Poster download or decode failed; the card keeps its placeholder.
    PosterFailed { url: String },
    /// Worker lifecycle notices for the status line.
    WorkerStatus(String),
}
