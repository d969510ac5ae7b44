//! Commands queued from the UI to the lookup worker.

pub enum BackendCommand {
    /// Fetch the record for one drawn title.
    LookupMovie { title: String },
    /// Download and decode a poster image.
    FetchPoster { url: String },
}
