//! Lookup worker: owns the async runtime and serves the UI command queue.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use movie_client::{MovieApi, MovieCard};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PosterImage, UiEvent};

/// Longest edge of a decoded poster; anything larger is downsized on the
/// worker before the RGBA buffer crosses to the UI thread.
const POSTER_DECODE_MAX: u32 = 512;

/// Spawns the worker thread that owns the tokio runtime and the API client.
/// Each command is served on its own task, so a slow lookup never delays a
/// poster fetch. The thread exits when the UI drops its command sender.
pub fn launch(api: MovieApi, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::WorkerStatus("Lookup worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build lookup worker runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerStatus(format!(
                    "Lookup worker failed to start: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::WorkerStatus("Lookup worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LookupMovie { title } => {
                        let api = api.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match api.lookup(&title).await {
                                Ok(record) => {
                                    let _ = ui_tx.try_send(UiEvent::MovieLoaded(
                                        MovieCard::from_record(record),
                                    ));
                                }
                                Err(err) => {
                                    tracing::error!(%title, error = %err, "movie lookup failed");
                                    let _ = ui_tx.try_send(UiEvent::LookupFailed);
                                }
                            }
                        });
                    }
                    BackendCommand::FetchPoster { url } => {
                        let api = api.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match fetch_poster(&api, &url).await {
                                Ok(image) => {
                                    let _ = ui_tx.try_send(UiEvent::PosterLoaded { url, image });
                                }
                                Err(reason) => {
                                    tracing::warn!(%url, %reason, "poster fetch failed");
                                    let _ = ui_tx.try_send(UiEvent::PosterFailed { url });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}

async fn fetch_poster(api: &MovieApi, url: &str) -> Result<PosterImage, String> {
    let bytes = api.fetch_bytes(url).await.map_err(|err| err.to_string())?;
    decode_poster_image(&bytes)
}

/// Decodes and downsizes poster bytes so the UI thread only ever uploads
/// ready RGBA buffers.
fn decode_poster_image(bytes: &[u8]) -> Result<PosterImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(POSTER_DECODE_MAX, POSTER_DECODE_MAX)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PosterImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}
