mod backend_bridge;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use movie_client::{load_settings, MovieApi};

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::MovieRouletteApp;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the movie lookup API; overrides file and env settings.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let catalog = settings.catalog()?;
    tracing::info!(api_url = %settings.api_url, titles = catalog.len(), "starting movie roulette");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(MovieApi::new(settings.api_url), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Movie Roulette")
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Movie Roulette",
        options,
        Box::new(move |_cc| Ok(Box::new(MovieRouletteApp::new(catalog, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("gui event loop failed: {err}"))
}
