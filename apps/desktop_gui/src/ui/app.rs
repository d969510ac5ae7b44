use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use movie_client::card::{
    PROVIDERS_HEADING, PROVIDERS_NONE_IN_REGION, PROVIDERS_UNAVAILABLE, SYNOPSIS_FALLBACK,
};
use movie_client::{MovieCard, PosterSource, ProviderDisplay, TitleCatalog};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PosterImage, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const DRAW_BUTTON_LABEL: &str = "🎲 Draw a movie";
const DRAW_BUTTON_BUSY_LABEL: &str = "Drawing...";
const IDLE_HINT: &str = "Click the button and get a movie to watch tonight.";
const LOADING_LABEL: &str = "Finding your movie...";
/// One uniform failure banner; every lookup failure renders exactly this.
const LOOKUP_FAILED_BANNER: &str =
    "Could not fetch a movie. Check that the local movie API is running and try again.";

/// Largest on-screen poster size; decoded images are scaled down into this
/// box with their aspect ratio preserved.
const POSTER_MAX_SIZE: egui::Vec2 = egui::vec2(240.0, 360.0);

/// Poster loading progress for the card currently on screen.
pub(crate) enum PosterState {
    Loading,
    Ready {
        image: PosterImage,
        /// Uploaded lazily on first paint; worker threads cannot touch the
        /// GPU.
        texture: Option<TextureHandle>,
    },
    Placeholder,
}

/// One looked-up movie plus its poster's progress.
pub(crate) struct CardView {
    pub(crate) card: MovieCard,
    pub(crate) poster: PosterState,
}

/// What the main panel shows. The card and the error banner are separate
/// variants, so they can never be visible at the same time.
pub(crate) enum LookupState {
    /// Nothing drawn yet.
    Idle,
    /// A lookup is in flight; the trigger stays disabled.
    Loading,
    /// Last lookup succeeded.
    Ready(CardView),
    /// Last lookup failed; one uniform banner, no partial card.
    Failed,
}

pub struct MovieRouletteApp {
    catalog: TitleCatalog,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: LookupState,
    status: String,
}

impl MovieRouletteApp {
    pub fn new(
        catalog: TitleCatalog,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            catalog,
            cmd_tx,
            ui_rx,
            state: LookupState::Idle,
            status: String::new(),
        }
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, LookupState::Loading)
    }

    /// Draws a random title and queues its lookup. Replaces whatever the
    /// panel currently shows with the loading view. If the command cannot be
    /// queued the trigger stays enabled, since no event will arrive.
    fn draw_movie(&mut self) {
        let title = self.catalog.random_title().to_owned();
        tracing::info!(%title, "drew a title from the catalog");
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LookupMovie { title },
            &mut self.status,
        );
        if queued {
            self.state = LookupState::Loading;
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_ui_event(event);
        }
    }

    /// Applies one worker event. Pure state transition; rendering reads the
    /// result on the next paint.
    fn apply_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::MovieLoaded(card) => {
                let poster = match &card.poster {
                    PosterSource::Remote(url) => {
                        let queued = dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::FetchPoster { url: url.clone() },
                            &mut self.status,
                        );
                        if queued {
                            PosterState::Loading
                        } else {
                            PosterState::Placeholder
                        }
                    }
                    PosterSource::Placeholder => PosterState::Placeholder,
                };
                self.state = LookupState::Ready(CardView { card, poster });
            }
            UiEvent::LookupFailed => {
                self.state = LookupState::Failed;
            }
            UiEvent::PosterLoaded { url, image } => {
                if let LookupState::Ready(view) = &mut self.state {
                    // Stale poster events (from an older card) are dropped.
                    if view.card.poster == PosterSource::Remote(url) {
                        view.poster = PosterState::Ready {
                            image,
                            texture: None,
                        };
                    }
                }
            }
            UiEvent::PosterFailed { url } => {
                if let LookupState::Ready(view) = &mut self.state {
                    if view.card.poster == PosterSource::Remote(url) {
                        view.poster = PosterState::Placeholder;
                    }
                }
            }
            UiEvent::WorkerStatus(message) => {
                self.status = message;
            }
        }
    }

    fn show_draw_button(&mut self, ui: &mut egui::Ui) {
        let is_busy = self.is_busy();
        let label = if is_busy {
            DRAW_BUTTON_BUSY_LABEL
        } else {
            DRAW_BUTTON_LABEL
        };
        let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
            .min_size(egui::vec2(220.0, 40.0));
        if ui.add_enabled(!is_busy, button).clicked() {
            self.draw_movie();
        }
    }

    fn show_status_line(&self, ui: &mut egui::Ui) {
        if self.status.is_empty() {
            return;
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }
}

impl eframe::App for MovieRouletteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.heading("🎬 Movie Roulette");
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Can't decide what to watch? Leave it to chance.").weak(),
                );
                ui.add_space(12.0);
                self.show_draw_button(ui);
            });
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(12.0);

            match &mut self.state {
                LookupState::Idle => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label(egui::RichText::new(IDLE_HINT).weak());
                    });
                }
                LookupState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new(LOADING_LABEL).weak());
                    });
                }
                LookupState::Ready(view) => show_movie_card(ui, view),
                LookupState::Failed => show_error_banner(ui),
            }

            self.show_status_line(ui);
        });

        // Worker events arrive between frames; keep polling at a low rate.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn show_movie_card(ui: &mut egui::Ui, view: &mut CardView) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                show_poster(ui, view);
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    let card = &view.card;
                    ui.heading(
                        egui::RichText::new(format!("{} ({})", card.title, card.year)).strong(),
                    );
                    ui.add_space(2.0);
                    ui.label(egui::RichText::new(&card.rating_label).size(18.0));
                    ui.add_space(10.0);
                    if card.synopsis == SYNOPSIS_FALLBACK {
                        ui.label(egui::RichText::new(&card.synopsis).weak().italics());
                    } else {
                        ui.label(&card.synopsis);
                    }
                    ui.add_space(12.0);
                    show_providers(ui, &card.providers);
                });
            });
        });
}

fn show_poster(ui: &mut egui::Ui, view: &mut CardView) {
    match &mut view.poster {
        PosterState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading poster...").weak());
            });
        }
        PosterState::Ready { image, texture } => {
            if texture.is_none() {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width, image.height],
                    &image.rgba,
                );
                *texture = Some(ui.ctx().load_texture(
                    "movie-poster",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
            if let Some(texture) = texture {
                let size = poster_display_size(image.width, image.height);
                ui.add(egui::Image::new(&*texture).fit_to_exact_size(size))
                    .on_hover_text(view.card.poster_label());
            }
        }
        PosterState::Placeholder => show_poster_placeholder(ui),
    }
}

fn show_poster_placeholder(ui: &mut egui::Ui) {
    let response = ui.allocate_response(POSTER_MAX_SIZE, egui::Sense::hover());
    let rect = response.rect;
    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, egui::Color32::from_gray(32));
    painter.text(
        rect.center() - egui::vec2(0.0, 16.0),
        egui::Align2::CENTER_CENTER,
        "🎬",
        egui::FontId::proportional(48.0),
        egui::Color32::from_gray(100),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 28.0),
        egui::Align2::CENTER_CENTER,
        movie_client::card::POSTER_FALLBACK_LABEL,
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(140),
    );
    response.on_hover_text(movie_client::card::POSTER_FALLBACK_LABEL);
}

fn show_providers(ui: &mut egui::Ui, providers: &ProviderDisplay) {
    match providers {
        ProviderDisplay::Unavailable => {
            ui.label(egui::RichText::new(PROVIDERS_UNAVAILABLE).weak().italics());
        }
        ProviderDisplay::NoneInRegion => {
            ui.label(egui::RichText::new(PROVIDERS_HEADING).strong());
            ui.add_space(4.0);
            ui.label(egui::RichText::new(PROVIDERS_NONE_IN_REGION).weak());
        }
        ProviderDisplay::Names(names) => {
            ui.label(egui::RichText::new(PROVIDERS_HEADING).strong());
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for name in names {
                    show_provider_chip(ui, name);
                }
            });
        }
    }
}

fn show_provider_chip(ui: &mut egui::Ui, name: &str) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(44, 62, 92))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(name)
                    .small()
                    .color(egui::Color32::from_rgb(214, 226, 245)),
            );
        });
}

fn show_error_banner(ui: &mut egui::Ui) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(LOOKUP_FAILED_BANNER).color(egui::Color32::WHITE));
            });
        });
}

fn poster_display_size(width: usize, height: usize) -> egui::Vec2 {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let scale = (POSTER_MAX_SIZE.x / w)
        .min(POSTER_MAX_SIZE.y / h)
        .min(1.0);
    egui::vec2(w * scale, h * scale)
}
