use std::fs;

use serde::Deserialize;

use crate::catalog::{EmptyCatalog, TitleCatalog};

/// Where the lookup API listens when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const SETTINGS_FILE: &str = "movie_roulette.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the lookup API.
    pub api_url: String,
    /// Optional catalog override; `None` means the built-in title list.
    pub titles: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            titles: None,
        }
    }
}

impl Settings {
    /// The title pool these settings describe.
    pub fn catalog(&self) -> Result<TitleCatalog, EmptyCatalog> {
        match &self.titles {
            Some(titles) => TitleCatalog::new(titles.clone()),
            None => Ok(TitleCatalog::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_url: Option<String>,
    titles: Option<Vec<String>>,
}

/// Layered settings: compiled defaults, then `movie_roulette.toml` from the
/// working directory, then the `MOVIE_API_URL` environment variable. Missing
/// or unreadable layers are skipped.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        match toml::from_str::<SettingsFile>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => {
                tracing::warn!(path = SETTINGS_FILE, error = %err, "ignoring malformed settings file");
            }
        }
    }

    if let Ok(v) = std::env::var("MOVIE_API_URL") {
        if !v.trim().is_empty() {
            settings.api_url = v;
        }
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: SettingsFile) {
    if let Some(api_url) = file_cfg.api_url {
        settings.api_url = api_url;
    }
    if let Some(titles) = file_cfg.titles {
        settings.titles = Some(titles);
    }
}
