use chrono::Datelike;

use crate::record::MovieRecord;

/// Shown in place of a missing synopsis.
pub const SYNOPSIS_FALLBACK: &str = "Synopsis not available.";
/// Heading above the provider list.
pub const PROVIDERS_HEADING: &str = "Where to watch:";
/// Shown when the API has provider data but no service carries the title
/// in the region.
pub const PROVIDERS_NONE_IN_REGION: &str = "Not available in Brazil.";
/// Shown when the API has no provider data for the title at all.
pub const PROVIDERS_UNAVAILABLE: &str = "Streaming information not available";
/// Label for the poster placeholder.
pub const POSTER_FALLBACK_LABEL: &str = "Poster not available";

/// Everything a front end needs to draw one movie. Derived from a
/// [`MovieRecord`] up front so rendering is a pure function of this value:
/// fallbacks, the rating format and provider classification are decided
/// here, once, for both the GUI and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub title: String,
    /// Rating preformatted to one decimal, star first: `⭐ 8.7`.
    pub rating_label: String,
    /// Release year taken from the record's release date.
    pub year: i32,
    /// Synopsis text, already substituted with [`SYNOPSIS_FALLBACK`] when
    /// the record had none.
    pub synopsis: String,
    pub poster: PosterSource,
    pub providers: ProviderDisplay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PosterSource {
    /// Poster image URL, absolute or API-relative.
    Remote(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderDisplay {
    /// No provider object on the record (absent or `{}`).
    Unavailable,
    /// Provider object present, but every mode list was empty.
    NoneInRegion,
    /// Distinct provider names, first encounter order, subscription first.
    Names(Vec<String>),
}

impl MovieCard {
    pub fn from_record(record: MovieRecord) -> Self {
        let synopsis = record
            .synopsis
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| SYNOPSIS_FALLBACK.to_owned());

        let poster = match record.poster_url {
            Some(url) if !url.trim().is_empty() => PosterSource::Remote(url),
            _ => PosterSource::Placeholder,
        };

        let providers = match record.watch_providers {
            None => ProviderDisplay::Unavailable,
            Some(found) if found.is_empty() => ProviderDisplay::Unavailable,
            Some(found) => {
                let names = found.provider_names();
                if names.is_empty() {
                    ProviderDisplay::NoneInRegion
                } else {
                    ProviderDisplay::Names(names)
                }
            }
        };

        MovieCard {
            rating_label: format!("⭐ {:.1}", record.rating),
            year: record.release_date.year(),
            title: record.title,
            synopsis,
            poster,
            providers,
        }
    }

    /// Hover/accessibility label for the poster area.
    pub fn poster_label(&self) -> String {
        match &self.poster {
            PosterSource::Remote(_) => format!("Poster of {}", self.title),
            PosterSource::Placeholder => POSTER_FALLBACK_LABEL.to_owned(),
        }
    }
}
