use reqwest::{Client, StatusCode};
use thiserror::Error;

pub mod card;
pub mod catalog;
pub mod record;
pub mod settings;

pub use card::{MovieCard, PosterSource, ProviderDisplay};
pub use catalog::{EmptyCatalog, TitleCatalog};
pub use record::{MovieRecord, ProviderEntry, WatchProviders};
pub use settings::{load_settings, Settings, DEFAULT_API_URL};

/// Why a lookup failed. Front ends surface one uniform failure to the user;
/// the variants exist so logs can tell an unreachable API from a bad record.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to the movie API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("movie API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("movie API returned an undecodable record: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin client for the local movie lookup API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MovieApi {
    http: Client,
    base_url: String,
}

impl MovieApi {
    /// `base_url` is the API origin, e.g. `http://localhost:3000`. Trailing
    /// slashes are dropped so path joins stay predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        MovieApi {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the record for one title via `GET /filme/{title}`. The title
    /// is percent-encoded into the path, so accents and spaces are fine.
    pub async fn lookup(&self, title: &str) -> Result<MovieRecord, LookupError> {
        let url = format!("{}/filme/{}", self.base_url, urlencoding::encode(title));
        tracing::debug!(%url, "fetching movie record");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        response
            .json::<MovieRecord>()
            .await
            .map_err(LookupError::Decode)
    }

    /// Downloads raw bytes, used for poster images. Relative URLs resolve
    /// against the API origin.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        let url = self.resolve_url(url);
        tracing::debug!(%url, "fetching image");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Poster URLs arrive either absolute or as API-relative paths.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
