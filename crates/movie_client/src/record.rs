use chrono::NaiveDate;
use serde::Deserialize;

/// One movie as returned by `GET /filme/{title}`.
///
/// The API speaks Portuguese on the wire (it proxies a pt-BR catalog); the
/// fields are renamed so the rest of the codebase stays in English. A record
/// that is missing `titulo`, `nota` or `lancamento`, or whose release date is
/// not an ISO `YYYY-MM-DD` string, fails deserialization and the whole lookup
/// is treated as failed.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "nota")]
    pub rating: f64,
    #[serde(rename = "lancamento")]
    pub release_date: NaiveDate,
    #[serde(rename = "sinopse")]
    pub synopsis: Option<String>,
    #[serde(rename = "poster")]
    pub poster_url: Option<String>,
    #[serde(rename = "onde_assistir")]
    pub watch_providers: Option<WatchProviders>,
}

/// Streaming availability grouped by acquisition mode, TMDB style. Each mode
/// is optional and keeps the API's own ordering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProviders {
    pub flatrate: Option<Vec<ProviderEntry>>,
    pub rent: Option<Vec<ProviderEntry>>,
    pub buy: Option<Vec<ProviderEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub provider_name: String,
}

impl WatchProviders {
    /// True when the payload has no acquisition mode at all (`{}` on the
    /// wire). The front ends render that as "information not available",
    /// not as "not available in this region".
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_none() && self.rent.is_none() && self.buy.is_none()
    }

    /// Distinct provider names across subscription, rent and buy, in first
    /// encounter order with subscription listed first.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for mode in [&self.flatrate, &self.rent, &self.buy] {
            if let Some(entries) = mode {
                for entry in entries {
                    if !names.contains(&entry.provider_name) {
                        names.push(entry.provider_name.clone());
                    }
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from(json: &str) -> MovieRecord {
        serde_json::from_str(json).expect("record should deserialize")
    }

    #[test]
    fn deserializes_full_record_from_portuguese_fields() {
        let record = record_from(
            r#"{
                "titulo": "Cidade de Deus",
                "nota": 8.7,
                "lancamento": "2002-08-30",
                "sinopse": "Buscapé cresce numa favela carioca.",
                "poster": "https://image.tmdb.org/t/p/w500/abc.jpg",
                "onde_assistir": {
                    "flatrate": [{ "provider_name": "Netflix" }],
                    "rent": [{ "provider_name": "Apple TV" }]
                }
            }"#,
        );

        assert_eq!(record.title, "Cidade de Deus");
        assert_eq!(record.rating, 8.7);
        assert_eq!(record.release_date.to_string(), "2002-08-30");
        assert_eq!(
            record.synopsis.as_deref(),
            Some("Buscapé cresce numa favela carioca.")
        );
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        let providers = record.watch_providers.expect("providers present");
        assert_eq!(providers.provider_names(), vec!["Netflix", "Apple TV"]);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let record = record_from(
            r#"{ "titulo": "Psicose", "nota": 8.5, "lancamento": "1960-06-16" }"#,
        );

        assert!(record.synopsis.is_none());
        assert!(record.poster_url.is_none());
        assert!(record.watch_providers.is_none());
    }

    #[test]
    fn rejects_malformed_release_date() {
        let result = serde_json::from_str::<MovieRecord>(
            r#"{ "titulo": "Vertigo", "nota": 8.3, "lancamento": "em breve" }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn empty_provider_object_reports_empty() {
        let record = record_from(
            r#"{
                "titulo": "Rocky",
                "nota": 8.1,
                "lancamento": "1976-11-21",
                "onde_assistir": {}
            }"#,
        );

        let providers = record.watch_providers.expect("providers present");
        assert!(providers.is_empty());
        assert!(providers.provider_names().is_empty());
    }

    #[test]
    fn provider_names_deduplicate_in_first_encounter_order() {
        let providers = WatchProviders {
            flatrate: Some(vec![
                ProviderEntry { provider_name: "Netflix".into() },
                ProviderEntry { provider_name: "HBO Max".into() },
            ]),
            rent: Some(vec![
                ProviderEntry { provider_name: "Apple TV".into() },
                ProviderEntry { provider_name: "Netflix".into() },
            ]),
            buy: Some(vec![
                ProviderEntry { provider_name: "Apple TV".into() },
                ProviderEntry { provider_name: "Google Play".into() },
            ]),
        };

        assert_eq!(
            providers.provider_names(),
            vec!["Netflix", "HBO Max", "Apple TV", "Google Play"]
        );
    }

    #[test]
    fn modes_present_but_empty_count_as_nothing_to_list() {
        let providers = WatchProviders {
            flatrate: Some(Vec::new()),
            rent: None,
            buy: Some(Vec::new()),
        };

        assert!(!providers.is_empty());
        assert!(providers.provider_names().is_empty());
    }
}
