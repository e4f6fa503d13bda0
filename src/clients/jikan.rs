use crate::clients::{CatalogClient, CatalogError};
use crate::config::CatalogConfig;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Deserialize)]
struct JikanResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// One `/anime` entry as the catalog sends it.
///
/// The client hands entries over as untyped JSON; they are decoded into this
/// shape one at a time, so a malformed entry only costs itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub mal_id: Option<i64>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub images: Option<Images>,
    pub status: Option<String>,
    pub aired: Option<Aired>,
    pub genres: Option<Vec<Genre>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    pub jpg: Option<ImageVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVariant {
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aired {
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    pub name: Option<String>,
}

impl RawRecord {
    /// Decodes one catalog entry.
    ///
    /// # Errors
    ///
    /// Fails when a known field has an unexpected type.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// `mal_id` of an entry, read without decoding the rest of it.
    #[must_use]
    pub fn peek_mal_id(value: &Value) -> Option<i64> {
        value.get("mal_id").and_then(Value::as_i64)
    }

    /// `title` of an entry, read without decoding the rest of it.
    #[must_use]
    pub fn peek_title(value: &Value) -> Option<&str> {
        value.get("title").and_then(Value::as_str)
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.jpg.as_ref())
            .and_then(|j| j.image_url.as_deref())
    }

    #[must_use]
    pub fn aired_from(&self) -> Option<&str> {
        self.aired.as_ref().and_then(|a| a.from.as_deref())
    }

    /// Genre names in upstream order, including blank ones.
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .flatten()
            .filter_map(|g| g.name.as_deref())
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JikanClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: JIKAN_API.to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("animeshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_records(&self, url: &str) -> Result<Vec<Value>, CatalogError> {
        debug!(url = %url, "Querying catalog");
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let response: JikanResponse<Value> = serde_json::from_str(&body)?;

        Ok(response.data)
    }
}

#[async_trait::async_trait]
impl CatalogClient for JikanClient {
    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Value>, CatalogError> {
        let url = format!(
            "{}/anime?q={}&sfw",
            self.base_url,
            urlencoding::encode(title)
        );
        self.get_records(&url).await
    }

    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, CatalogError> {
        let url = format!(
            "{}/anime?start_date={}&end_date={}&sfw",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        self.get_records(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_data_is_empty() {
        let parsed: JikanResponse<Value> =
            serde_json::from_str(r#"{"pagination": {"has_next_page": false}}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn one_malformed_entry_leaves_the_others_decodable() {
        let body = r#"{"data": [
            {"mal_id": 1, "title": "Good One", "episodes": 12},
            {"mal_id": 2, "title": "Bad One", "episodes": "unknown"},
            {"mal_id": 3, "title": "Good Two", "episodes": 24}
        ]}"#;

        let parsed: JikanResponse<Value> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 3);

        let decoded: Vec<_> = parsed.data.iter().map(RawRecord::from_value).collect();
        assert_eq!(decoded[0].as_ref().unwrap().episodes, Some(12));
        assert!(decoded[1].is_err());
        assert_eq!(decoded[2].as_ref().unwrap().episodes, Some(24));

        assert_eq!(RawRecord::peek_mal_id(&parsed.data[1]), Some(2));
        assert_eq!(RawRecord::peek_title(&parsed.data[1]), Some("Bad One"));
    }

    #[test]
    fn raw_record_reads_nested_fields() {
        let json = r#"{
            "mal_id": 9253,
            "title": "Steins;Gate",
            "synopsis": "A self-proclaimed mad scientist...",
            "episodes": 24,
            "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/5/73199.jpg"}},
            "status": "Finished Airing",
            "aired": {"from": "2011-04-06T00:00:00+00:00", "to": "2011-09-14T00:00:00+00:00"},
            "genres": [{"mal_id": 8, "name": "Drama"}, {"mal_id": 24, "name": "Sci-Fi"}]
        }"#;

        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.mal_id, Some(9253));
        assert_eq!(
            record.image_url(),
            Some("https://cdn.myanimelist.net/images/anime/5/73199.jpg")
        );
        assert_eq!(record.aired_from(), Some("2011-04-06T00:00:00+00:00"));
        assert_eq!(record.genre_names().collect::<Vec<_>>(), vec!["Drama", "Sci-Fi"]);
    }

    #[test]
    fn raw_record_tolerates_missing_and_null_fields() {
        let record: RawRecord =
            serde_json::from_str(r#"{"title": "Untitled", "episodes": null, "images": {}}"#)
                .unwrap();
        assert_eq!(record.episodes, None);
        assert_eq!(record.image_url(), None);
        assert_eq!(record.aired_from(), None);
        assert_eq!(record.genre_names().count(), 0);
    }

    #[test]
    fn from_config_strips_trailing_slash() {
        let config = CatalogConfig {
            base_url: "http://localhost:8080/v4/".to_string(),
            ..CatalogConfig::default()
        };
        let client = JikanClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v4");
    }
}
