//! Victoria and Albert Museum adapter
//!
//! A single search call returns up to 100 matches in one response body;
//! the API caps page_size at 100.

use super::traits::Museum;
use crate::model::Artwork;
use crate::network::HttpClient;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

const MUSEUM_NAME: &str = "Victoria and Albert Museum";
const MUSEUM_URL: &str = "https://www.vam.ac.uk/";

/// Maximum results the search endpoint returns per call
const PAGE_SIZE: u32 = 100;

/// Victoria and Albert Museum collection adapter
pub struct VictoriaAlbert {
    base_url: String,
    item_base: String,
}

impl VictoriaAlbert {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.vam.ac.uk/v2".to_string(),
            item_base: "https://collections.vam.ac.uk/item".to_string(),
        }
    }

    /// Point the adapter at a different API base (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn parse_record(&self, entry: &serde_json::Value) -> Option<Artwork> {
        // No identifier means no record
        let id = entry.get("systemNumber").and_then(|v| v.as_str())?;

        let mut work = Artwork::new(id, MUSEUM_NAME, MUSEUM_URL)
            .with_url(format!("{}/{}", self.item_base, id));

        if let Some(title) = entry.get("_primaryTitle").and_then(|v| v.as_str()) {
            work = work.with_title(title);
        }

        // Maker object may exist without a name field
        if let Some(artist) = entry
            .get("_primaryMaker")
            .and_then(|m| m.get("name"))
            .and_then(|v| v.as_str())
        {
            work = work.with_artist(artist);
        }

        if let Some(medium) = entry.get("objectType").and_then(|v| v.as_str()) {
            work = work.with_medium(medium);
        }

        if let Some(date) = entry.get("_primaryDate").and_then(|v| v.as_str()) {
            work = work.with_date(date);
        }

        // Thumbnail only counts when a primary image id is actually set
        let has_image = entry
            .get("_primaryImageId")
            .map(|v| !v.is_null())
            .unwrap_or(false);
        if has_image {
            if let Some(thumbnail) = entry
                .get("_images")
                .and_then(|i| i.get("_primary_thumbnail"))
                .and_then(|v| v.as_str())
            {
                work = work.with_image_url(thumbnail);
            }
        }

        Some(work)
    }
}

impl Default for VictoriaAlbert {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Museum for VictoriaAlbert {
    fn name(&self) -> &str {
        MUSEUM_NAME
    }

    fn website(&self) -> &str {
        MUSEUM_URL
    }

    async fn fetch(&self, client: &HttpClient, keyword: &str) -> anyhow::Result<Vec<Artwork>> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), keyword.to_string());
        params.insert("page_size".to_string(), PAGE_SIZE.to_string());

        let url = format!("{}/objects/search", self.base_url);
        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let json: serde_json::Value = response.json()?;

        // No top-level records key means zero results, not a failure
        let records = match json.get("records").and_then(|r| r.as_array()) {
            Some(records) => records,
            None => return Ok(vec![]),
        };

        let works: Vec<Artwork> = records
            .iter()
            .filter_map(|entry| self.parse_record(entry))
            .collect();

        debug!("V&A returned {} records", works.len());
        Ok(works)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_IMAGE_PLACEHOLDER;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn entry(id: &str, image_id: serde_json::Value) -> serde_json::Value {
        json!({
            "systemNumber": id,
            "_primaryTitle": "Blue vase",
            "_primaryMaker": {"name": "Delftware maker"},
            "objectType": "Vase",
            "_primaryDate": "early 1900s",
            "_primaryImageId": image_id,
            "_images": {"_primary_thumbnail": "https://framemark.vam.ac.uk/collections/t.jpg"}
        })
    }

    #[tokio::test]
    async fn test_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .mount(&server)
            .await;

        let museum = VictoriaAlbert::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert!(works.is_empty());
    }

    #[tokio::test]
    async fn test_missing_records_key_is_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"info": {}})))
            .mount(&server)
            .await;

        let museum = VictoriaAlbert::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert!(works.is_empty());
    }

    #[tokio::test]
    async fn test_image_from_primary_thumbnail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/search"))
            .and(query_param("q", "vase"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [entry("O1", json!("2006AE1")), entry("O2", json!(null))]
            })))
            .mount(&server)
            .await;

        let museum = VictoriaAlbert::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert_eq!(works.len(), 2);

        // Non-null primary image id maps to the nested thumbnail URL
        assert_eq!(
            works[0].image_url,
            "https://framemark.vam.ac.uk/collections/t.jpg"
        );
        // Null primary image id falls back to the placeholder
        assert_eq!(works[1].image_url, NO_IMAGE_PLACEHOLDER);
        assert_eq!(works[0].url, "https://collections.vam.ac.uk/item/O1");
        assert_eq!(works[0].medium, "Vase");
        assert_eq!(works[0].artist.as_deref(), Some("Delftware maker"));
    }

    #[tokio::test]
    async fn test_entry_without_identifier_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {"_primaryTitle": "No id here"},
                    entry("O3", json!(null))
                ]
            })))
            .mount(&server)
            .await;

        let museum = VictoriaAlbert::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].external_id, "O3");
    }

    #[tokio::test]
    async fn test_http_error_fails_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let museum = VictoriaAlbert::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        assert!(museum.fetch(&client, "vase").await.is_err());
    }
}
