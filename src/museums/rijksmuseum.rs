//! Rijksmuseum adapter
//!
//! Two-phase: the collection endpoint returns summary objects, then one
//! detail call per item for the medium and presenting date. Detail calls
//! run through a bounded pool; the API documents a strict
//! requests-per-second ceiling.

use super::traits::Museum;
use crate::model::Artwork;
use crate::network::HttpClient;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, warn};

const MUSEUM_NAME: &str = "Rijksmuseum";
const MUSEUM_URL: &str = "https://www.rijksmuseum.nl/en";

/// Simultaneous detail requests
const DETAIL_CONCURRENCY: usize = 4;

/// Rijksmuseum collection adapter
pub struct Rijksmuseum {
    base_url: String,
    api_key: String,
}

impl Rijksmuseum {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://www.rijksmuseum.nl/api/en".to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the adapter at a different API base (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map one summary object into a record without medium and date
    fn parse_summary(&self, item: &serde_json::Value) -> Option<Artwork> {
        let id = item.get("objectNumber").and_then(|v| v.as_str())?;

        let mut work = Artwork::new(id, MUSEUM_NAME, MUSEUM_URL);

        if let Some(title) = item.get("title").and_then(|v| v.as_str()) {
            work = work.with_title(title);
        }
        if let Some(artist) = item.get("principalOrFirstMaker").and_then(|v| v.as_str()) {
            work = work.with_artist(artist);
        }
        if let Some(url) = item
            .get("links")
            .and_then(|l| l.get("web"))
            .and_then(|v| v.as_str())
        {
            work = work.with_url(url);
        }

        // webImage is an explicit null for works without one
        if let Some(image) = item
            .get("webImage")
            .filter(|v| !v.is_null())
            .and_then(|i| i.get("url"))
            .and_then(|v| v.as_str())
        {
            work = work.with_image_url(image);
        }

        Some(work)
    }

    /// Fill in medium and presenting date from the detail endpoint.
    ///
    /// Both stay empty when the detail call fails or the response lacks
    /// the artObject key.
    async fn fetch_detail(&self, client: &HttpClient, mut work: Artwork) -> Artwork {
        let url = format!("{}/collection/{}", self.base_url, work.external_id);
        let mut params = HashMap::new();
        params.insert("key".to_string(), self.api_key.clone());

        let response = match client.get_with_params(&url, params).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!(
                    "Rijksmuseum detail call for {} returned HTTP {}",
                    work.external_id, response.status
                );
                return work;
            }
            Err(e) => {
                warn!("Rijksmuseum detail call for {} failed: {}", work.external_id, e);
                return work;
            }
        };

        let json: serde_json::Value = match response.json() {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    "Rijksmuseum detail response for {} is not valid JSON: {}",
                    work.external_id, e
                );
                return work;
            }
        };

        if let Some(object) = json.get("artObject") {
            if let Some(medium) = object
                .get("objectTypes")
                .and_then(|t| t.as_array())
                .and_then(|t| t.first())
                .and_then(|v| v.as_str())
            {
                work = work.with_medium(medium);
            }
            if let Some(date) = object
                .get("dating")
                .and_then(|d| d.get("presentingDate"))
                .and_then(|v| v.as_str())
            {
                work = work.with_date(date);
            }
        }

        work
    }
}

#[async_trait]
impl Museum for Rijksmuseum {
    fn name(&self) -> &str {
        MUSEUM_NAME
    }

    fn website(&self) -> &str {
        MUSEUM_URL
    }

    async fn fetch(&self, client: &HttpClient, keyword: &str) -> anyhow::Result<Vec<Artwork>> {
        let mut params = HashMap::new();
        params.insert("key".to_string(), self.api_key.clone());
        params.insert("q".to_string(), keyword.to_string());

        let url = format!("{}/collection", self.base_url);
        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let json: serde_json::Value = response.json()?;

        // No top-level artObjects key means zero results
        let items = match json.get("artObjects").and_then(|a| a.as_array()) {
            Some(items) => items,
            None => return Ok(vec![]),
        };

        let summaries: Vec<Artwork> = items
            .iter()
            .filter_map(|item| self.parse_summary(item))
            .collect();

        // One detail call per summary item, through a bounded pool
        let works: Vec<Artwork> = stream::iter(summaries)
            .map(|work| self.fetch_detail(client, work))
            .buffer_unordered(DETAIL_CONCURRENCY)
            .collect()
            .await;

        debug!("Rijksmuseum returned {} records", works.len());
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

    fn summary(id: &str, web_image: serde_json::Value) -> serde_json::Value {
        json!({
            "objectNumber": id,
            "title": "The Night Watch",
            "principalOrFirstMaker": "Rembrandt van Rijn",
            "links": {"web": format!("https://www.rijksmuseum.nl/en/collection/{}", id)},
            "webImage": web_image
        })
    }

    fn detail() -> serde_json::Value {
        json!({
            "artObject": {
                "objectTypes": ["painting", "canvas"],
                "dating": {"presentingDate": "1642"}
            }
        })
    }

    #[tokio::test]
    async fn test_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        let museum = Rijksmuseum::new("test-key").with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "nothing").await.unwrap();
        assert!(works.is_empty());
    }

    #[tokio::test]
    async fn test_summary_and_detail_merge() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "artObjects": [summary("SK-C-5", json!({"url": "https://img.rijks.nl/sk-c-5.jpg"}))]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection/SK-C-5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail()))
            .expect(1)
            .mount(&server)
            .await;

        let museum = Rijksmuseum::new("test-key").with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "night watch").await.unwrap();

        assert_eq!(works.len(), 1);
        let work = &works[0];
        assert_eq!(work.external_id, "SK-C-5");
        assert_eq!(work.artist.as_deref(), Some("Rembrandt van Rijn"));
        // First entry of the object-types list becomes the medium
        assert_eq!(work.medium, "painting");
        assert_eq!(work.date, "1642");
        assert_eq!(work.image_url, "https://img.rijks.nl/sk-c-5.jpg");
    }

    #[tokio::test]
    async fn test_null_web_image_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "artObjects": [summary("SK-A-1", json!(null))]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection/SK-A-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail()))
            .mount(&server)
            .await;

        let museum = Rijksmuseum::new("test-key").with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "watch").await.unwrap();
        assert_eq!(works[0].image_url, NO_IMAGE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_detail_without_art_object_defaults_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "artObjects": [summary("SK-A-2", json!(null))]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection/SK-A-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "gone"})))
            .mount(&server)
            .await;

        let museum = Rijksmuseum::new("test-key").with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "watch").await.unwrap();

        // The record survives with empty medium and date
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].medium, "");
        assert_eq!(works[0].date, "");
    }
}
