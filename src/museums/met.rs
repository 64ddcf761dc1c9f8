//! Metropolitan Museum of Art adapter
//!
//! Two-phase: the search endpoint returns the full list of matching
//! object ids, then one detail call per id. The result count is capped
//! at 100 ids and detail calls run through a bounded pool; the API
//! limits clients to 80 requests per second.

use super::traits::Museum;
use crate::model::Artwork;
use crate::network::HttpClient;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, warn};

const MUSEUM_NAME: &str = "Metropolitan Museum of Art";
const MUSEUM_URL: &str = "https://www.metmuseum.org/";

/// Cap on how many ids from the search phase get a detail call
const MAX_OBJECTS: usize = 100;

/// Simultaneous detail requests
const DETAIL_CONCURRENCY: usize = 8;

/// Metropolitan Museum of Art collection adapter
pub struct MetMuseum {
    base_url: String,
}

impl MetMuseum {
    pub fn new() -> Self {
        Self {
            base_url: "https://collectionapi.metmuseum.org/public/collection/v1".to_string(),
        }
    }

    /// Point the adapter at a different API base (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one object's detail record; any failure skips the record
    async fn fetch_object(&self, client: &HttpClient, id: i64) -> Option<Artwork> {
        let url = format!("{}/objects/{}", self.base_url, id);

        let response = match client.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Met detail call for {} failed: {}", id, e);
                return None;
            }
        };
        if !response.is_success() {
            warn!("Met detail call for {} returned HTTP {}", id, response.status);
            return None;
        }

        let json: serde_json::Value = match response.json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Met detail response for {} is not valid JSON: {}", id, e);
                return None;
            }
        };

        // A detail body without an objectID yields nothing
        let external_id = json.get("objectID").and_then(|v| v.as_i64())?;

        let mut work = Artwork::new(external_id.to_string(), MUSEUM_NAME, MUSEUM_URL);

        if let Some(title) = json.get("title").and_then(|v| v.as_str()) {
            work = work.with_title(title);
        }
        if let Some(artist) = json.get("artistDisplayName").and_then(|v| v.as_str()) {
            work = work.with_artist(artist);
        }
        if let Some(url) = json.get("objectURL").and_then(|v| v.as_str()) {
            work = work.with_url(url);
        }
        if let Some(date) = json.get("objectDate").and_then(|v| v.as_str()) {
            work = work.with_date(date);
        }
        if let Some(medium) = json.get("objectName").and_then(|v| v.as_str()) {
            work = work.with_medium(medium);
        }

        // Images are only published for public-domain works
        let public_domain = json
            .get("isPublicDomain")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if public_domain {
            if let Some(image) = json
                .get("primaryImage")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
            {
                work = work.with_image_url(image);
            }
        }

        Some(work)
    }
}

impl Default for MetMuseum {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Museum for MetMuseum {
    fn name(&self) -> &str {
        MUSEUM_NAME
    }

    fn website(&self) -> &str {
        MUSEUM_URL
    }

    async fn fetch(&self, client: &HttpClient, keyword: &str) -> anyhow::Result<Vec<Artwork>> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), keyword.to_string());

        let url = format!("{}/search", self.base_url);
        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let json: serde_json::Value = response.json()?;

        // Missing or null objectIDs means zero results
        let ids: Vec<i64> = match json.get("objectIDs").and_then(|v| v.as_array()) {
            Some(ids) => ids.iter().filter_map(|v| v.as_i64()).collect(),
            None => return Ok(vec![]),
        };

        // Detail calls for the first min(cap, len) ids, fetched through a
        // bounded pool
        let works: Vec<Artwork> = stream::iter(ids.into_iter().take(MAX_OBJECTS))
            .map(|id| self.fetch_object(client, id))
            .buffer_unordered(DETAIL_CONCURRENCY)
            .filter_map(|work| async move { work })
            .collect()
            .await;

        debug!("Met returned {} records", works.len());
        Ok(works)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_IMAGE_PLACEHOLDER;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn detail(id: i64, public_domain: bool) -> serde_json::Value {
        json!({
            "objectID": id,
            "title": "Terracotta vase",
            "artistDisplayName": "Euphronios",
            "objectURL": format!("https://www.metmuseum.org/art/collection/search/{}", id),
            "objectDate": "ca. 500 B.C.",
            "objectName": "Vase",
            "isPublicDomain": public_domain,
            "primaryImage": format!("https://images.metmuseum.org/{}.jpg", id)
        })
    }

    #[tokio::test]
    async fn test_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"total": 0, "objectIDs": null})),
            )
            .mount(&server)
            .await;

        let museum = MetMuseum::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "nothing").await.unwrap();
        assert!(works.is_empty());
    }

    #[tokio::test]
    async fn test_short_id_list_issues_exactly_that_many_detail_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"objectIDs": [1, 2, 3]})),
            )
            .mount(&server)
            .await;

        // Exactly 3 detail calls, never indices 4..100
        for id in 1..=3 {
            Mock::given(method("GET"))
                .and(path(format!("/objects/{}", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(detail(id, true)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let museum = MetMuseum::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert_eq!(works.len(), 3);
    }

    #[tokio::test]
    async fn test_non_public_domain_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objectIDs": [7, 8]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/objects/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail(7, false)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/objects/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail(8, true)))
            .mount(&server)
            .await;

        let museum = MetMuseum::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let mut works = museum.fetch(&client, "vase").await.unwrap();
        works.sort_by(|a, b| a.external_id.cmp(&b.external_id));

        assert_eq!(works[0].image_url, NO_IMAGE_PLACEHOLDER);
        assert_eq!(works[1].image_url, "https://images.metmuseum.org/8.jpg");
    }

    #[tokio::test]
    async fn test_detail_without_object_id_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objectIDs": [5, 6]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/objects/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Not found"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/objects/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail(6, true)))
            .mount(&server)
            .await;

        let museum = MetMuseum::new().with_base_url(server.uri());
        let client = HttpClient::new().unwrap();
        let works = museum.fetch(&client, "vase").await.unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].external_id, "6");
    }
}
