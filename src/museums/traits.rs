//! Museum adapter trait

use crate::model::Artwork;
use crate::network::HttpClient;
use async_trait::async_trait;

/// Main trait that every museum adapter must implement.
///
/// An adapter knows how to query one museum's API for a keyword and map
/// the museum's response shape into normalized [`Artwork`] records. It
/// performs outbound HTTP only and mutates no shared state; persistence
/// is the coordinator's job.
#[async_trait]
pub trait Museum: Send + Sync {
    /// Museum display name, constant per adapter
    fn name(&self) -> &str;

    /// Museum homepage URL, constant per adapter
    fn website(&self) -> &str;

    /// Default timeout for a whole fetch in seconds
    fn timeout(&self) -> f64 {
        crate::DEFAULT_TIMEOUT as f64
    }

    /// Fetch every matching artwork for the keyword.
    ///
    /// Zero upstream matches yield `Ok(vec![])`. A record missing an
    /// expected field is skipped, not fatal; a failed top-level call or
    /// malformed top-level body fails the whole fetch, which the
    /// coordinator isolates to this adapter.
    async fn fetch(&self, client: &HttpClient, keyword: &str) -> anyhow::Result<Vec<Artwork>>;
}
