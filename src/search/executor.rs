//! Aggregation coordinator

use super::models::{MuseumError, SearchOutcome, Timing, UnresponsiveMuseum};
use crate::museums::{Museum, MuseumRegistry};
use crate::network::HttpClient;
use crate::store::{ArtworkFilter, ArtworkStore};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Outcome of a single museum's contribution to a run
enum MuseumRun {
    Completed(Timing),
    Failed(UnresponsiveMuseum),
}

/// Coordinator that fetches from all museums concurrently and persists
/// every successfully produced record.
///
/// The keyword is passed explicitly; the coordinator keeps no search
/// state of its own between runs.
pub struct Aggregator {
    /// HTTP client shared by all adapters
    client: HttpClient,
    /// Museum registry
    registry: Arc<MuseumRegistry>,
    /// The store records are persisted into
    store: Arc<ArtworkStore>,
    /// Default per-museum timeout
    default_timeout: Duration,
    /// Maximum per-museum timeout
    max_timeout: Duration,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(client: HttpClient, registry: Arc<MuseumRegistry>, store: Arc<ArtworkStore>) -> Self {
        Self {
            client,
            registry,
            store,
            default_timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            max_timeout: Duration::from_secs(crate::MAX_TIMEOUT),
        }
    }

    /// Set the default per-museum timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Run a full aggregation for one keyword.
    ///
    /// The store is rebuilt first, so two runs never accumulate. Every
    /// enabled adapter runs concurrently; a failing or timed-out adapter
    /// is recorded as unresponsive without blocking the others. Only a
    /// storage failure aborts the run.
    pub async fn run(&self, keyword: &str) -> anyhow::Result<SearchOutcome> {
        self.store.rebuild()?;

        if keyword.trim().is_empty() {
            return Ok(SearchOutcome::empty(keyword));
        }

        let museums = self.registry.enabled();
        info!("Aggregating '{}' across {} museums", keyword, museums.len());

        let futures: Vec<_> = museums
            .into_iter()
            .map(|museum| self.run_museum(museum, keyword))
            .collect();
        let runs = join_all(futures).await;

        let mut outcome = SearchOutcome::empty(keyword);
        for run in runs {
            match run {
                MuseumRun::Completed(timing) => outcome.timings.push(timing),
                MuseumRun::Failed(unresponsive) => outcome.unresponsive.push(unresponsive),
            }
        }
        outcome.total_records = self.store.count(&ArtworkFilter::default())? as usize;

        info!(
            "Aggregation for '{}' persisted {} records ({} museums unresponsive)",
            keyword,
            outcome.total_records,
            outcome.unresponsive.len()
        );
        Ok(outcome)
    }

    /// Fetch one museum and persist its records
    async fn run_museum(&self, museum: Arc<dyn Museum>, keyword: &str) -> MuseumRun {
        let name = museum.name().to_string();
        let fetch_timeout = Duration::from_secs_f64(
            self.registry
                .get_timeout(&name, self.default_timeout.as_secs_f64())
                .min(self.max_timeout.as_secs_f64()),
        );

        debug!("Fetching {} with timeout {:?}", name, fetch_timeout);
        let start = Instant::now();

        match timeout(fetch_timeout, museum.fetch(&self.client, keyword)).await {
            Ok(Ok(works)) => {
                let mut persisted = 0usize;
                for work in &works {
                    match self.store.insert(work) {
                        Ok(()) => persisted += 1,
                        Err(e) => {
                            warn!("Failed to persist {} record {}: {}", name, work.external_id, e)
                        }
                    }
                }

                let elapsed = start.elapsed();
                debug!("{} contributed {} records in {:?}", name, persisted, elapsed);
                MuseumRun::Completed(Timing {
                    museum: name,
                    time_ms: elapsed.as_millis() as u64,
                    record_count: persisted,
                })
            }
            Ok(Err(e)) => {
                warn!("Fetch failed for {}: {}", name, e);
                MuseumRun::Failed(UnresponsiveMuseum {
                    error: MuseumError::classify(&e),
                    name,
                })
            }
            Err(_) => {
                warn!("Timeout for {}", name);
                MuseumRun::Failed(UnresponsiveMuseum {
                    name,
                    error: MuseumError::Timeout,
                })
            }
        }
    }
}
