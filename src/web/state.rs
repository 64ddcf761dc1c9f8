//! Application state shared across handlers

use crate::config::Settings;
use crate::museums::MuseumRegistry;
use crate::network::HttpClient;
use crate::search::Aggregator;
use crate::store::ArtworkStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Museum registry
    pub registry: Arc<MuseumRegistry>,
    /// Aggregation coordinator
    pub aggregator: Arc<Aggregator>,
    /// Artwork store
    pub store: Arc<ArtworkStore>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        registry: MuseumRegistry,
        client: HttpClient,
        store: ArtworkStore,
    ) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);
        let registry = Arc::new(registry);
        let store = Arc::new(store);
        let aggregator = Arc::new(Aggregator::new(client, registry.clone(), store.clone()));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings,
            registry,
            aggregator,
            store,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Results per page
    pub fn per_page(&self) -> u32 {
        self.settings.ui.results_per_page
    }
}
