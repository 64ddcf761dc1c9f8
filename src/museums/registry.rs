//! Registry of available museum adapters

use super::traits::Museum;
use crate::config::MuseumConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry holding the loaded museum adapters and their configurations,
/// keyed by the adapter's display name.
pub struct MuseumRegistry {
    museums: HashMap<String, Arc<dyn Museum>>,
    configs: HashMap<String, MuseumConfig>,
}

impl MuseumRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            museums: HashMap::new(),
            configs: HashMap::new(),
        }
    }

    /// Register an adapter
    pub fn register(&mut self, museum: Arc<dyn Museum>, config: MuseumConfig) {
        let name = museum.name().to_string();
        self.museums.insert(name.clone(), museum);
        self.configs.insert(name, config);
    }

    /// Get an adapter by display name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Museum>> {
        self.museums.get(name)
    }

    /// Get adapter config by display name
    pub fn get_config(&self, name: &str) -> Option<&MuseumConfig> {
        self.configs.get(name)
    }

    /// All adapters that are not disabled
    pub fn enabled(&self) -> Vec<Arc<dyn Museum>> {
        self.museums
            .iter()
            .filter(|(name, _)| {
                self.configs
                    .get(*name)
                    .map(|config| !config.disabled)
                    .unwrap_or(true)
            })
            .map(|(_, museum)| museum.clone())
            .collect()
    }

    /// All registered display names
    pub fn names(&self) -> Vec<&str> {
        self.museums.keys().map(|s| s.as_str()).collect()
    }

    /// Name and homepage of every registered museum, sorted by name
    pub fn listing(&self) -> Vec<(String, String)> {
        let mut listing: Vec<_> = self
            .museums
            .values()
            .map(|m| (m.name().to_string(), m.website().to_string()))
            .collect();
        listing.sort();
        listing
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.museums.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.museums.is_empty()
    }

    /// Effective fetch timeout for an adapter, in seconds
    pub fn get_timeout(&self, name: &str, default: f64) -> f64 {
        self.configs
            .get(name)
            .and_then(|c| c.timeout)
            .or_else(|| self.museums.get(name).map(|m| m.timeout()))
            .unwrap_or(default)
    }
}

impl Default for MuseumRegistry {
    fn default() -> Self {
        Self::new()
    }
}
