//! Loader for initializing museum adapters from configuration

use super::registry::MuseumRegistry;
use super::traits::Museum;
use super::{met, rijksmuseum, victoria_albert};
use crate::config::{MuseumConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing adapters from settings
pub struct MuseumLoader;

impl MuseumLoader {
    /// Load all museum adapters from settings
    pub fn load(settings: &Settings) -> Result<MuseumRegistry> {
        let mut registry = MuseumRegistry::new();

        for config in &settings.museums {
            if config.disabled {
                info!("Skipping disabled museum: {}", config.name);
                continue;
            }

            match Self::create_museum(&config.museum, config) {
                Ok(museum) => {
                    info!("Loaded museum adapter: {}", museum.name());
                    registry.register(museum, config.clone());
                }
                Err(e) => {
                    warn!("Failed to load museum {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} museum adapters", registry.len());
        Ok(registry)
    }

    /// Create an adapter instance by module name
    fn create_museum(museum_type: &str, config: &MuseumConfig) -> Result<Arc<dyn Museum>> {
        let museum: Arc<dyn Museum> = match museum_type {
            "victoria_albert" => Arc::new(victoria_albert::VictoriaAlbert::new()),
            "met" => Arc::new(met::MetMuseum::new()),
            "rijksmuseum" => {
                let api_key = config
                    .api_key
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("rijksmuseum requires an api_key"))?;
                Arc::new(rijksmuseum::Rijksmuseum::new(api_key))
            }
            _ => {
                return Err(anyhow::anyhow!("Unknown museum type: {}", museum_type));
            }
        };

        Ok(museum)
    }

    /// Get list of available adapter types
    pub fn available_museums() -> Vec<&'static str> {
        vec!["victoria_albert", "met", "rijksmuseum"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_settings() {
        let settings = Settings::default();
        let registry = MuseumLoader::load(&settings).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_rijksmuseum_requires_key() {
        let config = MuseumConfig {
            name: "rijksmuseum".to_string(),
            museum: "rijksmuseum".to_string(),
            api_key: None,
            ..Default::default()
        };
        assert!(MuseumLoader::create_museum("rijksmuseum", &config).is_err());
    }
}
