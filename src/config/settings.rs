//! Settings structures for Museum Conventus configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub outgoing: OutgoingSettings,
    pub museums: Vec<MuseumConfig>,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            outgoing: OutgoingSettings::default(),
            museums: default_museums(),
            ui: UiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CONVENTUS_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("CONVENTUS_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("CONVENTUS_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CONVENTUS_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("CONVENTUS_DATABASE_URL") {
            self.storage.database_url = Some(val);
        }
    }

    /// The configured database path.
    ///
    /// A missing database URL is a startup error, not a per-request one.
    pub fn database_url(&self) -> Result<&str> {
        self.storage
            .database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "storage.database_url is not set (or set CONVENTUS_DATABASE_URL)"
                )
            })
    }

    /// Get museum config by name
    pub fn get_museum(&self, name: &str) -> Option<&MuseumConfig> {
        self.museums.iter().find(|m| m.name == name)
    }

    /// Get all enabled museums
    pub fn enabled_museums(&self) -> Vec<&MuseumConfig> {
        self.museums.iter().filter(|m| !m.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Museum Conventus".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Base URL for the instance
    pub base_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            base_url: None,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite database path; required at startup
    pub database_url: Option<String>,
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Timeout for a single HTTP request in seconds
    pub request_timeout: f64,
    /// Connection pool max size per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
        }
    }
}

/// Individual museum adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MuseumConfig {
    /// Museum name (unique identifier)
    pub name: String,
    /// Adapter module to use
    pub museum: String,
    /// Whether the adapter is disabled
    pub disabled: bool,
    /// Custom timeout for the whole fetch, in seconds
    pub timeout: Option<f64>,
    /// API key if required
    pub api_key: Option<String>,
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            museum: String::new(),
            disabled: false,
            timeout: None,
            api_key: None,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Results per page
    pub results_per_page: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            results_per_page: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Default museum configurations
fn default_museums() -> Vec<MuseumConfig> {
    vec![
        MuseumConfig {
            name: "victoria_albert".to_string(),
            museum: "victoria_albert".to_string(),
            ..Default::default()
        },
        MuseumConfig {
            name: "met".to_string(),
            museum: "met".to_string(),
            ..Default::default()
        },
        MuseumConfig {
            name: "rijksmuseum".to_string(),
            museum: "rijksmuseum".to_string(),
            // Collection API key embedded by the original deployment
            api_key: Some("D82d0Rur".to_string()),
            ..Default::default()
        },
    ]
}
