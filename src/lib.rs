//! Museum Conventus: aggregated artwork search across museum collection APIs
//!
//! Fetches matching artworks from the Victoria and Albert Museum, the
//! Metropolitan Museum of Art and the Rijksmuseum, normalizes them into a
//! single schema and serves filterable, paginated results.

pub mod config;
pub mod model;
pub mod museums;
pub mod network;
pub mod search;
pub mod store;
pub mod web;

pub use config::Settings;
pub use model::Artwork;
pub use museums::Museum;
pub use search::{Aggregator, SearchOutcome};
pub use store::ArtworkStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for a single museum fetch in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 120;

/// Results shown per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;
