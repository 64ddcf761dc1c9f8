//! Museum adapter module
//!
//! Defines the Museum trait and provides a registry for all adapters.

mod loader;
mod registry;
mod traits;

// Adapter implementations
pub mod met;
pub mod rijksmuseum;
pub mod victoria_albert;

pub use loader::MuseumLoader;
pub use registry::MuseumRegistry;
pub use traits::*;
