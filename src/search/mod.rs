//! Search aggregation
//!
//! Runs every museum adapter concurrently for one keyword and persists
//! their records into the store.

mod executor;
mod models;

pub use executor::Aggregator;
pub use models::*;
