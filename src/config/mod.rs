//! Configuration for Museum Conventus
//!
//! Settings are loaded from a YAML file and merged with `CONVENTUS_*`
//! environment variables. They are passed explicitly to the components
//! that need them; there is no global settings state.

mod settings;

pub use settings::*;
