//! Normalized artwork data model

mod artwork;

pub use artwork::*;
