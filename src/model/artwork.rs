//! Museum-agnostic artwork record

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sentinel used when a museum has no image for a work.
///
/// `image_url` is always either a remote URL or exactly this value,
/// never empty.
pub const NO_IMAGE_PLACEHOLDER: &str = "static/no_image.jpg";

/// A single normalized artwork entry.
///
/// Every museum adapter maps its own response shape into this struct;
/// the store and the web layer only ever see this representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    /// Storage primary key derived from `museum` + `external_id`
    pub surrogate_key: i64,
    /// Museum-provided identifier; unique per museum only
    pub external_id: String,
    /// Title of the work, if the source had one
    pub title: Option<String>,
    /// Maker name, if the source had one
    pub artist: Option<String>,
    /// Object type used as the filter facet; may be empty
    pub medium: String,
    /// Free-form display date ("early 1900s", "c. 1650", ...)
    pub date: String,
    /// Deep link to the item page on the museum's site
    pub url: String,
    /// Remote image URL or [`NO_IMAGE_PLACEHOLDER`]
    pub image_url: String,
    /// Museum display name, constant per adapter
    pub museum: String,
    /// Museum homepage, constant per adapter
    pub museum_url: String,
}

impl Artwork {
    /// Create a new record with the surrogate key precomputed
    pub fn new(
        external_id: impl Into<String>,
        museum: impl Into<String>,
        museum_url: impl Into<String>,
    ) -> Self {
        let external_id = external_id.into();
        let museum = museum.into();

        Self {
            surrogate_key: surrogate_key(&museum, &external_id),
            external_id,
            title: None,
            artist: None,
            medium: String::new(),
            date: String::new(),
            url: String::new(),
            image_url: NO_IMAGE_PLACEHOLDER.to_string(),
            museum,
            museum_url: museum_url.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = medium.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Whether the record carries a real image rather than the placeholder
    pub fn has_image(&self) -> bool {
        self.image_url != NO_IMAGE_PLACEHOLDER
    }
}

/// Derive the storage primary key for a record.
///
/// First eight bytes of SHA-256 over `museum` + `external_id`, interpreted
/// big-endian. Stable across runs and processes. Qualifying by museum means
/// two museums returning the same identifier string no longer collide; the
/// key still collides for duplicate ids within one museum, where later
/// inserts overwrite earlier ones.
pub fn surrogate_key(museum: &str, external_id: &str) -> i64 {
    let mut hasher = Sha256::new();
    hasher.update(museum.as_bytes());
    hasher.update(external_id.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(bytes)
}
