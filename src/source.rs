//! Image source descriptions
//!
//! A [`Source`] names where pixels come from: a primary URL plus optional
//! typed variants a loader may prefer when it supports their media type.
//! Sources are compared structurally, and [`SourceKey`] condenses that
//! identity into a cheap copyable token for matching async load results
//! back to the request that produced them.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One alternative rendition of a source, tagged with its media type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceVariant {
    /// Media type such as `image/avif`
    pub media_type: String,
    /// Location of this rendition
    pub url: String,
}

/// Where an image comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    /// Primary location, used when no variant is selected
    pub url: String,
    /// Preferred renditions in priority order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<SourceVariant>,
}

impl Source {
    /// Create a source with just a primary URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            variants: Vec::new(),
        }
    }

    /// Add a typed variant, keeping earlier variants at higher priority
    pub fn with_variant(mut self, media_type: impl Into<String>, url: impl Into<String>) -> Self {
        self.variants.push(SourceVariant {
            media_type: media_type.into(),
            url: url.into(),
        });
        self
    }

    /// Primary URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True when there is nothing to load
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.variants.is_empty()
    }

    /// Identity token for matching load results to this source
    pub fn key(&self) -> SourceKey {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        SourceKey(hasher.finish())
    }
}

impl From<&str> for Source {
    fn from(url: &str) -> Self {
        Source::new(url)
    }
}

impl From<String> for Source {
    fn from(url: String) -> Self {
        Source::new(url)
    }
}

/// Compact identity of a [`Source`]
///
/// Stable for the lifetime of the process, so results arriving after the
/// source changed can be recognized as stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceKey(u64);
