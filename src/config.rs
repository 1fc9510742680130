//! Process-wide image display configuration
//!
//! Applications install one [`ImageConfig`] with [`set_image_config`]
//! before creating widgets. It carries the affordance captions and an
//! optional URL rewrite hook, for example to route every plain source
//! through a CDN.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::Source;

static IMAGE_CONFIG: OnceLock<ImageConfig> = OnceLock::new();

/// Rewrites a plain source's URL before the load request is issued
pub type ReplaceSource = Arc<dyn Fn(&Source) -> String + Send + Sync>;

/// Errors from reading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Global settings for image display
#[derive(Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Caption under the loading affordance
    #[serde(default = "default_loading_text")]
    pub loading_text: String,

    /// Caption under the error affordance
    #[serde(default = "default_error_text")]
    pub error_text: String,

    /// URL rewrite hook, only consulted for sources without variants
    #[serde(skip)]
    pub replace_source: Option<ReplaceSource>,
}

fn default_loading_text() -> String {
    "Image is loading".to_string()
}

fn default_error_text() -> String {
    "Image load failed".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            loading_text: default_loading_text(),
            error_text: default_error_text(),
            replace_source: None,
        }
    }
}

impl ImageConfig {
    /// Set the URL rewrite hook
    pub fn with_replace_source<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Source) -> String + Send + Sync + 'static,
    {
        self.replace_source = Some(Arc::new(hook));
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::fmt::Debug for ImageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageConfig")
            .field("loading_text", &self.loading_text)
            .field("error_text", &self.error_text)
            .field("has_replace_source", &self.replace_source.is_some())
            .finish()
    }
}

/// Install the process-wide config
///
/// Fails with the rejected config if one was already installed.
pub fn set_image_config(config: ImageConfig) -> Result<(), ImageConfig> {
    IMAGE_CONFIG.set(config)
}

/// The installed config, or defaults
pub fn image_config() -> &'static ImageConfig {
    IMAGE_CONFIG.get_or_init(ImageConfig::default)
}

/// The URL a request for this source should fetch
///
/// Sources with variants keep their primary URL untouched so the loader
/// can still fall back to it verbatim. Plain sources go through the
/// rewrite hook when one is configured.
pub fn resolve_source_url(source: &Source, config: &ImageConfig) -> String {
    if source.variants.is_empty() {
        if let Some(replace) = &config.replace_source {
            return replace(source);
        }
    }
    source.url().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ImageConfig::from_json("{}").unwrap();
        assert_eq!(config.loading_text, "Image is loading");
        assert_eq!(config.error_text, "Image load failed");
        assert!(config.replace_source.is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_texts() {
        let config = ImageConfig {
            loading_text: "Fetching".to_string(),
            error_text: "Broken".to_string(),
            replace_source: None,
        };
        let back = ImageConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back.loading_text, "Fetching");
        assert_eq!(back.error_text, "Broken");
    }

    #[test]
    fn test_rewrite_applies_to_plain_sources_only() {
        let config = ImageConfig::default()
            .with_replace_source(|source| format!("https://cdn.example.com/{}", source.url()));

        let plain = Source::new("cat.png");
        assert_eq!(
            resolve_source_url(&plain, &config),
            "https://cdn.example.com/cat.png"
        );

        let typed = Source::new("cat.png").with_variant("image/avif", "cat.avif");
        assert_eq!(resolve_source_url(&typed, &config), "cat.png");
    }

    #[test]
    fn test_no_hook_passes_url_through() {
        let config = ImageConfig::default();
        let source = Source::new("cat.png");
        assert_eq!(resolve_source_url(&source, &config), "cat.png");
    }
}
