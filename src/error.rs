//! Load error types

use thiserror::Error;

/// Why a source failed to produce pixels
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source has no URL")]
    EmptySource,

    #[error("Resource not found: {url}")]
    Missing { url: String },

    #[error("Failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result alias for load operations
pub type Result<T> = std::result::Result<T, LoadError>;
