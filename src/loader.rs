//! Resource loaders
//!
//! A [`ResourceLoader`] turns a [`LoadRequest`] into decoded pixels. The
//! request carries the full source so the loader can pick the variant it
//! supports; the result carries the source key so arrivals can be matched
//! against possibly changed widget state.

use std::collections::HashMap;

use web_time::Instant;

use crate::error::{LoadError, Result};
use crate::event::Event;
use crate::image::ImageHandle;
use crate::source::{Source, SourceKey};

/// One pending fetch, emitted by display state
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Identity of the source as the widget knew it
    pub key: SourceKey,
    /// What to fetch, with the plain URL already rewritten if configured
    pub source: Source,
    /// Referrer policy to apply, meaningful only to network transports
    pub referrer_policy: Option<String>,
}

/// Outcome of one fetch
#[derive(Debug)]
pub struct LoadResult {
    pub key: SourceKey,
    pub outcome: Result<ImageHandle>,
}

impl LoadResult {
    /// Convert into the event widgets consume
    pub fn into_event(self) -> Event {
        match self.outcome {
            Ok(handle) => Event::SourceLoaded {
                key: self.key,
                handle,
            },
            Err(e) => Event::SourceFailed {
                key: self.key,
                reason: e.to_string(),
            },
        }
    }
}

/// Fetches and decodes image sources
pub trait ResourceLoader {
    /// Fetch and decode the requested source
    fn load(&mut self, request: &LoadRequest) -> LoadResult;

    /// Already decoded pixels for this key, if any
    fn cached(&self, key: &SourceKey) -> Option<ImageHandle>;

    /// Media types this loader prefers among source variants
    fn supported_media_types(&self) -> &[&str] {
        &["image/png", "image/jpeg"]
    }
}

/// The URL a loader should fetch for this source
///
/// Picks the first variant with a supported media type, falling back to
/// the primary URL when none matches.
pub fn select_source_url<'a>(source: &'a Source, supported: &[&str]) -> &'a str {
    source
        .variants
        .iter()
        .find(|variant| supported.contains(&variant.media_type.as_str()))
        .map(|variant| variant.url.as_str())
        .unwrap_or(source.url())
}

/// Loads images from the local filesystem
///
/// URLs are treated as paths. The referrer policy has no filesystem
/// meaning and is ignored.
#[derive(Debug, Default)]
pub struct FileLoader {
    cache: HashMap<SourceKey, ImageHandle>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode(&self, url: &str) -> Result<ImageHandle> {
        let start = Instant::now();
        match image::open(url) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::info!(
                    "🖼️ Loaded {} ({}x{}) in {:?}",
                    url,
                    width,
                    height,
                    start.elapsed()
                );
                Ok(ImageHandle::from_rgba8(rgba.into_raw(), width, height))
            }
            Err(image::ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::Missing {
                    url: url.to_string(),
                })
            }
            Err(e) => Err(LoadError::Decode {
                url: url.to_string(),
                source: e,
            }),
        }
    }
}

impl ResourceLoader for FileLoader {
    fn load(&mut self, request: &LoadRequest) -> LoadResult {
        if let Some(handle) = self.cache.get(&request.key) {
            return LoadResult {
                key: request.key,
                outcome: Ok(handle.clone()),
            };
        }

        let outcome = if request.source.is_empty() {
            Err(LoadError::EmptySource)
        } else {
            let url = select_source_url(&request.source, self.supported_media_types());
            self.decode(url)
        };

        if let Ok(handle) = &outcome {
            self.cache.insert(request.key, handle.clone());
        }

        LoadResult {
            key: request.key,
            outcome,
        }
    }

    fn cached(&self, key: &SourceKey) -> Option<ImageHandle> {
        self.cache.get(key).cloned()
    }
}

/// Loads images from pre-registered in-memory bytes
///
/// Useful for tests and for assets bundled with the application.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Vec<u8>>,
    cache: HashMap<SourceKey, ImageHandle>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make encoded bytes available under a URL
    pub fn register(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }

    fn decode(&self, url: &str) -> Result<ImageHandle> {
        let bytes = self.entries.get(url).ok_or_else(|| LoadError::Missing {
            url: url.to_string(),
        })?;

        let start = Instant::now();
        let decoded = image::load_from_memory(bytes).map_err(|e| LoadError::Decode {
            url: url.to_string(),
            source: e,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!(
            "🖼️ Decoded {} ({}x{}) in {:?}",
            url,
            width,
            height,
            start.elapsed()
        );
        Ok(ImageHandle::from_rgba8(rgba.into_raw(), width, height))
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&mut self, request: &LoadRequest) -> LoadResult {
        if let Some(handle) = self.cache.get(&request.key) {
            return LoadResult {
                key: request.key,
                outcome: Ok(handle.clone()),
            };
        }

        let outcome = if request.source.is_empty() {
            Err(LoadError::EmptySource)
        } else {
            let url = select_source_url(&request.source, self.supported_media_types());
            self.decode(url)
        };

        if let Ok(handle) = &outcome {
            self.cache.insert(request.key, handle.clone());
        }

        LoadResult {
            key: request.key,
            outcome,
        }
    }

    fn cached(&self, key: &SourceKey) -> Option<ImageHandle> {
        self.cache.get(key).cloned()
    }
}
