//! SVG icon rasterization and caching
//!
//! Affordance icons are embedded as SVG and rasterized on first use via
//! resvg/tiny-skia. A global cache keyed by (name, size) makes repeated
//! draws cheap.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::image::ImageHandle;

static ICON_CACHE: OnceLock<Mutex<IconCache>> = OnceLock::new();

fn global_cache() -> &'static Mutex<IconCache> {
    ICON_CACHE.get_or_init(|| Mutex::new(IconCache::new()))
}

/// Get an icon from the global cache, rasterizing it on first access
///
/// # Arguments
/// * `name` - Cache key, e.g. "image" or "image-broken"
/// * `svg_data` - Raw SVG bytes (use the [`icons`] constants)
/// * `size` - Target size in pixels, icons are square
/// * `color` - RGBA color substituted for "currentColor" in the SVG
pub fn get_icon(name: &str, svg_data: &[u8], size: u32, color: [u8; 4]) -> Option<ImageHandle> {
    let mut cache = global_cache().lock().ok()?;
    cache.get_or_rasterize(name, svg_data, size, color)
}

/// Cache of rasterized icons keyed by (name, size)
#[derive(Default)]
pub struct IconCache {
    cache: HashMap<(String, u32), ImageHandle>,
}

impl IconCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an icon from cache, or rasterize and cache it
    pub fn get_or_rasterize(
        &mut self,
        name: &str,
        svg_data: &[u8],
        size: u32,
        color: [u8; 4],
    ) -> Option<ImageHandle> {
        let key = (name.to_string(), size);

        if let Some(handle) = self.cache.get(&key) {
            return Some(handle.clone());
        }

        if let Some(handle) = rasterize_svg(svg_data, size, color) {
            self.cache.insert(key, handle.clone());
            Some(handle)
        } else {
            None
        }
    }

    /// Drop all cached icons
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Rasterize an SVG to an RGBA [`ImageHandle`]
///
/// The output keeps tiny-skia's premultiplied alpha.
pub fn rasterize_svg(svg_data: &[u8], size: u32, color: [u8; 4]) -> Option<ImageHandle> {
    let svg_str = std::str::from_utf8(svg_data).ok()?;
    let hex_color = format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2]);
    let svg_with_color = svg_str.replace("currentColor", &hex_color);

    let tree = match resvg::usvg::Tree::from_str(&svg_with_color, &resvg::usvg::Options::default())
    {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to parse SVG: {:?}", e);
            return None;
        }
    };

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());

    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = match tiny_skia::Pixmap::new(width, height) {
        Some(p) => p,
        None => {
            log::error!("Failed to create pixmap {}x{}", width, height);
            return None;
        }
    };

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    log::debug!(
        "Rasterized {} byte SVG at {}x{}",
        svg_data.len(),
        width,
        height
    );

    Some(ImageHandle::from_rgba8(pixmap.data().to_vec(), width, height))
}

/// Built-in icons in the Bootstrap Icons style
pub mod icons {
    /// Photo frame, shown while a source is loading
    pub const IMAGE: &[u8] = include_bytes!("../assets/icons/image.svg");
    /// Slashed photo frame, shown when a source failed
    pub const IMAGE_BROKEN: &[u8] = include_bytes!("../assets/icons/image-broken.svg");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_icons_rasterize() {
        for (name, data) in [("image", icons::IMAGE), ("image-broken", icons::IMAGE_BROKEN)] {
            let handle = rasterize_svg(data, 24, [200, 200, 200, 255])
                .unwrap_or_else(|| panic!("{name} failed to rasterize"));
            assert_eq!(handle.width.max(handle.height), 24);
            assert_eq!(
                handle.data.len(),
                (handle.width * handle.height * 4) as usize
            );
            // Tinted strokes must leave visible pixels
            assert!(handle.data.iter().any(|&b| b != 0));
        }
    }

    #[test]
    fn test_cache_survives_a_clear() {
        let mut cache = IconCache::new();
        let first = cache
            .get_or_rasterize("image", icons::IMAGE, 16, [255, 255, 255, 255])
            .unwrap();
        cache.clear();
        let again = cache
            .get_or_rasterize("image", icons::IMAGE, 16, [255, 255, 255, 255])
            .unwrap();
        assert_eq!(first, again);
        assert_eq!(first.data.len(), (16 * 16 * 4) as usize);
    }
}
