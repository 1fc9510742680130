//! Image handle for decoded pixel data

use std::sync::Arc;

/// Handle to decoded image data that can be cheaply cloned
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    /// Pixel data in RGBA8 format
    pub data: Arc<Vec<u8>>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageHandle {
    /// Create a new image handle from RGBA8 data
    pub fn from_rgba8(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "Image data size mismatch"
        );
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}
