//! Layout and typography constants

/// Default font size for affordance captions
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Approximate glyph advance as a fraction of font size
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line height as a fraction of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Edge length of the icon inside loading and error affordances
pub const AFFORDANCE_ICON_SIZE: f32 = 24.0;

/// Vertical gap between affordance icon and caption
pub const AFFORDANCE_SPACING: f32 = 8.0;

/// Corner radius of the round image shape
pub const ROUND_RADIUS: f32 = 6.0;

/// Height of the shadow band on gallery thumbnails
pub const GALLERY_SHADOW_HEIGHT: f32 = 40.0;

/// Fallback edge length when no intrinsic image size is known yet
pub const DEFAULT_IMAGE_SIZE: f32 = 120.0;

/// Approximate width of one character at the given font size
pub fn char_width(font_size: f32) -> f32 {
    font_size * CHAR_WIDTH_FACTOR
}

/// Line height at the given font size
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}
