//! Theme colors for image display surfaces
//!
//! A theme is installed once per process with [`set_theme`]. Widgets read
//! it through [`current_theme`] at draw time, so swapping the theme before
//! the first draw restyles everything without touching widget state.

use std::sync::OnceLock;

use crate::renderer::Color;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Colors used by the image widget and its affordances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Background of the reserved box before content may load
    pub placeholder_bg: Color,
    /// Background behind the loading and error affordances
    pub affordance_bg: Color,
    /// Icon tint inside affordances
    pub affordance_icon: Color,
    /// Caption text inside affordances
    pub affordance_text: Color,
    /// Bottom shadow band drawn over gallery thumbnails
    pub gallery_shadow: Color,
    /// Outline around the reserved box
    pub border: Color,
}

impl Theme {
    /// Dark theme
    pub fn dark() -> Self {
        Self {
            placeholder_bg: Color::rgb(0.13, 0.13, 0.13),
            affordance_bg: Color::rgb(0.18, 0.18, 0.18),
            affordance_icon: Color::rgb(0.55, 0.55, 0.55),
            affordance_text: Color::rgb(0.65, 0.65, 0.65),
            gallery_shadow: Color::rgba(0.0, 0.0, 0.0, 0.45),
            border: Color::rgb(0.28, 0.28, 0.28),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            placeholder_bg: Color::rgb(0.93, 0.93, 0.93),
            affordance_bg: Color::rgb(0.88, 0.88, 0.88),
            affordance_icon: Color::rgb(0.45, 0.45, 0.45),
            affordance_text: Color::rgb(0.35, 0.35, 0.35),
            gallery_shadow: Color::rgba(0.0, 0.0, 0.0, 0.35),
            border: Color::rgb(0.78, 0.78, 0.78),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the process-wide theme
///
/// Fails with the rejected theme if one was already installed.
pub fn set_theme(theme: Theme) -> Result<(), Theme> {
    THEME.set(theme)
}

/// The installed theme, or the dark default
pub fn current_theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_and_light_differ() {
        assert_ne!(Theme::dark().placeholder_bg, Theme::light().placeholder_bg);
        assert_ne!(Theme::dark().affordance_text, Theme::light().affordance_text);
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::dark());
    }
}
