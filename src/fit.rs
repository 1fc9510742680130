//! Object-fit geometry
//!
//! Pure math for placing an image's intrinsic size inside a frame. The
//! widget clips to the frame, so fits that overflow (cover, none) simply
//! produce bounds larger than the frame.

use serde::{Deserialize, Serialize};

use crate::layout::{Bounds, Size};

/// How intrinsic pixels map onto the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    /// Stretch to the frame, ignoring aspect ratio
    #[default]
    Fill,
    /// Largest aspect-preserving size that fits entirely
    Contain,
    /// Smallest aspect-preserving size that covers the frame
    Cover,
    /// Natural size, no scaling
    None,
    /// Natural size, unless it overflows, then contain
    ScaleDown,
}

/// Which part of the image stays visible when it overflows the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl ImagePosition {
    /// Anchor factors along x and y, 0.0 at the start edge and 1.0 at the end
    pub fn factors(self) -> (f32, f32) {
        match self {
            ImagePosition::Center => (0.5, 0.5),
            ImagePosition::Top => (0.5, 0.0),
            ImagePosition::Bottom => (0.5, 1.0),
            ImagePosition::Left => (0.0, 0.5),
            ImagePosition::Right => (1.0, 0.5),
        }
    }
}

/// Bounds the image should be drawn into for the given fit and position
pub fn fitted_bounds(intrinsic: Size, frame: Bounds, fit: ImageFit, position: ImagePosition) -> Bounds {
    if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
        return frame;
    }

    let (width, height) = match fit {
        ImageFit::Fill => (frame.width, frame.height),
        ImageFit::Contain => scaled(intrinsic, frame, f32::min),
        ImageFit::Cover => scaled(intrinsic, frame, f32::max),
        ImageFit::None => (intrinsic.width, intrinsic.height),
        ImageFit::ScaleDown => {
            if intrinsic.width <= frame.width && intrinsic.height <= frame.height {
                (intrinsic.width, intrinsic.height)
            } else {
                scaled(intrinsic, frame, f32::min)
            }
        }
    };

    let (fx, fy) = position.factors();
    Bounds::new(
        frame.x + (frame.width - width) * fx,
        frame.y + (frame.height - height) * fy,
        width,
        height,
    )
}

fn scaled(intrinsic: Size, frame: Bounds, pick: fn(f32, f32) -> f32) -> (f32, f32) {
    let scale = pick(
        frame.width / intrinsic.width,
        frame.height / intrinsic.height,
    );
    (intrinsic.width * scale, intrinsic.height * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Bounds {
        Bounds::new(10.0, 10.0, 100.0, 100.0)
    }

    #[test]
    fn test_fill_stretches_to_frame() {
        let out = fitted_bounds(
            Size::new(200.0, 50.0),
            frame(),
            ImageFit::Fill,
            ImagePosition::Center,
        );
        assert_eq!(out, frame());
    }

    #[test]
    fn test_contain_letterboxes_wide_image() {
        let out = fitted_bounds(
            Size::new(200.0, 100.0),
            frame(),
            ImageFit::Contain,
            ImagePosition::Center,
        );
        assert_eq!(out.width, 100.0);
        assert_eq!(out.height, 50.0);
        assert_eq!(out.x, 10.0);
        assert_eq!(out.y, 35.0);
    }

    #[test]
    fn test_cover_overflows_wide_image() {
        let out = fitted_bounds(
            Size::new(200.0, 100.0),
            frame(),
            ImageFit::Cover,
            ImagePosition::Center,
        );
        assert_eq!(out.width, 200.0);
        assert_eq!(out.height, 100.0);
        assert_eq!(out.x, -40.0);
        assert_eq!(out.y, 10.0);
    }

    #[test]
    fn test_none_keeps_natural_size() {
        let out = fitted_bounds(
            Size::new(30.0, 40.0),
            frame(),
            ImageFit::None,
            ImagePosition::Center,
        );
        assert_eq!(out.width, 30.0);
        assert_eq!(out.height, 40.0);
        assert_eq!(out.x, 45.0);
        assert_eq!(out.y, 40.0);
    }

    #[test]
    fn test_scale_down_shrinks_only_oversized_images() {
        let small = fitted_bounds(
            Size::new(30.0, 40.0),
            frame(),
            ImageFit::ScaleDown,
            ImagePosition::Center,
        );
        assert_eq!(small.width, 30.0);

        let large = fitted_bounds(
            Size::new(300.0, 400.0),
            frame(),
            ImageFit::ScaleDown,
            ImagePosition::Center,
        );
        assert_eq!(large.height, 100.0);
        assert_eq!(large.width, 75.0);
    }

    #[test]
    fn test_position_anchors_overflow() {
        let top = fitted_bounds(
            Size::new(100.0, 200.0),
            frame(),
            ImageFit::Cover,
            ImagePosition::Top,
        );
        assert_eq!(top.y, 10.0);

        let bottom = fitted_bounds(
            Size::new(100.0, 200.0),
            frame(),
            ImageFit::Cover,
            ImagePosition::Bottom,
        );
        assert_eq!(bottom.bottom(), 110.0);
    }

    #[test]
    fn test_degenerate_intrinsic_fills_frame() {
        let out = fitted_bounds(
            Size::ZERO,
            frame(),
            ImageFit::Contain,
            ImagePosition::Center,
        );
        assert_eq!(out, frame());
    }
}
