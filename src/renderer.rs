//! Command-recording renderer
//!
//! Widgets draw by pushing commands into a [`Renderer`]. The recorded
//! command list is handed to whatever backend presents the frame, which
//! keeps widget code independent of any particular graphics API.

use crate::image::ImageHandle;
use crate::layout::Bounds;

/// RGBA color with components in the 0.0..=1.0 range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
            (self.a.clamp(0.0, 1.0) * 255.0) as u8,
        ]
    }
}

/// A single draw operation recorded by a widget
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Filled rectangle, optionally with rounded corners
    FillRect {
        bounds: Bounds,
        color: Color,
        corner_radius: f32,
    },
    /// Rectangle outline
    StrokeRect {
        bounds: Bounds,
        color: Color,
        width: f32,
    },
    /// Text run at a baseline-less top-left origin
    Text {
        content: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
    /// Decoded image stretched into `bounds`
    Image { handle: ImageHandle, bounds: Bounds },
    /// Begin clipping subsequent commands to `bounds`, with rounded
    /// corners when `corner_radius` is nonzero
    PushClip { bounds: Bounds, corner_radius: f32 },
    /// End the innermost clip region
    PopClip,
}

/// Records draw commands for one frame
///
/// Commands go to the base layer by default. Between [`begin_overlay`]
/// and [`end_overlay`] they are routed to a separate overlay list that
/// is replayed after the base layer, so overlay content paints on top
/// of widgets drawn later in tree order.
///
/// [`begin_overlay`]: Renderer::begin_overlay
/// [`end_overlay`]: Renderer::end_overlay
#[derive(Debug, Default)]
pub struct Renderer {
    commands: Vec<DrawCommand>,
    overlay: Vec<DrawCommand>,
    overlay_depth: u32,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, command: DrawCommand) {
        if self.overlay_depth > 0 {
            self.overlay.push(command);
        } else {
            self.commands.push(command);
        }
    }

    /// Fill a rectangle with a solid color
    pub fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        self.push(DrawCommand::FillRect {
            bounds,
            color,
            corner_radius: 0.0,
        });
    }

    /// Fill a rounded rectangle with a solid color
    pub fn fill_rounded_rect(&mut self, bounds: Bounds, color: Color, corner_radius: f32) {
        self.push(DrawCommand::FillRect {
            bounds,
            color,
            corner_radius,
        });
    }

    /// Stroke a rectangle outline
    pub fn stroke_rect(&mut self, bounds: Bounds, color: Color, width: f32) {
        self.push(DrawCommand::StrokeRect {
            bounds,
            color,
            width,
        });
    }

    /// Draw a text run with its top-left corner at (x, y)
    pub fn text(&mut self, content: &str, x: f32, y: f32, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            content: content.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    /// Draw a decoded image into `bounds`
    pub fn draw_image(&mut self, handle: &ImageHandle, bounds: Bounds) {
        self.push(DrawCommand::Image {
            handle: handle.clone(),
            bounds,
        });
    }

    /// Clip subsequent commands to `bounds` until the matching [`pop_clip`]
    ///
    /// [`pop_clip`]: Renderer::pop_clip
    pub fn push_clip(&mut self, bounds: Bounds) {
        self.push(DrawCommand::PushClip {
            bounds,
            corner_radius: 0.0,
        });
    }

    /// Clip subsequent commands to a rounded rect
    pub fn push_clip_rounded(&mut self, bounds: Bounds, corner_radius: f32) {
        self.push(DrawCommand::PushClip {
            bounds,
            corner_radius,
        });
    }

    /// End the innermost clip region
    pub fn pop_clip(&mut self) {
        self.push(DrawCommand::PopClip);
    }

    /// Route subsequent commands to the overlay layer
    pub fn begin_overlay(&mut self) {
        self.overlay_depth += 1;
    }

    /// Return to the base layer
    pub fn end_overlay(&mut self) {
        self.overlay_depth = self.overlay_depth.saturating_sub(1);
    }

    /// Base-layer commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Overlay commands recorded so far
    pub fn overlay_commands(&self) -> &[DrawCommand] {
        &self.overlay
    }

    /// Take all commands in paint order (base, then overlay), clearing the frame
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        let mut out = std::mem::take(&mut self.commands);
        out.append(&mut self.overlay);
        out
    }

    /// Discard all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.overlay.clear();
        self.overlay_depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::rgba(0.0, 0.5, 1.0, 0.0).to_rgba8(), [0, 127, 255, 0]);
    }

    #[test]
    fn test_overlay_commands_paint_last() {
        let mut renderer = Renderer::new();
        renderer.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        renderer.begin_overlay();
        renderer.text("on top", 1.0, 1.0, 14.0, Color::WHITE);
        renderer.end_overlay();
        renderer.fill_rect(Bounds::new(5.0, 5.0, 10.0, 10.0), Color::WHITE);

        assert_eq!(renderer.commands().len(), 2);
        assert_eq!(renderer.overlay_commands().len(), 1);

        let all = renderer.take_commands();
        assert_eq!(all.len(), 3);
        assert!(matches!(all[2], DrawCommand::Text { .. }));
        assert!(renderer.commands().is_empty());
        assert!(renderer.overlay_commands().is_empty());
    }

    #[test]
    fn test_clip_commands_pair_up() {
        let mut renderer = Renderer::new();
        renderer.push_clip(Bounds::new(0.0, 0.0, 10.0, 10.0));
        renderer.fill_rect(Bounds::new(2.0, 2.0, 4.0, 4.0), Color::BLACK);
        renderer.pop_clip();

        assert!(matches!(
            renderer.commands()[0],
            DrawCommand::PushClip { corner_radius, .. } if corner_radius == 0.0
        ));
        assert!(matches!(renderer.commands()[2], DrawCommand::PopClip));
    }

    #[test]
    fn test_unbalanced_end_overlay_is_harmless() {
        let mut renderer = Renderer::new();
        renderer.end_overlay();
        renderer.fill_rect(Bounds::ZERO, Color::BLACK);
        assert_eq!(renderer.commands().len(), 1);
        assert!(renderer.overlay_commands().is_empty());
    }
}
