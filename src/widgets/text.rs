//! Text widget

use crate::constants::{char_width, line_height, DEFAULT_FONT_SIZE};
use crate::layout::{Bounds, Length, Size};
use crate::renderer::{Color, Renderer};
use crate::theme::current_theme;
use crate::widget::Widget;

/// Create a text widget
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}

/// A text display widget
pub struct Text {
    content: String,
    size: f32,
    color: Option<Color>,
    width: Length,
}

impl Text {
    /// Create a new text widget
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size: DEFAULT_FONT_SIZE,
            color: None,
            width: Length::Shrink,
        }
    }

    /// Set the font size
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the text color, overriding the theme
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the width
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Approximate text dimensions from the font size
    fn measure(&self) -> Size {
        Size::new(
            self.content.chars().count() as f32 * char_width(self.size),
            line_height(self.size),
        )
    }
}

impl<M> Widget<M> for Text {
    fn layout(&mut self, available: Size) -> Size {
        let content_size = self.measure();
        Size::new(
            self.width.resolve(available.width, content_size.width),
            content_size.height,
        )
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let color = self.color.unwrap_or(current_theme().affordance_text);
        renderer.text(&self.content, bounds.x, bounds.y, self.size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::widget::Widget;

    #[test]
    fn test_text_measures_by_character_count() {
        let mut short: Text = text("ab");
        let mut long: Text = text("abcdef");
        let available = Size::new(500.0, 100.0);
        let short_size = Widget::<()>::layout(&mut short, available);
        let long_size = Widget::<()>::layout(&mut long, available);
        assert!(long_size.width > short_size.width);
        assert_eq!(short_size.height, long_size.height);
    }

    #[test]
    fn test_text_records_a_draw_command() {
        let widget = text("hello").size(18.0).color(Color::WHITE);
        let mut renderer = Renderer::new();
        Widget::<()>::draw(&widget, &mut renderer, Bounds::new(5.0, 6.0, 50.0, 20.0));
        match &renderer.commands()[0] {
            DrawCommand::Text {
                content,
                x,
                y,
                size,
                color,
            } => {
                assert_eq!(content, "hello");
                assert_eq!((*x, *y), (5.0, 6.0));
                assert_eq!(*size, 18.0);
                assert_eq!(*color, Color::WHITE);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
