//! Widget trait and related types

use crate::event::Event;
use crate::layout::{Bounds, Size};
use crate::renderer::Renderer;

/// The core widget trait that all UI elements implement
pub trait Widget<M> {
    /// Calculate the size this widget wants given available space
    fn layout(&mut self, available: Size) -> Size;

    /// Draw the widget to the renderer
    fn draw(&self, renderer: &mut Renderer, bounds: Bounds);

    /// Handle an event, optionally producing a message
    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let _ = (event, bounds);
        EventResult::None
    }
}

/// Outcome of delivering an event to a widget.
#[derive(Debug, PartialEq)]
pub enum EventResult<M> {
    /// The event was not handled.
    None,
    /// Internal widget state changed; the host should redraw.
    Redraw,
    /// The widget produced a message for the application.
    Message(M),
    /// The widget produced a message and also needs a redraw.
    RedrawWithMessage(M),
}

impl<M> EventResult<M> {
    /// Extract the message, if any, consuming the result.
    pub fn into_message(self) -> Option<M> {
        match self {
            EventResult::Message(m) | EventResult::RedrawWithMessage(m) => Some(m),
            _ => None,
        }
    }

    /// Whether the host should redraw after this event.
    pub fn needs_redraw(&self) -> bool {
        matches!(
            self,
            EventResult::Redraw | EventResult::RedrawWithMessage(_)
        )
    }
}
