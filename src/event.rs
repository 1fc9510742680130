//! Events that widgets respond to.
//!
//! Pointer and window events come from the embedding host; resource events
//! (`SourceLoaded`/`SourceFailed`) are produced by a [`crate::loader::ResourceLoader`]
//! answering a load request and are routed to widgets like any other event.

use crate::image::ImageHandle;
use crate::source::SourceKey;

/// Events that widgets can respond to.
#[derive(Debug, Clone)]
pub enum Event {
    /// Mouse moved.
    MouseMove { position: (f32, f32) },
    /// Mouse button pressed.
    MousePress {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Mouse button released.
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
    },
    /// The cursor left the host window entirely.
    CursorLeft,
    /// A requested image source finished decoding.
    SourceLoaded {
        key: SourceKey,
        handle: ImageHandle,
    },
    /// A requested image source could not be loaded.
    SourceFailed { key: SourceKey, reason: String },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}
