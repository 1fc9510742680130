//! viewfinder - deferred image display widgets
//!
//! A callback-based image widget with caller-owned state. Lazy sources
//! stay gated behind a viewport observer until first seen, loads settle
//! through keyed events so replaced sources cannot clobber each other,
//! and an overlay slot toggles with pointer hover.

mod callback;
mod config;
mod constants;
mod element;
mod error;
mod event;
mod fit;
mod icon;
mod image;
mod layout;
mod loader;
mod observer;
mod renderer;
mod source;
mod state;
mod theme;
mod widget;
mod widgets;

pub use callback::Callback;
pub use config::{
    image_config, resolve_source_url, set_image_config, ConfigError, ImageConfig, ReplaceSource,
};
pub use element::Element;
pub use error::{LoadError, Result};
pub use event::{Event, MouseButton};
pub use fit::{fitted_bounds, ImageFit, ImagePosition};
pub use icon::{get_icon, icons, rasterize_svg, IconCache};
pub use image::ImageHandle;
pub use layout::{Bounds, Length, Size};
pub use loader::{
    select_source_url, FileLoader, LoadRequest, LoadResult, MemoryLoader, ResourceLoader,
};
pub use observer::{Intersection, ObservationId, ViewportObserver};
pub use renderer::{Color, DrawCommand, Renderer};
pub use source::{Source, SourceKey, SourceVariant};
pub use state::{DisplayPhase, ImageState, OverlayTrigger};
pub use theme::{current_theme, set_theme, Theme};
pub use widget::{EventResult, Widget};

// Re-export widgets
pub use widgets::{image, text, ErrorArgs, Image, ImageShape, LoadArgs, Text};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::Element;
    pub use crate::event::Event;
    pub use crate::fit::{ImageFit, ImagePosition};
    pub use crate::layout::{Bounds, Length, Size};
    pub use crate::loader::{FileLoader, LoadRequest, MemoryLoader, ResourceLoader};
    pub use crate::observer::ViewportObserver;
    pub use crate::renderer::{Color, Renderer};
    pub use crate::source::Source;
    pub use crate::state::{DisplayPhase, ImageState, OverlayTrigger};
    pub use crate::widget::{EventResult, Widget};
    pub use crate::widgets::{image, text, ImageShape};
}

#[cfg(test)]
mod tests {
    // The prelude alone must be enough to wire a loader to a widget,
    // which is exactly what the demos do.
    #[test]
    fn test_prelude_covers_the_demo_surface() {
        use crate::prelude::*;

        let mut loader = MemoryLoader::new();
        let _files = FileLoader::new();

        let mut state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let request = state.take_load_request().unwrap();
        let event = loader.load(&request).into_event();
        assert!(matches!(event, Event::SourceFailed { .. }));

        let mut widget = image::<()>(&state).fit(ImageFit::Contain);
        widget.layout(Size::new(64.0, 64.0));
    }
}
