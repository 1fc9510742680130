//! Image display widget
//!
//! Renders caller-owned [`ImageState`] and routes pointer and load
//! events back into it. What gets drawn follows the state's phase:
//! the reserved box while gated, a loading affordance while fetching,
//! the fitted pixels once ready, an error affordance on failure. Slots
//! replace the default affordances, and an overlay slot paints above
//! everything while the state says it is visible.

use serde::{Deserialize, Serialize};

use crate::callback::Callback;
use crate::config::image_config;
use crate::constants::{
    char_width, line_height, AFFORDANCE_ICON_SIZE, AFFORDANCE_SPACING, DEFAULT_FONT_SIZE,
    DEFAULT_IMAGE_SIZE, GALLERY_SHADOW_HEIGHT, ROUND_RADIUS,
};
use crate::element::Element;
use crate::event::Event;
use crate::fit::{fitted_bounds, ImageFit, ImagePosition};
use crate::icon::{get_icon, icons};
use crate::image::ImageHandle;
use crate::layout::{Bounds, Length, Size};
use crate::renderer::Renderer;
use crate::source::SourceKey;
use crate::state::{DisplayPhase, ImageState};
use crate::theme::current_theme;
use crate::widget::{EventResult, Widget};

/// Outline of the displayed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageShape {
    #[default]
    Square,
    Round,
    Circle,
}

impl ImageShape {
    /// Corner radius for a frame of the given bounds
    pub fn corner_radius(self, bounds: Bounds) -> f32 {
        match self {
            ImageShape::Square => 0.0,
            ImageShape::Round => ROUND_RADIUS,
            ImageShape::Circle => bounds.width.min(bounds.height) / 2.0,
        }
    }
}

/// Payload of [`Image::on_load`]
#[derive(Debug, Clone)]
pub struct LoadArgs {
    pub key: SourceKey,
    pub handle: ImageHandle,
    /// State after the completion was applied
    pub state: ImageState,
}

/// Payload of [`Image::on_error`]
#[derive(Debug, Clone)]
pub struct ErrorArgs {
    pub key: SourceKey,
    pub reason: String,
    /// State after the failure was applied
    pub state: ImageState,
}

/// Create an image widget from caller-owned state
pub fn image<M>(state: &ImageState) -> Image<M> {
    Image::new(state)
}

/// Image display widget
pub struct Image<M> {
    state: ImageState,
    fit: ImageFit,
    position: ImagePosition,
    shape: ImageShape,
    gallery: bool,
    alt: String,
    width: Length,
    height: Length,
    placeholder: Option<Element<M>>,
    loading_slot: Option<Element<M>>,
    error_slot: Option<Element<M>>,
    overlay: Option<Element<M>>,
    on_load: Callback<LoadArgs, M>,
    on_error: Callback<ErrorArgs, M>,
    on_state_change: Callback<ImageState, M>,
}

impl<M> Image<M> {
    /// Create a new image widget, cloning the given state
    pub fn new(state: &ImageState) -> Self {
        Self {
            state: state.clone(),
            fit: ImageFit::default(),
            position: ImagePosition::default(),
            shape: ImageShape::default(),
            gallery: false,
            alt: String::new(),
            width: Length::Shrink,
            height: Length::Shrink,
            placeholder: None,
            loading_slot: None,
            error_slot: None,
            overlay: None,
            on_load: Callback::none(),
            on_error: Callback::none(),
            on_state_change: Callback::none(),
        }
    }

    /// How pixels map onto the frame
    pub fn fit(mut self, fit: ImageFit) -> Self {
        self.fit = fit;
        self
    }

    /// Which part stays visible when pixels overflow the frame
    pub fn position(mut self, position: ImagePosition) -> Self {
        self.position = position;
        self
    }

    /// Frame outline
    pub fn shape(mut self, shape: ImageShape) -> Self {
        self.shape = shape;
        self
    }

    /// Draw the gallery shadow band along the bottom edge
    pub fn gallery(mut self, gallery: bool) -> Self {
        self.gallery = gallery;
        self
    }

    /// Descriptive text used in logs when the source misbehaves
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    /// Set the width
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the height
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Content drawn beneath everything else, in every phase
    pub fn placeholder(mut self, widget: impl Widget<M> + 'static) -> Self {
        self.placeholder = Some(Element::new(widget));
        self
    }

    /// Replace the default loading affordance
    pub fn loading(mut self, widget: impl Widget<M> + 'static) -> Self {
        self.loading_slot = Some(Element::new(widget));
        self
    }

    /// Replace the default error affordance
    pub fn error(mut self, widget: impl Widget<M> + 'static) -> Self {
        self.error_slot = Some(Element::new(widget));
        self
    }

    /// Content painted above the image while the overlay is visible
    pub fn overlay(mut self, widget: impl Widget<M> + 'static) -> Self {
        self.overlay = Some(Element::new(widget));
        self
    }

    /// Message produced when the current source finishes loading
    pub fn on_load<F: Fn(LoadArgs) -> M + 'static>(mut self, f: F) -> Self {
        self.on_load = Callback::new(f);
        self
    }

    /// Message produced when the current source fails
    pub fn on_error<F: Fn(ErrorArgs) -> M + 'static>(mut self, f: F) -> Self {
        self.on_error = Callback::new(f);
        self
    }

    /// Message carrying updated state after pointer driven changes
    pub fn on_state_change<F: Fn(ImageState) -> M + 'static>(mut self, f: F) -> Self {
        self.on_state_change = Callback::new(f);
        self
    }

    /// Descriptive text set with [`alt`](Image::alt)
    pub fn alt_text(&self) -> &str {
        &self.alt
    }

    fn display_name(&self) -> &str {
        if self.alt.is_empty() {
            self.state.source().url()
        } else {
            &self.alt
        }
    }

    fn pointer_result(&mut self, inside: bool) -> EventResult<M> {
        if !self.state.set_pointer_inside(inside) {
            return EventResult::None;
        }
        self.state_change_result()
    }

    fn state_change_result(&mut self) -> EventResult<M> {
        match self.on_state_change.call(self.state.clone()) {
            Some(message) => EventResult::RedrawWithMessage(message),
            None => EventResult::Redraw,
        }
    }

    fn draw_affordance(
        &self,
        renderer: &mut Renderer,
        bounds: Bounds,
        radius: f32,
        slot: &Option<Element<M>>,
        icon_name: &str,
        icon_data: &[u8],
        caption: &str,
    ) {
        let theme = current_theme();
        renderer.fill_rounded_rect(bounds, theme.affordance_bg, radius);

        if let Some(slot) = slot {
            let size = slot.cached_size();
            let slot_bounds = Bounds::new(
                bounds.x + (bounds.width - size.width) / 2.0,
                bounds.y + (bounds.height - size.height) / 2.0,
                size.width,
                size.height,
            );
            slot.draw(renderer, slot_bounds);
            return;
        }

        let caption_height = line_height(DEFAULT_FONT_SIZE);
        let total = AFFORDANCE_ICON_SIZE + AFFORDANCE_SPACING + caption_height;
        let top = bounds.y + (bounds.height - total) / 2.0;

        let tint = theme.affordance_icon.to_rgba8();
        if let Some(icon) = get_icon(icon_name, icon_data, AFFORDANCE_ICON_SIZE as u32, tint) {
            let icon_bounds = Bounds::new(
                bounds.x + (bounds.width - AFFORDANCE_ICON_SIZE) / 2.0,
                top,
                AFFORDANCE_ICON_SIZE,
                AFFORDANCE_ICON_SIZE,
            );
            renderer.draw_image(&icon, icon_bounds);
        }

        let caption_width = caption.chars().count() as f32 * char_width(DEFAULT_FONT_SIZE);
        renderer.text(
            caption,
            bounds.x + (bounds.width - caption_width) / 2.0,
            top + AFFORDANCE_ICON_SIZE + AFFORDANCE_SPACING,
            DEFAULT_FONT_SIZE,
            theme.affordance_text,
        );
    }
}

impl<M> Widget<M> for Image<M> {
    fn layout(&mut self, available: Size) -> Size {
        let intrinsic = match self.state.handle() {
            Some(handle) => Size::new(handle.width as f32, handle.height as f32),
            None => Size::new(DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE),
        };
        let size = Size::new(
            self.width.resolve(available.width, intrinsic.width),
            self.height.resolve(available.height, intrinsic.height),
        );

        for slot in [
            &mut self.placeholder,
            &mut self.loading_slot,
            &mut self.error_slot,
            &mut self.overlay,
        ]
        .into_iter()
        .flatten()
        {
            slot.layout(size);
        }

        size
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let theme = current_theme();
        let radius = self.shape.corner_radius(bounds);

        // Placeholder content sits beneath every phase
        if let Some(placeholder) = &self.placeholder {
            placeholder.draw(renderer, bounds);
        }

        match self.state.phase() {
            DisplayPhase::Placeholder => {
                renderer.fill_rounded_rect(bounds, theme.placeholder_bg, radius);
                renderer.stroke_rect(bounds, theme.border, 1.0);
            }
            DisplayPhase::Loading => {
                self.draw_affordance(
                    renderer,
                    bounds,
                    radius,
                    &self.loading_slot,
                    "image",
                    icons::IMAGE,
                    &image_config().loading_text,
                );
            }
            DisplayPhase::Failed => {
                self.draw_affordance(
                    renderer,
                    bounds,
                    radius,
                    &self.error_slot,
                    "image-broken",
                    icons::IMAGE_BROKEN,
                    &image_config().error_text,
                );
            }
            DisplayPhase::Ready => {
                if let Some(handle) = self.state.handle() {
                    let intrinsic = Size::new(handle.width as f32, handle.height as f32);
                    let fitted = fitted_bounds(intrinsic, bounds, self.fit, self.position);
                    let overflows = fitted.x < bounds.x
                        || fitted.y < bounds.y
                        || fitted.right() > bounds.right()
                        || fitted.bottom() > bounds.bottom();
                    let clip = radius > 0.0 || overflows;
                    if clip {
                        renderer.push_clip_rounded(bounds, radius);
                    }
                    renderer.draw_image(handle, fitted);
                    if clip {
                        renderer.pop_clip();
                    }
                }
            }
        }

        if self.gallery {
            let height = GALLERY_SHADOW_HEIGHT.min(bounds.height);
            let band = Bounds::new(bounds.x, bounds.bottom() - height, bounds.width, height);
            if radius > 0.0 {
                renderer.push_clip_rounded(bounds, radius);
                renderer.fill_rect(band, theme.gallery_shadow);
                renderer.pop_clip();
            } else {
                renderer.fill_rect(band, theme.gallery_shadow);
            }
        }

        if self.state.overlay_visible() {
            if let Some(overlay) = &self.overlay {
                renderer.begin_overlay();
                overlay.draw(renderer, bounds);
                renderer.end_overlay();
            }
        }
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let own = match event {
            Event::MouseMove { position } => {
                self.pointer_result(bounds.contains(position.0, position.1))
            }
            Event::CursorLeft => self.pointer_result(false),
            Event::SourceLoaded { key, handle } => {
                if !self.state.finish_load(*key, handle.clone()) {
                    EventResult::None
                } else {
                    log::debug!("Image ready: {}", self.display_name());
                    if self.on_load.is_some() {
                        let args = LoadArgs {
                            key: *key,
                            handle: handle.clone(),
                            state: self.state.clone(),
                        };
                        match self.on_load.call(args) {
                            Some(message) => EventResult::RedrawWithMessage(message),
                            None => EventResult::Redraw,
                        }
                    } else {
                        self.state_change_result()
                    }
                }
            }
            Event::SourceFailed { key, reason } => {
                if !self.state.fail_load(*key) {
                    EventResult::None
                } else {
                    log::warn!("Image failed: {} ({})", self.display_name(), reason);
                    if self.on_error.is_some() {
                        let args = ErrorArgs {
                            key: *key,
                            reason: reason.clone(),
                            state: self.state.clone(),
                        };
                        match self.on_error.call(args) {
                            Some(message) => EventResult::RedrawWithMessage(message),
                            None => EventResult::Redraw,
                        }
                    } else {
                        self.state_change_result()
                    }
                }
            }
            _ => EventResult::None,
        };

        if !matches!(own, EventResult::None) {
            return own;
        }

        // Interactive overlay content gets events it did not shadow
        if self.state.overlay_visible() {
            if let Some(overlay) = &mut self.overlay {
                return overlay.on_event(event, bounds);
            }
        }

        EventResult::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::state::OverlayTrigger;
    use crate::widgets::text::text;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Loaded(SourceKey),
        Failed(String),
        Overlay(bool),
        Tapped,
    }

    fn handle() -> ImageHandle {
        ImageHandle::from_rgba8(vec![0; 8 * 4 * 4], 8, 4)
    }

    fn frame() -> Bounds {
        Bounds::new(0.0, 0.0, 200.0, 100.0)
    }

    fn laid_out(mut widget: Image<Msg>) -> Image<Msg> {
        widget.layout(Size::new(frame().width, frame().height));
        widget
    }

    #[test]
    fn test_load_event_fires_callback() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state).on_load(|args| Msg::Loaded(args.key));

        let result = widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        assert_eq!(result, EventResult::RedrawWithMessage(Msg::Loaded(key)));
    }

    #[test]
    fn test_stale_load_event_is_ignored() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let other_key = crate::source::Source::new("b.png").key();
        let mut widget: Image<Msg> = image(&state).on_load(|args| Msg::Loaded(args.key));

        let result = widget.on_event(
            &Event::SourceLoaded {
                key: other_key,
                handle: handle(),
            },
            frame(),
        );
        assert_eq!(result, EventResult::None);
    }

    #[test]
    fn test_error_event_fires_callback() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state).on_error(|args| Msg::Failed(args.reason));

        let result = widget.on_event(
            &Event::SourceFailed {
                key,
                reason: "not found".to_string(),
            },
            frame(),
        );
        assert_eq!(
            result,
            EventResult::RedrawWithMessage(Msg::Failed("not found".to_string()))
        );
    }

    #[test]
    fn test_load_without_callback_still_redraws() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state);

        let result = widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        assert_eq!(result, EventResult::Redraw);
    }

    #[test]
    fn test_hover_flips_overlay_and_reports_state() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Hover);
        let mut widget: Image<Msg> =
            image(&state).on_state_change(|s| Msg::Overlay(s.overlay_visible()));

        let entered = widget.on_event(
            &Event::MouseMove {
                position: (10.0, 10.0),
            },
            frame(),
        );
        assert_eq!(entered, EventResult::RedrawWithMessage(Msg::Overlay(true)));

        // Still inside, no edge
        let moved = widget.on_event(
            &Event::MouseMove {
                position: (20.0, 20.0),
            },
            frame(),
        );
        assert_eq!(moved, EventResult::None);

        let left = widget.on_event(
            &Event::MouseMove {
                position: (500.0, 500.0),
            },
            frame(),
        );
        assert_eq!(left, EventResult::RedrawWithMessage(Msg::Overlay(false)));
    }

    #[test]
    fn test_cursor_left_counts_as_leaving() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Hover);
        let mut widget: Image<Msg> =
            image(&state).on_state_change(|s| Msg::Overlay(s.overlay_visible()));

        widget.on_event(
            &Event::MouseMove {
                position: (10.0, 10.0),
            },
            frame(),
        );
        let left = widget.on_event(&Event::CursorLeft, frame());
        assert_eq!(left, EventResult::RedrawWithMessage(Msg::Overlay(false)));
    }

    #[test]
    fn test_always_trigger_ignores_pointer() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let mut widget: Image<Msg> =
            image(&state).on_state_change(|s| Msg::Overlay(s.overlay_visible()));

        let result = widget.on_event(
            &Event::MouseMove {
                position: (10.0, 10.0),
            },
            frame(),
        );
        assert_eq!(result, EventResult::None);
    }

    #[test]
    fn test_gated_state_draws_reserved_box_only() {
        let state = ImageState::new("a.png", true, OverlayTrigger::Always);
        let widget = laid_out(image(&state));

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        assert!(matches!(
            renderer.commands()[0],
            DrawCommand::FillRect { .. }
        ));
        assert!(!renderer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. })));
    }

    #[test]
    fn test_loading_state_draws_caption() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let widget = laid_out(image(&state));

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        assert!(renderer.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { content, .. } if content == "Image is loading"
        )));
    }

    #[test]
    fn test_ready_state_records_the_image() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state).fit(ImageFit::Fill);
        widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        let widget = laid_out(widget);

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        let drawn = renderer.commands().iter().find_map(|c| match c {
            DrawCommand::Image { bounds, .. } => Some(*bounds),
            _ => None,
        });
        assert_eq!(drawn, Some(frame()));
    }

    #[test]
    fn test_failed_state_suppresses_the_image() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state);
        widget.on_event(
            &Event::SourceFailed {
                key,
                reason: "gone".to_string(),
            },
            frame(),
        );
        let widget = laid_out(widget);

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        // Only the affordance icon may appear, never frame filling pixels
        for command in renderer.commands() {
            if let DrawCommand::Image { bounds, .. } = command {
                assert!(bounds.width <= AFFORDANCE_ICON_SIZE);
            }
        }
        assert!(renderer.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { content, .. } if content == "Image load failed"
        )));
    }

    #[test]
    fn test_gallery_shadow_sits_at_the_bottom() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state).gallery(true);
        widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        let widget = laid_out(widget);

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        let shadow = current_theme().gallery_shadow;
        let band = renderer.commands().iter().find_map(|c| match c {
            DrawCommand::FillRect { bounds, color, .. } if *color == shadow => Some(*bounds),
            _ => None,
        });
        let band = band.unwrap();
        assert_eq!(band.bottom(), frame().bottom());
        assert_eq!(band.height, GALLERY_SHADOW_HEIGHT);
    }

    #[test]
    fn test_circle_shape_clips_to_rounded_region() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state).shape(ImageShape::Circle);
        widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        let widget = laid_out(widget);

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());

        let radius = renderer.commands().iter().find_map(|c| match c {
            DrawCommand::PushClip { corner_radius, .. } => Some(*corner_radius),
            _ => None,
        });
        assert_eq!(radius, Some(50.0));
    }

    #[test]
    fn test_overlay_drawn_only_when_visible() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Hover);
        let mut widget: Image<Msg> = image(&state).overlay(text("tag"));
        widget.layout(Size::new(frame().width, frame().height));

        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());
        assert!(renderer.overlay_commands().is_empty());

        widget.on_event(
            &Event::MouseMove {
                position: (10.0, 10.0),
            },
            frame(),
        );
        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, frame());
        assert!(renderer.overlay_commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { content, .. } if content == "tag"
        )));
    }

    #[test]
    fn test_visible_overlay_receives_unhandled_events() {
        use crate::event::MouseButton;

        struct Tap;

        impl Widget<Msg> for Tap {
            fn layout(&mut self, _available: Size) -> Size {
                Size::new(40.0, 20.0)
            }

            fn draw(&self, _renderer: &mut Renderer, _bounds: Bounds) {}

            fn on_event(&mut self, event: &Event, _bounds: Bounds) -> EventResult<Msg> {
                match event {
                    Event::MouseRelease { .. } => EventResult::Message(Msg::Tapped),
                    _ => EventResult::None,
                }
            }
        }

        let state = ImageState::new("a.png", false, OverlayTrigger::Hover);
        let mut widget: Image<Msg> = image(&state).overlay(Tap);

        let press = Event::MousePress {
            button: MouseButton::Left,
            position: (10.0, 10.0),
        };
        let release = Event::MouseRelease {
            button: MouseButton::Left,
            position: (10.0, 10.0),
        };
        // Hidden overlay sees nothing
        assert_eq!(widget.on_event(&release, frame()), EventResult::None);

        widget.on_event(
            &Event::MouseMove {
                position: (10.0, 10.0),
            },
            frame(),
        );
        // The tap completes on release, not press
        assert_eq!(widget.on_event(&press, frame()), EventResult::None);
        assert_eq!(
            widget.on_event(&release, frame()),
            EventResult::Message(Msg::Tapped)
        );
    }

    #[test]
    fn test_lazy_image_full_lifecycle() {
        use crate::loader::{MemoryLoader, ResourceLoader};
        use crate::observer::ViewportObserver;

        let mut loader = MemoryLoader::new();
        let png = {
            let img = image::RgbaImage::from_pixel(6, 3, image::Rgba([9, 9, 9, 255]));
            let mut bytes = Vec::new();
            let mut cursor = std::io::Cursor::new(&mut bytes);
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut cursor, image::ImageFormat::Png)
                .unwrap();
            bytes
        };
        loader.register("mem://hero.png", png);

        let mut observer = ViewportObserver::new();
        let mut state = ImageState::new("mem://hero.png", true, OverlayTrigger::Always);
        let region = Bounds::new(0.0, 400.0, 200.0, 100.0);
        state.attach(&mut observer, region);

        // Offscreen, nothing happens
        let viewport = Bounds::new(0.0, 0.0, 300.0, 300.0);
        assert!(observer.process(viewport).is_empty());
        assert!(state.take_load_request().is_none());

        // Scrolling the region into view opens the gate
        let scrolled = Bounds::new(0.0, 350.0, 300.0, 300.0);
        let transitions = observer.process(scrolled);
        assert_eq!(transitions.len(), 1);
        assert!(state.handle_intersection(&mut observer, &transitions[0]));
        assert!(observer.is_empty());

        // The request settles through the widget exactly once
        let request = state.take_load_request().unwrap();
        let event = loader.load(&request).into_event();
        let mut widget: Image<Msg> = image(&state).on_load(|args| Msg::Loaded(args.key));
        let first = widget.on_event(&event, region).into_message();
        assert_eq!(first, Some(Msg::Loaded(state.source_key())));
        let replay = loader.load(&request).into_event();
        assert_eq!(widget.on_event(&replay, region), EventResult::None);

        // And the frame now shows the pixels
        widget.layout(region.size());
        let mut renderer = Renderer::new();
        widget.draw(&mut renderer, region);
        assert!(renderer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. })));
    }

    #[test]
    fn test_layout_uses_intrinsic_size_once_loaded() {
        let state = ImageState::new("a.png", false, OverlayTrigger::Always);
        let key = state.source_key();
        let mut widget: Image<Msg> = image(&state);

        let before = widget.layout(Size::new(1000.0, 1000.0));
        assert_eq!(before, Size::new(DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE));

        widget.on_event(&Event::SourceLoaded { key, handle: handle() }, frame());
        let after = widget.layout(Size::new(1000.0, 1000.0));
        assert_eq!(after, Size::new(8.0, 4.0));

        let fixed = image::<Msg>(&state).width(64.0).height(32.0);
        let mut fixed = fixed;
        assert_eq!(
            fixed.layout(Size::new(1000.0, 1000.0)),
            Size::new(64.0, 32.0)
        );
    }
}
