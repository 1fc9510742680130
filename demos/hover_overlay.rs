//! Hover overlay demo
//!
//! One eagerly loaded badge with an overlay that appears on hover. Also
//! shows the global config hooks: custom affordance captions, a CDN-style
//! URL rewrite, and the synthetic completion for an already cached source.

use viewfinder::prelude::*;
use viewfinder::{set_image_config, set_theme, DrawCommand, Image, ImageConfig, Theme};

#[derive(Debug, Clone)]
enum Message {
    Updated(ImageState),
}

fn badge_png() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(64, 64, |x, y| {
        let dx = x as f32 - 32.0;
        let dy = y as f32 - 32.0;
        if (dx * dx + dy * dy).sqrt() < 28.0 {
            image::Rgba([40, 180, 120, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("png encoding");
    bytes
}

fn view(state: &ImageState) -> Image<Message> {
    viewfinder::image(state)
        .shape(ImageShape::Round)
        .fit(ImageFit::Contain)
        .alt("status badge")
        .width(96.0)
        .height(96.0)
        .overlay(viewfinder::text("LIVE").size(18.0))
        .on_load(|args| Message::Updated(args.state))
        .on_error(|args| Message::Updated(args.state))
        .on_state_change(Message::Updated)
}

fn dispatch(state: &mut ImageState, event: &Event, bounds: Bounds) {
    let mut widget = view(state);
    widget.layout(bounds.size());
    if let Some(Message::Updated(next)) = widget.on_event(event, bounds).into_message() {
        *state = next;
    }
}

fn overlay_texts(state: &ImageState, bounds: Bounds) -> usize {
    let mut widget = view(state);
    widget.layout(bounds.size());
    let mut renderer = Renderer::new();
    widget.draw(&mut renderer, bounds);
    renderer
        .overlay_commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count()
}

fn main() {
    env_logger::init();

    let config = ImageConfig {
        loading_text: "Fetching preview".to_string(),
        error_text: "Preview unavailable".to_string(),
        replace_source: None,
    }
    .with_replace_source(|source| format!("mem://cdn/{}", source.url()));
    set_image_config(config).expect("config installed before first use");
    set_theme(Theme::light()).expect("theme installed before first use");

    let mut loader = MemoryLoader::new();
    loader.register("mem://cdn/badge.png", badge_png());

    let bounds = Bounds::new(40.0, 40.0, 96.0, 96.0);
    let mut state = ImageState::new("badge.png", false, OverlayTrigger::Hover);

    // The plain URL goes through the rewrite hook
    let request = state.take_load_request().expect("eager state requests immediately");
    log::info!("fetching {}", request.source.url());
    dispatch(&mut state, &loader.load(&request).into_event(), bounds);
    log::info!("badge phase: {:?}", state.phase());

    // Overlay follows the pointer
    log::info!("overlay texts before hover: {}", overlay_texts(&state, bounds));
    dispatch(
        &mut state,
        &Event::MouseMove {
            position: (60.0, 60.0),
        },
        bounds,
    );
    log::info!("overlay texts while hovering: {}", overlay_texts(&state, bounds));
    dispatch(
        &mut state,
        &Event::MouseMove {
            position: (400.0, 400.0),
        },
        bounds,
    );
    log::info!("overlay texts after leaving: {}", overlay_texts(&state, bounds));

    // A second state for the same source completes from cache,
    // without issuing another request
    let mut twin = ImageState::new("badge.png", false, OverlayTrigger::Always);
    if let Some(event) = twin.cached_completion(&loader) {
        dispatch(&mut twin, &event, bounds);
    }
    log::info!(
        "twin loaded from cache: {} (pending request: {})",
        twin.is_loaded(),
        twin.take_load_request().is_some()
    );

    // Swapping to a missing source settles as failed
    state.sync_source("missing.png");
    if let Some(request) = state.take_load_request() {
        dispatch(&mut state, &loader.load(&request).into_event(), bounds);
    }
    log::info!("after swap to missing source: {:?}", state.phase());

    let mut widget = view(&state);
    widget.layout(bounds.size());
    let mut renderer = Renderer::new();
    widget.draw(&mut renderer, bounds);
    let caption = renderer.commands().iter().find_map(|c| match c {
        DrawCommand::Text { content, .. } => Some(content.clone()),
        _ => None,
    });
    log::info!("error affordance caption: {:?}", caption);
}
