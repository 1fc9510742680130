//! Lazy gallery demo
//!
//! Three gallery thumbnails stacked down a scrolling page. Each starts
//! gated behind the viewport observer and only issues its load request
//! once scrolled into view. Run with RUST_LOG=debug to watch the gates
//! open one by one.

use viewfinder::prelude::*;
use viewfinder::{DrawCommand, Image};

#[derive(Debug, Clone)]
enum Message {
    Settled(usize, ImageState),
}

const URLS: [&str; 3] = [
    "mem://gallery/far-hills.png",
    "mem://gallery/shore.png",
    "mem://gallery/dunes.png",
];

const ALTS: [&str; 3] = ["far hills", "shore", "dunes"];

fn gradient_png(width: u32, height: u32, tint: [u8; 3]) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        image::Rgba([
            (tint[0] as f32 * fx) as u8,
            (tint[1] as f32 * fy) as u8,
            (tint[2] as f32 * (1.0 - fx)) as u8,
            255,
        ])
    });
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("png encoding");
    bytes
}

fn view(index: usize, state: &ImageState) -> Image<Message> {
    viewfinder::image(state)
        .fit(ImageFit::Cover)
        .gallery(true)
        .alt(ALTS[index])
        .width(360.0)
        .height(240.0)
        .on_load(move |args| Message::Settled(index, args.state))
        .on_error(move |args| Message::Settled(index, args.state))
}

fn update(states: &mut [ImageState], message: Message) {
    match message {
        Message::Settled(index, state) => states[index] = state,
    }
}

fn describe(commands: &[DrawCommand]) -> String {
    let (mut fills, mut images, mut texts) = (0, 0, 0);
    for command in commands {
        match command {
            DrawCommand::FillRect { .. } | DrawCommand::StrokeRect { .. } => fills += 1,
            DrawCommand::Image { .. } => images += 1,
            DrawCommand::Text { .. } => texts += 1,
            _ => {}
        }
    }
    format!("{fills} fills, {images} images, {texts} texts")
}

fn main() {
    env_logger::init();

    let mut loader = MemoryLoader::new();
    loader.register(URLS[0], gradient_png(720, 480, [200, 140, 90]));
    loader.register(URLS[1], gradient_png(720, 480, [90, 160, 210]));
    loader.register(URLS[2], gradient_png(720, 480, [220, 200, 120]));

    let mut states: Vec<ImageState> = URLS
        .iter()
        .map(|url| ImageState::new(*url, true, OverlayTrigger::Always))
        .collect();

    // Page layout in world coordinates, one thumbnail per screenful
    let regions: Vec<Bounds> = (0..states.len())
        .map(|i| Bounds::new(20.0, 40.0 + i as f32 * 300.0, 360.0, 240.0))
        .collect();

    let mut observer = ViewportObserver::new();
    for (state, region) in states.iter_mut().zip(&regions) {
        state.attach(&mut observer, *region);
    }

    let mut renderer = Renderer::new();

    for step in 0..8 {
        let scroll = step as f32 * 120.0;
        let viewport = Bounds::new(0.0, scroll, 800.0, 250.0);

        // Open gates for regions that scrolled into view
        for transition in observer.process(viewport) {
            for state in states.iter_mut() {
                state.handle_intersection(&mut observer, &transition);
            }
        }

        // Issue and settle load requests synchronously
        let mut events = Vec::new();
        for (index, state) in states.iter_mut().enumerate() {
            if let Some(request) = state.take_load_request() {
                log::info!("requesting {}", request.source.url());
                events.push((index, loader.load(&request).into_event()));
            }
        }
        for (index, event) in events {
            let mut widget = view(index, &states[index]);
            widget.layout(regions[index].size());
            if let Some(message) = widget.on_event(&event, regions[index]).into_message() {
                update(&mut states, message);
            }
        }

        // Present the visible frame
        renderer.clear();
        for (index, state) in states.iter().enumerate() {
            let region = regions[index];
            let screen = Bounds::new(region.x, region.y - scroll, region.width, region.height);
            let mut widget = view(index, state);
            widget.layout(screen.size());
            widget.draw(&mut renderer, screen);
        }
        let commands = renderer.take_commands();
        log::info!("step {step} at {scroll:.0}px: {}", describe(&commands));
    }

    for state in states.iter_mut() {
        state.detach(&mut observer);
    }

    for (index, state) in states.iter().enumerate() {
        log::info!(
            "{}: loaded {}",
            ALTS[index],
            if state.is_loaded() { "yes" } else { "no" }
        );
    }
}
