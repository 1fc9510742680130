// Widget implementations

mod image;
mod text;

pub use image::{image, ErrorArgs, Image, ImageShape, LoadArgs};
pub use text::{text, Text};
