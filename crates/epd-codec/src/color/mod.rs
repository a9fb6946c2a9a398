//! Color and pixel buffer types

mod buffer;
mod rgb;

pub use buffer::PixelBuffer;
pub use rgb::Rgb;
