//! epd-codec: photos to packed e-paper display data
//!
//! Converts a decoded RGB photo into the byte stream a 6 or 7 color e-paper
//! controller expects. The crate is pure and synchronous: no I/O, no
//! threads, no global state. Everything a conversion needs travels in a
//! [`RenderConfig`].
//!
//! # Quick Start
//!
//! ```
//! use epd_codec::{convert, DisplayMode, Orientation, PixelBuffer, RenderConfig, Rgb, Rotation};
//!
//! let photo = PixelBuffer::filled(640, 480, Rgb::new(200, 60, 40));
//! let config = RenderConfig::new(800, 480)
//!     .rotation(Rotation::Deg0)
//!     .mode(DisplayMode::Fill)
//!     .saturation(1.3)
//!     .contrast(0.9)
//!     .strength(0.8);
//!
//! let packed = convert(&photo, Orientation::Normal, &config).unwrap();
//! assert_eq!(packed.len(), 480 * 400);
//! let text = packed.to_c_array();
//! assert!(text.ends_with("};\n"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer + EXIF orientation
//!     |
//!     v
//! geometry::normalize     orientation, fit/fill, panel rotation
//!     |
//!     v
//! enhance::enhance        saturation, then contrast
//!     |
//!     v
//! quantize::quantize      Floyd-Steinberg x strength onto the palette
//!     |
//!     v
//! classify::classify      RGB -> palette index
//!     |
//!     v
//! HardwareTarget::remap   palette index -> device code
//!     |
//!     v
//! output::pack            two codes per byte, hex text
//! ```
//!
//! Each stage can also be called on its own; they share the same
//! [`CodecError`] type and never mutate their input.

pub mod classify;
pub mod color;
pub mod config;
pub mod enhance;
pub mod error;
pub mod geometry;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use classify::classify;
pub use color::{PixelBuffer, Rgb};
pub use config::RenderConfig;
pub use enhance::enhance;
pub use error::{CodecError, ConfigError, ErrorKind};
pub use geometry::{normalize, DisplayMode, Orientation, Rotation};
pub use output::{pack, unpack, IndexBuffer, PackedOutput};
pub use palette::{HardwareTarget, Palette, PaletteError, ParseColorError};
pub use pipeline::{convert, render_codes};
pub use quantize::quantize;
