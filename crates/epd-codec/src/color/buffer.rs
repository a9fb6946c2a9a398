//! Owned RGB pixel grid passed between pipeline stages.

use super::Rgb;
use crate::error::CodecError;

/// A row-major grid of [`Rgb`] pixels.
///
/// Stages take a buffer by reference and return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Wrap existing pixels.
    ///
    /// # Errors
    ///
    /// [`CodecError::Decode`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, CodecError> {
        if pixels.len() != width * height {
            return Err(CodecError::Decode(format!(
                "expected {} pixels for {}x{}, got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Caller guarantees `pixels.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Build from interleaved `R, G, B` bytes as produced by image decoders.
    pub fn from_raw_rgb(width: usize, height: usize, bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != width * height * 3 {
            return Err(CodecError::Decode(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                width * height * 3,
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn to_raw_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the buffer has no pixels in either dimension.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Build a `width x height` buffer where each output pixel is read from
    /// the source coordinate returned by `source`.
    pub(crate) fn remap<F>(&self, width: usize, height: usize, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = source(x, y);
                pixels.push(self.get(sx, sy));
            }
        }
        Self::from_parts(width, height, pixels)
    }

    /// Copy a `width x height` window starting at (`x0`, `y0`).
    pub(crate) fn crop(&self, x0: usize, y0: usize, width: usize, height: usize) -> Self {
        self.remap(width, height, |x, y| (x0 + x, y0 + y))
    }

    /// Copy `other` onto this buffer with its top-left corner at (`x0`, `y0`).
    /// Pixels falling outside this buffer are dropped.
    pub(crate) fn paste(&mut self, other: &PixelBuffer, x0: usize, y0: usize) {
        for y in 0..other.height.min(self.height.saturating_sub(y0)) {
            let w = other.width.min(self.width.saturating_sub(x0));
            let dst = (y0 + y) * self.width + x0;
            self.pixels[dst..dst + w].copy_from_slice(&other.row(y)[..w]);
        }
    }

    pub(crate) fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Rgb) -> Rgb,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }
}
