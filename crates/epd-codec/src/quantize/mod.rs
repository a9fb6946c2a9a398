//! Palette quantization with error diffusion
//!
//! Every output pixel is exactly one palette color. The difference between
//! the wanted color and the chosen one, scaled by the dithering strength, is
//! pushed onto unvisited neighbors with the Floyd-Steinberg kernel.
//!
//! Pixels are visited in raster order, left to right on every row. Each
//! decision depends on the error left by all earlier pixels, so one image
//! is always processed sequentially.

mod kernel;

pub use kernel::{Kernel, FLOYD_STEINBERG};

use crate::color::{PixelBuffer, Rgb};
use crate::error::{CodecError, ConfigError};
use crate::palette::Palette;

/// Sliding window of accumulated error for the current and upcoming rows.
///
/// `rows[0]` is the row being processed; [`ErrorBuffer::advance_row`]
/// rotates the window down by one row.
#[derive(Debug, Clone)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// `row_depth` is the kernel's `max_dy + 1`.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Out-of-bounds targets are ignored: error leaving the image is lost.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Reduce `image` to `palette` colors, diffusing `strength` of the error.
///
/// With `strength == 0.0` this is plain nearest-color mapping.
///
/// # Errors
///
/// [`ConfigError::InvalidStrength`] unless `0.0 <= strength <= 1.0`.
pub fn quantize(
    image: &PixelBuffer,
    palette: &Palette,
    strength: f32,
) -> Result<PixelBuffer, CodecError> {
    if !(0.0..=1.0).contains(&strength) {
        return Err(ConfigError::InvalidStrength(strength).into());
    }
    Ok(diffuse(image, palette, strength, &FLOYD_STEINBERG))
}

fn diffuse(image: &PixelBuffer, palette: &Palette, strength: f32, kernel: &Kernel) -> PixelBuffer {
    let (width, height) = (image.width(), image.height());
    let mut output: Vec<Rgb> = Vec::with_capacity(width * height);
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let scale = strength / kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let src = image.get(x, y).to_f32();
            let acc = error_buf.get_accumulated(x);
            let wanted = [
                (src[0] + acc[0]).clamp(0.0, 255.0),
                (src[1] + acc[1]).clamp(0.0, 255.0),
                (src[2] + acc[2]).clamp(0.0, 255.0),
            ];

            let (idx, _) = palette.find_nearest(wanted);
            let chosen = palette.color(idx);
            output.push(chosen);

            if strength == 0.0 {
                continue;
            }

            let target = chosen.to_f32();
            let error = [
                wanted[0] - target[0],
                wanted[1] - target[1],
                wanted[2] - target[2],
            ];
            spread(&mut error_buf, kernel, x, error, scale);
        }
        error_buf.advance_row();
    }

    tracing::debug!(width, height, strength, colors = palette.len(), "quantized");
    PixelBuffer::from_parts(width, height, output)
}

/// Push `error` from column `x` of the current row onto the kernel's
/// neighbors, each share being `weight * scale`.
fn spread(error_buf: &mut ErrorBuffer, kernel: &Kernel, x: usize, error: [f32; 3], scale: f32) {
    for &(dx, dy, weight) in kernel.entries {
        let nx = x as i32 + dx;
        if nx < 0 {
            continue;
        }
        let w = weight as f32 * scale;
        error_buf.add_error(
            nx as usize,
            dy as usize,
            [error[0] * w, error[1] * w, error[2] * w],
        );
    }
}
