//! Geometric normalization: orientation, fitting and rotation
//!
//! Brings an arbitrary decoded photo onto the exact pixel grid of the panel:
//!
//! 1. undo the camera's EXIF orientation,
//! 2. fit or cover the working canvas (width and height swapped when the
//!    panel is mounted at 90° or 270°),
//! 3. rotate the canvas clockwise by the configured panel rotation.
//!
//! The result is always `config.width x config.height`.

mod orientation;
mod resize;

use std::fmt;
use std::str::FromStr;

pub use orientation::{Orientation, Rotation};
pub use resize::resize_lanczos3;

use crate::color::{PixelBuffer, Rgb};
use crate::config::RenderConfig;
use crate::error::{CodecError, ConfigError};

/// How a photo with a different aspect ratio is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Show the whole photo, padding the remainder with white.
    Fit,
    /// Cover the whole canvas, cropping the overflow evenly on both sides.
    #[default]
    Fill,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Fit => "fit",
            DisplayMode::Fill => "fill",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(DisplayMode::Fit),
            "fill" => Ok(DisplayMode::Fill),
            _ => Err(ConfigError::UnknownDisplayMode(s.to_string())),
        }
    }
}

/// Orient, fit and rotate `image` onto the panel grid described by `config`.
///
/// # Errors
///
/// [`ConfigError::EmptySource`] for an image without pixels and
/// [`ConfigError::ZeroTargetDimensions`] for a zero-sized panel.
pub fn normalize(
    image: &PixelBuffer,
    orientation: Orientation,
    config: &RenderConfig,
) -> Result<PixelBuffer, CodecError> {
    if image.is_empty() {
        return Err(ConfigError::EmptySource {
            width: image.width(),
            height: image.height(),
        }
        .into());
    }
    if config.width == 0 || config.height == 0 {
        return Err(ConfigError::ZeroTargetDimensions {
            width: config.width,
            height: config.height,
        }
        .into());
    }

    let upright = orientation.apply(image);

    let (panel_w, panel_h) = (config.width as usize, config.height as usize);
    let (canvas_w, canvas_h) = if config.rotation.swaps_axes() {
        (panel_h, panel_w)
    } else {
        (panel_w, panel_h)
    };

    let placed = match config.mode {
        DisplayMode::Fit => letterbox(&upright, canvas_w, canvas_h),
        DisplayMode::Fill => cover(&upright, canvas_w, canvas_h),
    };

    tracing::debug!(
        src_w = image.width(),
        src_h = image.height(),
        canvas_w,
        canvas_h,
        rotation = config.rotation.degrees(),
        mode = %config.mode,
        "normalized geometry"
    );

    Ok(config.rotation.apply(&placed))
}

/// Scale to fit inside the canvas and center on white.
fn letterbox(image: &PixelBuffer, canvas_w: usize, canvas_h: usize) -> PixelBuffer {
    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let scale = (canvas_w as f64 / src_w).min(canvas_h as f64 / src_h);
    let w = ((src_w * scale).round() as usize).clamp(1, canvas_w);
    let h = ((src_h * scale).round() as usize).clamp(1, canvas_h);

    let resized = resize_lanczos3(image, w, h);
    let mut canvas = PixelBuffer::filled(canvas_w, canvas_h, Rgb::WHITE);
    canvas.paste(&resized, (canvas_w - w) / 2, (canvas_h - h) / 2);
    canvas
}

/// Crop the centered window with the canvas aspect ratio, then scale it to
/// the canvas.
///
/// The window is chosen in source coordinates, so the resampled image is
/// never larger than the canvas whatever the source aspect ratio.
fn cover(image: &PixelBuffer, canvas_w: usize, canvas_h: usize) -> PixelBuffer {
    let (src_w, src_h) = (image.width(), image.height());
    let ratio = canvas_w as f64 / canvas_h as f64;

    let (crop_w, crop_h) = if src_w as f64 / src_h as f64 > ratio {
        let w = ((src_h as f64 * ratio).round() as usize).clamp(1, src_w);
        (w, src_h)
    } else {
        let h = ((src_w as f64 / ratio).round() as usize).clamp(1, src_h);
        (src_w, h)
    };

    let window = image.crop((src_w - crop_w) / 2, (src_h - crop_h) / 2, crop_w, crop_h);
    resize_lanczos3(&window, canvas_w, canvas_h)
}
