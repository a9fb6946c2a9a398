//! Saturation and contrast enhancement.
//!
//! Both adjustments are blends between the image and a "degenerate" version
//! of it, matching the behavior photo tools commonly expose:
//!
//! - saturation blends each pixel with its own gray level (luma),
//! - contrast blends with a flat gray at the image's mean luma.
//!
//! A factor of 1.0 leaves the image unchanged, 0.0 yields the degenerate
//! image, and values above 1.0 push away from it. Channel results are
//! truncated toward zero and clipped to `0..=255`.

use crate::color::{PixelBuffer, Rgb};
use crate::config::check_factor;
use crate::error::CodecError;

/// Apply saturation, then contrast.
///
/// # Errors
///
/// A configuration error if either factor is negative or not finite.
pub fn enhance(
    image: &PixelBuffer,
    saturation: f32,
    contrast: f32,
) -> Result<PixelBuffer, CodecError> {
    check_factor("saturation", saturation)?;
    check_factor("contrast", contrast)?;

    let saturated = adjust_saturation(image, saturation);
    let out = adjust_contrast(&saturated, contrast);
    tracing::debug!(saturation, contrast, "enhanced colors");
    Ok(out)
}

/// Blend every pixel against its own gray level.
pub fn adjust_saturation(image: &PixelBuffer, factor: f32) -> PixelBuffer {
    if factor == 1.0 {
        return image.clone();
    }
    image.map(|p| {
        let gray = p.luma();
        Rgb::new(
            blend(gray, p.r, factor),
            blend(gray, p.g, factor),
            blend(gray, p.b, factor),
        )
    })
}

/// Blend every pixel against a flat gray at the rounded mean luma.
pub fn adjust_contrast(image: &PixelBuffer, factor: f32) -> PixelBuffer {
    if factor == 1.0 || image.pixels().is_empty() {
        return image.clone();
    }
    let mean = mean_luma(image);
    image.map(|p| {
        Rgb::new(
            blend(mean, p.r, factor),
            blend(mean, p.g, factor),
            blend(mean, p.b, factor),
        )
    })
}

fn mean_luma(image: &PixelBuffer) -> u8 {
    let sum: u64 = image.pixels().iter().map(|p| p.luma() as u64).sum();
    let mean = sum as f64 / image.pixels().len() as f64;
    (mean + 0.5).floor().min(255.0) as u8
}

/// `degenerate + factor * (value - degenerate)`, truncated and clipped.
#[inline]
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let v = degenerate as f32 + factor * (value as f32 - degenerate as f32);
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorKind};

    fn strip() -> PixelBuffer {
        PixelBuffer::new(
            4,
            1,
            vec![
                Rgb::new(200, 40, 40),
                Rgb::new(30, 160, 90),
                Rgb::new(10, 10, 10),
                Rgb::new(240, 230, 250),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_blend_truncates_and_clips() {
        assert_eq!(blend(100, 200, 0.5), 150);
        assert_eq!(blend(100, 101, 0.5), 100); // 100.5 truncates
        assert_eq!(blend(100, 250, 2.0), 255);
        assert_eq!(blend(100, 10, 2.0), 0);
        assert_eq!(blend(100, 10, 0.0), 100);
    }

    #[test]
    fn test_unit_factors_are_identity() {
        let img = strip();
        assert_eq!(enhance(&img, 1.0, 1.0).unwrap(), img);
    }

    #[test]
    fn test_zero_saturation_is_grayscale() {
        let out = adjust_saturation(&strip(), 0.0);
        for (p, src) in out.pixels().iter().zip(strip().pixels()) {
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
            assert_eq!(p.r, src.luma());
        }
    }

    #[test]
    fn test_saturation_boost_spreads_channels() {
        let src = Rgb::new(200, 40, 40);
        let out = adjust_saturation(&PixelBuffer::filled(1, 1, src), 1.5).get(0, 0);
        assert!(out.r > src.r);
        assert!(out.g < src.g);
    }

    #[test]
    fn test_zero_contrast_is_flat_mean() {
        let out = adjust_contrast(&strip(), 0.0);
        let first = out.get(0, 0);
        assert_eq!(first.r, first.g);
        assert!(out.pixels().iter().all(|&p| p == first));
        assert_eq!(first.r, mean_luma(&strip()));
    }

    #[test]
    fn test_contrast_reduction_pulls_toward_mean() {
        let img = PixelBuffer::new(2, 1, vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        // Mean luma 127.5 rounds to 128
        let out = adjust_contrast(&img, 0.5);
        assert_eq!(out.get(0, 0), Rgb::new(64, 64, 64));
        assert_eq!(out.get(1, 0), Rgb::new(191, 191, 191));
    }

    #[test]
    fn test_rejects_invalid_factors() {
        let err = enhance(&strip(), -1.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err,
            CodecError::Configuration(ConfigError::InvalidFactor {
                name: "saturation",
                value: -1.0
            })
        );
        assert!(enhance(&strip(), 1.0, f32::NAN).is_err());
    }
}
