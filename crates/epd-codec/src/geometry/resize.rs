//! Separable Lanczos3 resampling.
//!
//! Two passes, horizontal then vertical, with per-destination weights
//! precomputed once per axis. The intermediate pass stays in `f32` so only
//! the final pass rounds to 8 bits.

use std::f32::consts::PI;

use crate::color::{PixelBuffer, Rgb};

const LANCZOS_RADIUS: f32 = 3.0;

/// Lanczos kernel with a=3
#[inline]
pub(crate) fn lanczos3(x: f32) -> f32 {
    if x.abs() < 1e-8 {
        1.0
    } else if x.abs() >= LANCZOS_RADIUS {
        0.0
    } else {
        let pi_x = PI * x;
        let pi_x_3 = pi_x / LANCZOS_RADIUS;
        (pi_x.sin() / pi_x) * (pi_x_3.sin() / pi_x_3)
    }
}

/// Normalized contributions of a run of source samples to one output sample.
#[derive(Debug, Clone)]
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

fn precompute_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f32 / dst_len as f32;
    // Widen the kernel when shrinking so every source pixel contributes
    let filter_scale = scale.max(1.0);
    let radius = (LANCZOS_RADIUS * filter_scale).ceil() as i32;

    (0..dst_len)
        .map(|dst_i| {
            let src_pos = (dst_i as f32 + 0.5) * scale - 0.5;
            let center = src_pos.floor() as i32;
            let start = (center - radius).max(0) as usize;
            let end = ((center + radius).max(0) as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (start..=end)
                .map(|si| lanczos3((src_pos - si as f32) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > 1e-8 {
                for w in &mut weights {
                    *w /= sum;
                }
            }

            Taps { start, weights }
        })
        .collect()
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Resample `image` to exactly `width x height`.
///
/// Same-size requests return an exact copy. Both target dimensions must be
/// non-zero and the source must not be empty; callers validate this first.
pub fn resize_lanczos3(image: &PixelBuffer, width: usize, height: usize) -> PixelBuffer {
    let (src_w, src_h) = (image.width(), image.height());
    if src_w == width && src_h == height {
        return image.clone();
    }

    // Horizontal pass: src_h rows of `width` samples
    let mut horizontal: Vec<[f32; 3]> = Vec::with_capacity(width * src_h);
    let x_taps = precompute_taps(src_w, width);
    for y in 0..src_h {
        let row = image.row(y);
        for taps in &x_taps {
            let mut acc = [0.0f32; 3];
            for (k, &w) in taps.weights.iter().enumerate() {
                let p = row[taps.start + k];
                acc[0] += p.r as f32 * w;
                acc[1] += p.g as f32 * w;
                acc[2] += p.b as f32 * w;
            }
            horizontal.push(acc);
        }
    }

    // Vertical pass
    let y_taps = precompute_taps(src_h, height);
    let mut pixels = Vec::with_capacity(width * height);
    for taps in &y_taps {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for (k, &w) in taps.weights.iter().enumerate() {
                let s = horizontal[(taps.start + k) * width + x];
                acc[0] += s[0] * w;
                acc[1] += s[1] * w;
                acc[2] += s[2] * w;
            }
            pixels.push(Rgb::new(to_u8(acc[0]), to_u8(acc[1]), to_u8(acc[2])));
        }
    }

    PixelBuffer::from_parts(width, height, pixels)
}
