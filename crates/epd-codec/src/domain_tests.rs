//! Cross-stage regression tests for epd-codec.
//!
//! Each test pins down a property the firmware relies on; the doc comment
//! says what breaks on the device if it fails.

#[cfg(test)]
mod domain_tests {
    use pretty_assertions::assert_eq;

    use crate::classify::classify;
    use crate::color::{PixelBuffer, Rgb};
    use crate::config::RenderConfig;
    use crate::geometry::{normalize, DisplayMode, Orientation, Rotation};
    use crate::output::{pack, unpack, IndexBuffer};
    use crate::palette::HardwareTarget;
    use crate::pipeline::render_codes;
    use crate::quantize::quantize;

    /// Deterministic "photo" with gradients in every channel.
    fn photo(width: usize, height: usize) -> PixelBuffer {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(Rgb::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x * 7 + y * 13) % 256) as u8,
                ));
            }
        }
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    /// If this breaks, zero-strength dithering is still diffusing error and
    /// "no dithering" photos show noise.
    #[test]
    fn test_zero_strength_equals_nearest_color() {
        let img = photo(37, 23);
        for target in [HardwareTarget::Acep7, HardwareTarget::Spectra6] {
            let palette = target.palette();
            let quantized = quantize(&img, &palette, 0.0).unwrap();
            let via_pipeline = classify(&quantized, &palette);

            let direct: Vec<u8> = img
                .pixels()
                .iter()
                .map(|&p| palette.nearest_index(p) as u8)
                .collect();
            assert_eq!(via_pipeline.indices(), direct.as_slice());
        }
    }

    /// If this breaks, the quantizer emitted a color the panel has no ink
    /// for and the classifier silently snapped it somewhere else.
    #[test]
    fn test_quantized_pixels_are_palette_entries_and_classify_back() {
        let img = photo(29, 17);
        let palette = HardwareTarget::Acep7.palette();
        for strength in [0.0, 0.3, 0.8, 1.0] {
            let quantized = quantize(&img, &palette, strength).unwrap();
            let indices = classify(&quantized, &palette);
            for (pixel, &idx) in quantized.pixels().iter().zip(indices.indices()) {
                assert!(palette.colors().contains(pixel));
                assert_eq!(palette.color(idx as usize), *pixel);
            }
        }
    }

    /// If this breaks, the firmware reads past or short of its frame buffer.
    #[test]
    fn test_packed_size_is_height_times_half_width_rounded_up() {
        for (w, h) in [(1, 1), (2, 3), (7, 5), (800, 2), (31, 9)] {
            let buf = IndexBuffer::new(vec![1; w * h], w, h, 7).unwrap();
            assert_eq!(pack(&buf).unwrap().len(), h * w.div_ceil(2), "{w}x{h}");
        }
    }

    /// If this breaks, nibble order or row stride differs between what we
    /// write and what the controller reads.
    #[test]
    fn test_unpack_pack_for_even_width() {
        let values: Vec<u8> = (0..6 * 4).map(|i| (i * 5 % 7) as u8).collect();
        let grid = IndexBuffer::new(values, 6, 4, 7).unwrap();
        let back = unpack(pack(&grid).unwrap().as_bytes(), 6, 4).unwrap();
        assert_eq!(back.indices(), grid.indices());
    }

    #[test]
    fn test_nibble_layout() {
        let pair = IndexBuffer::new(vec![3, 5], 2, 1, 7).unwrap();
        assert_eq!(pack(&pair).unwrap().as_bytes(), &[0x35]);

        let odd = IndexBuffer::new(vec![3, 5, 1], 3, 1, 7).unwrap();
        assert_eq!(pack(&odd).unwrap().as_bytes(), &[0x35, 0x10]);
    }

    /// If this breaks, a photo already at panel size is being resampled and
    /// loses sharpness.
    #[test]
    fn test_same_size_source_only_quantizes() {
        let img = photo(24, 16);
        let config = RenderConfig::new(24, 16)
            .rotation(Rotation::Deg0)
            .mode(DisplayMode::Fill)
            .strength(0.7);

        let codes = render_codes(&img, Orientation::Normal, &config).unwrap();
        let expected = classify(
            &quantize(&img, config.palette_ref(), 0.7).unwrap(),
            config.palette_ref(),
        );
        assert_eq!(codes.indices(), expected.indices());
    }

    /// If this breaks, letterboxed photos are off-center or the border is
    /// not white.
    #[test]
    fn test_fit_border_is_two_hundred_white_columns_each_side() {
        let img = PixelBuffer::filled(400, 480, Rgb::new(191, 0, 0));
        let config = RenderConfig::new(800, 480).mode(DisplayMode::Fit);
        let out = normalize(&img, Orientation::Normal, &config).unwrap();

        for y in 0..480 {
            for x in (0..200).chain(600..800) {
                assert_eq!(out.get(x, y), Rgb::WHITE, "({x}, {y})");
            }
            assert_eq!(out.get(200, y), Rgb::new(191, 0, 0));
            assert_eq!(out.get(599, y), Rgb::new(191, 0, 0));
        }
    }

    /// If this breaks, a sideways-mounted panel shows a squashed photo.
    #[test]
    fn test_quarter_rotation_uses_portrait_canvas() {
        // A 480x800 portrait photo fills the 480x800 working canvas exactly,
        // so nothing is resampled and the top-left pixel lands top-right.
        let mut img = PixelBuffer::filled(480, 800, Rgb::BLACK);
        img.paste(&PixelBuffer::filled(1, 1, Rgb::WHITE), 0, 0);

        let config = RenderConfig::new(800, 480)
            .rotation(Rotation::Deg90)
            .mode(DisplayMode::Fill);
        let out = normalize(&img, Orientation::Normal, &config).unwrap();

        assert_eq!((out.width(), out.height()), (800, 480));
        assert_eq!(out.get(799, 0), Rgb::WHITE);
        assert_eq!(out.get(0, 0), Rgb::BLACK);
    }
}
