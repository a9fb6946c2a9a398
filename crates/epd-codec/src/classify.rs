//! Map quantized pixels back to palette indices.

use crate::color::PixelBuffer;
use crate::output::IndexBuffer;
use crate::palette::Palette;

/// Index of the nearest palette entry for every pixel, ties to the lower
/// index.
///
/// A pixel that already equals a palette color maps to that color's index,
/// so quantizer output classifies back to exactly the entries it chose.
/// The result is bounded by `palette.len()`.
pub fn classify(image: &PixelBuffer, palette: &Palette) -> IndexBuffer {
    let indices: Vec<u8> = image
        .pixels()
        .iter()
        .map(|&p| palette.nearest_index(p) as u8)
        .collect();
    IndexBuffer::from_parts(indices, image.width(), image.height(), palette.len() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::HardwareTarget;

    #[test]
    fn test_palette_colors_map_to_their_index() {
        let palette = HardwareTarget::Acep7.palette();
        let img = PixelBuffer::new(7, 1, palette.colors().to_vec()).unwrap();
        let out = classify(&img, &palette);
        assert_eq!(out.indices(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(out.bound(), 7);
    }

    #[test]
    fn test_off_palette_colors_snap() {
        let palette = HardwareTarget::Spectra6.palette();
        let img = PixelBuffer::new(
            3,
            1,
            vec![
                Rgb::new(20, 10, 5),
                Rgb::new(240, 250, 245),
                Rgb::new(10, 30, 220),
            ],
        )
        .unwrap();
        assert_eq!(classify(&img, &palette).indices(), &[0, 1, 4]);
    }
}
