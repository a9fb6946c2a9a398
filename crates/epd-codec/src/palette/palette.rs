//! Fixed display palette with nearest-color matching.

use std::collections::HashSet;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Smallest palette a supported panel uses.
pub const MIN_COLORS: usize = 6;
/// Largest palette a supported panel uses.
pub const MAX_COLORS: usize = 7;

/// An ordered set of distinct display colors.
///
/// The position of a color is its palette index; the quantizer only ever
/// emits these colors and the classifier maps them back to their index.
/// Palettes are immutable after construction and cheap to share behind an
/// `Arc` across concurrent conversions.
///
/// # Example
///
/// ```
/// use epd_codec::Palette;
///
/// let palette = Palette::from_hex(&[
///     "#000000", "#FFFFFF", "#FFFF00", "#FF0000", "#0000FF", "#00FF00",
/// ])
/// .unwrap();
/// assert_eq!(palette.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    // Float copies for the error diffusion loop
    channels: Vec<[f32; 3]>,
}

impl Palette {
    /// Create a palette, validating its length and that entries are distinct.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::WrongLength`] unless there are 6 or 7 colors
    /// - [`PaletteError::DuplicateColor`] naming the first repeated entry
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&colors.len()) {
            return Err(PaletteError::WrongLength { len: colors.len() });
        }

        let mut seen = HashSet::new();
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(color.to_bytes()) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self::from_validated(colors))
    }

    /// Build from colors already known to satisfy the constructor checks.
    pub(crate) fn from_validated(colors: &[Rgb]) -> Self {
        Self {
            colors: colors.to_vec(),
            channels: colors.iter().map(|c| c.to_f32()).collect(),
        }
    }

    /// Create a palette from hex color strings such as `"#E87E00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any string is not a valid
    /// color, or any error of [`Palette::new`].
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| Rgb::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Find the entry nearest to a working (possibly fractional) color.
    ///
    /// Returns `(index, squared distance)`. The scan keeps the first entry
    /// on ties, so equidistant candidates resolve to the lower index.
    #[inline]
    pub fn find_nearest(&self, color: [f32; 3]) -> (usize, f32) {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, entry) in self.channels.iter().enumerate() {
            let dr = color[0] - entry[0];
            let dg = color[1] - entry[1];
            let db = color[2] - entry[2];
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// Integer nearest-color lookup, with the same tie rule as
    /// [`Palette::find_nearest`].
    #[inline]
    pub fn nearest_index(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ParseColorError;

    fn six() -> Vec<Rgb> {
        vec![
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
        ]
    }

    #[test]
    fn test_new_accepts_six_and_seven() {
        assert_eq!(Palette::new(&six()).unwrap().len(), 6);

        let mut seven = six();
        seven.push(Rgb::new(255, 128, 0));
        assert_eq!(Palette::new(&seven).unwrap().len(), 7);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert_eq!(
            Palette::new(&[]).unwrap_err(),
            PaletteError::WrongLength { len: 0 }
        );
        assert_eq!(
            Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap_err(),
            PaletteError::WrongLength { len: 2 }
        );

        let mut eight = six();
        eight.push(Rgb::new(1, 2, 3));
        eight.push(Rgb::new(4, 5, 6));
        assert_eq!(
            Palette::new(&eight).unwrap_err(),
            PaletteError::WrongLength { len: 8 }
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let mut colors = six();
        colors[4] = Rgb::WHITE;
        assert_eq!(
            Palette::new(&colors).unwrap_err(),
            PaletteError::DuplicateColor { index: 4 }
        );
    }

    #[test]
    fn test_from_hex_propagates_parse_errors() {
        let err = Palette::from_hex(&["#000", "#fff", "#ff0", "#f00", "#00f", "nope"]).unwrap_err();
        assert_eq!(err, PaletteError::ParseColor(ParseColorError::InvalidDigit('n')));
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let palette = Palette::new(&six()).unwrap();
        for (i, c) in six().into_iter().enumerate() {
            let (idx, dist) = palette.find_nearest(c.to_f32());
            assert_eq!(idx, i);
            assert_eq!(dist, 0.0);
        }
    }

    #[test]
    fn test_ties_select_lower_index() {
        let palette = Palette::new(&six()).unwrap();
        // Equidistant from black (0) and white (1)
        let gray = [127.5, 127.5, 127.5];
        assert_eq!(palette.find_nearest(gray).0, 0);

        // Equidistant from red (3) and blue (4), nothing closer
        assert_eq!(palette.nearest_index(Rgb::new(200, 0, 200)), 3);
        assert_eq!(palette.nearest_index(Rgb::new(199, 0, 200)), 4);
    }

    #[test]
    fn test_integer_and_float_lookup_agree() {
        let palette = Palette::new(&six()).unwrap();
        for v in (0..=255).step_by(15) {
            let c = Rgb::new(v, 255 - v, v / 2);
            assert_eq!(palette.nearest_index(c), palette.find_nearest(c.to_f32()).0);
        }
    }
}
