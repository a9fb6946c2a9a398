//! 8-bit RGB color type
//!
//! Every stage of the codec works on plain 8-bit sRGB triples: the panel
//! controller and the firmware palette tables are defined in those terms,
//! and nearest-color matching is done with Euclidean distance in the same
//! space.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as floats, for error diffusion arithmetic.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// The square root is never needed: it is monotonic, so the ordering of
    /// candidates (and therefore tie-breaking) is identical.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// ITU-R 601-2 luma, in the fixed-point form used by common imaging
    /// libraries for RGB to L conversion.
    ///
    /// # Example
    /// ```
    /// use epd_codec::Rgb;
    /// assert_eq!(Rgb::WHITE.luma(), 255);
    /// assert_eq!(Rgb::new(255, 0, 0).luma(), 76);
    /// ```
    #[inline]
    pub fn luma(self) -> u8 {
        let l = (self.r as u32 * 19595 + self.g as u32 * 38470 + self.b as u32 * 7471 + 0x8000)
            >> 16;
        l.min(255) as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Parsing is case-insensitive and surrounding whitespace is ignored.
    ///
    /// ```
    /// use epd_codec::Rgb;
    ///
    /// let orange: Rgb = "#E87E00".parse().unwrap();
    /// assert_eq!(orange, Rgb::new(232, 126, 0));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Digit by digit: integer parsing would also take a leading sign
        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits[..] {
            // Shorthand: 0xF -> 0xFF
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
