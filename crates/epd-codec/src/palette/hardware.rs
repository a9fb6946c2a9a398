//! Panel presets: the palette a controller understands and the codes it
//! expects on the wire.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Rgb;
use crate::error::CodecError;
use crate::output::IndexBuffer;

/// Measured ACeP 7-color inks: black, white, green, blue, red, yellow, orange.
const ACEP7: [Rgb; 7] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(67, 138, 28),
    Rgb::new(100, 64, 255),
    Rgb::new(191, 0, 0),
    Rgb::new(255, 243, 56),
    Rgb::new(232, 126, 0),
];

/// Spectra 6 inks: black, white, yellow, red, blue, green.
const SPECTRA6: [Rgb; 6] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 0),
];

/// The display controller the packed output is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HardwareTarget {
    /// 7-color ACeP panel; palette indices are device codes.
    #[default]
    Acep7,
    /// 6-color Spectra panel; device code 4 is unused, so indices above 3
    /// shift up by one.
    Spectra6,
}

impl HardwareTarget {
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            HardwareTarget::Acep7 => &ACEP7,
            HardwareTarget::Spectra6 => &SPECTRA6,
        }
    }

    pub fn palette(self) -> Palette {
        Palette::from_validated(self.colors())
    }

    pub fn name(self) -> &'static str {
        match self {
            HardwareTarget::Acep7 => "acep7",
            HardwareTarget::Spectra6 => "spectra6",
        }
    }

    /// Exclusive upper bound of the codes the controller accepts.
    pub fn code_bound(self) -> u8 {
        7
    }

    /// Device code for a palette index.
    #[inline]
    pub fn remap(self, index: u8) -> u8 {
        match self {
            HardwareTarget::Acep7 => index,
            HardwareTarget::Spectra6 if index > 3 => index + 1,
            HardwareTarget::Spectra6 => index,
        }
    }

    /// Translate a classified buffer into device codes.
    ///
    /// The result is bounded by [`HardwareTarget::code_bound`], so a code the
    /// controller cannot show is rejected by the packer instead of being
    /// written out.
    pub fn remap_indices(self, indices: &IndexBuffer) -> Result<IndexBuffer, CodecError> {
        let codes = indices.indices().iter().map(|&i| self.remap(i)).collect();
        IndexBuffer::new(codes, indices.width(), indices.height(), self.code_bound())
    }
}

impl fmt::Display for HardwareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HardwareTarget {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acep7" => Ok(HardwareTarget::Acep7),
            "spectra6" => Ok(HardwareTarget::Spectra6),
            other => Err(PaletteError::UnknownPanel(other.to_string())),
        }
    }
}
