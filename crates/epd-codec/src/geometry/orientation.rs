//! EXIF orientation correction and panel rotation.

use crate::color::PixelBuffer;
use crate::error::ConfigError;

/// EXIF orientation tag (0x0112) values.
///
/// Each variant names the transform that brings the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    /// Mirror across the top-left to bottom-right diagonal.
    Transpose,
    Rotate90,
    /// Mirror across the top-right to bottom-left diagonal.
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Map a raw tag value. Values outside 1..=8 are not orientations.
    pub fn from_exif(value: u16) -> Option<Self> {
        Some(match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => return None,
        })
    }

    pub fn to_exif(self) -> u16 {
        match self {
            Orientation::Normal => 1,
            Orientation::FlipHorizontal => 2,
            Orientation::Rotate180 => 3,
            Orientation::FlipVertical => 4,
            Orientation::Transpose => 5,
            Orientation::Rotate90 => 6,
            Orientation::Transverse => 7,
            Orientation::Rotate270 => 8,
        }
    }

    /// Return the upright image.
    pub fn apply(self, image: &PixelBuffer) -> PixelBuffer {
        let (w, h) = (image.width(), image.height());
        match self {
            Orientation::Normal => image.clone(),
            Orientation::FlipHorizontal => image.remap(w, h, |x, y| (w - 1 - x, y)),
            Orientation::Rotate180 => rotate180(image),
            Orientation::FlipVertical => image.remap(w, h, |x, y| (x, h - 1 - y)),
            Orientation::Transpose => image.remap(h, w, |x, y| (y, x)),
            Orientation::Rotate90 => rotate90_cw(image),
            Orientation::Transverse => image.remap(h, w, |x, y| (w - 1 - y, h - 1 - x)),
            Orientation::Rotate270 => rotate270_cw(image),
        }
    }
}

/// Clockwise rotation applied after fitting, for panels mounted sideways or
/// upside down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns exchange the roles of width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    pub fn apply(self, image: &PixelBuffer) -> PixelBuffer {
        match self {
            Rotation::Deg0 => image.clone(),
            Rotation::Deg90 => rotate90_cw(image),
            Rotation::Deg180 => rotate180(image),
            Rotation::Deg270 => rotate270_cw(image),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(ConfigError::InvalidRotation(other)),
        }
    }
}

fn rotate90_cw(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (image.width(), image.height());
    image.remap(h, w, |x, y| (y, h - 1 - x))
}

fn rotate180(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (image.width(), image.height());
    image.remap(w, h, |x, y| (w - 1 - x, h - 1 - y))
}

fn rotate270_cw(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (image.width(), image.height());
    image.remap(h, w, |x, y| (w - 1 - y, x))
}
