//! Error types for palette operations

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    #[error("invalid hex character '{0}'")]
    InvalidDigit(char),
}

/// Error type for palette validation.
///
/// Panels ship with either 6 or 7 inks, so any other length is rejected, as
/// are palettes where two entries would be indistinguishable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("palette must have 6 or 7 colors, got {len}")]
    WrongLength { len: usize },
    #[error("duplicate color found at index {index}")]
    DuplicateColor { index: usize },
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
    #[error("unknown panel '{0}' (expected acep7 or spectra6)")]
    UnknownPanel(String),
}
