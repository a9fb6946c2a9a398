//! Codec error types
//!
//! Every stage checks its own preconditions and fails with one of three
//! kinds of error before producing any output. Callers that need to map
//! failures onto a transport (HTTP status, exit code) match on
//! [`CodecError::kind`].

use thiserror::Error;

use crate::palette::PaletteError;

/// Invalid render settings or inputs that cannot be processed as configured.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(u16),

    #[error("unknown display mode '{0}' (expected fit or fill)")]
    UnknownDisplayMode(String),

    #[error("target dimensions must be non-zero, got {width}x{height}")]
    ZeroTargetDimensions { width: u32, height: u32 },

    #[error("source image has no pixels ({width}x{height})")]
    EmptySource { width: usize, height: usize },

    #[error("{name} factor must be finite and non-negative, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("dither strength must be within 0.0..=1.0, got {0}")]
    InvalidStrength(f32),

    #[error("palette has {actual} colors but the panel expects {expected}")]
    PaletteMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Decode,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The source could not be turned into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// An internal invariant failed mid-pipeline, e.g. an index the packer
    /// cannot represent.
    #[error("processing error: {0}")]
    Processing(String),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Configuration(_) => ErrorKind::Configuration,
            CodecError::Decode(_) => ErrorKind::Decode,
            CodecError::Processing(_) => ErrorKind::Processing,
        }
    }
}

impl From<PaletteError> for CodecError {
    fn from(err: PaletteError) -> Self {
        CodecError::Configuration(ConfigError::Palette(err))
    }
}
