//! Per-conversion render settings.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::geometry::{DisplayMode, Rotation};
use crate::palette::{HardwareTarget, Palette};

/// Everything one conversion needs besides the source pixels.
///
/// Built once per request (typically from a configuration snapshot) and
/// never mutated while a conversion runs.
///
/// # Example
///
/// ```
/// use epd_codec::{DisplayMode, HardwareTarget, RenderConfig, Rotation};
///
/// let config = RenderConfig::new(800, 480)
///     .rotation(Rotation::Deg270)
///     .mode(DisplayMode::Fill)
///     .saturation(1.3)
///     .contrast(0.9)
///     .strength(0.8)
///     .hardware(HardwareTarget::Acep7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Panel width in pixels, after rotation.
    pub width: u32,
    /// Panel height in pixels, after rotation.
    pub height: u32,
    pub rotation: Rotation,
    pub mode: DisplayMode,
    /// Saturation factor (1.0 = unchanged, 0.0 = grayscale).
    pub saturation: f32,
    /// Contrast factor (1.0 = unchanged).
    pub contrast: f32,
    /// Share of the quantization error that is diffused, in 0.0..=1.0.
    pub strength: f32,
    pub hardware: HardwareTarget,
    palette: Arc<Palette>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(800, 480)
    }
}

impl RenderConfig {
    /// Neutral settings for a `width x height` ACeP panel: no rotation,
    /// fill, no enhancement, full-strength dithering.
    pub fn new(width: u32, height: u32) -> Self {
        let hardware = HardwareTarget::default();
        Self {
            width,
            height,
            rotation: Rotation::default(),
            mode: DisplayMode::default(),
            saturation: 1.0,
            contrast: 1.0,
            strength: 1.0,
            hardware,
            palette: Arc::new(hardware.palette()),
        }
    }

    #[inline]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Select the target panel, resetting the palette to its preset.
    pub fn hardware(mut self, hardware: HardwareTarget) -> Self {
        self.hardware = hardware;
        self.palette = Arc::new(hardware.palette());
        self
    }

    /// Replace the preset with a calibrated palette for the same panel.
    ///
    /// Entry order must match the preset since the index remap depends on
    /// it; [`RenderConfig::validate`] checks the length.
    pub fn palette(mut self, palette: Arc<Palette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette_ref(&self) -> &Palette {
        &self.palette
    }

    /// Check every setting before any pixel is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroTargetDimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_factor("saturation", self.saturation)?;
        check_factor("contrast", self.contrast)?;
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(ConfigError::InvalidStrength(self.strength));
        }
        let expected = self.hardware.colors().len();
        if self.palette.len() != expected {
            return Err(ConfigError::PaletteMismatch {
                expected,
                actual: self.palette.len(),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 480));
        assert_eq!(config.rotation, Rotation::Deg0);
        assert_eq!(config.mode, DisplayMode::Fill);
        assert_eq!(config.hardware, HardwareTarget::Acep7);
        assert_eq!(config.palette_ref().len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hardware_resets_palette() {
        let config = RenderConfig::new(10, 10).hardware(HardwareTarget::Spectra6);
        assert_eq!(config.palette_ref().len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        let err = RenderConfig::new(10, 10).saturation(-0.1).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidFactor {
                name: "saturation",
                value: -0.1
            }
        );
        assert!(RenderConfig::new(10, 10)
            .contrast(f32::NAN)
            .validate()
            .is_err());
        assert!(RenderConfig::new(10, 10)
            .contrast(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_strength_out_of_range() {
        for s in [-0.01, 1.01, f32::NAN] {
            assert!(matches!(
                RenderConfig::new(10, 10).strength(s).validate(),
                Err(ConfigError::InvalidStrength(_))
            ));
        }
        assert!(RenderConfig::new(10, 10).strength(0.0).validate().is_ok());
        assert!(RenderConfig::new(10, 10).strength(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_palette_mismatch() {
        let six = Arc::new(HardwareTarget::Spectra6.palette());
        let err = RenderConfig::new(10, 10).palette(six).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::PaletteMismatch {
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        assert!(matches!(
            RenderConfig::new(800, 0).validate(),
            Err(ConfigError::ZeroTargetDimensions { .. })
        ));
    }
}
