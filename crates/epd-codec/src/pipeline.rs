//! End-to-end conversion from decoded pixels to packed display data.

use tracing::debug_span;

use crate::classify::classify;
use crate::color::PixelBuffer;
use crate::config::RenderConfig;
use crate::enhance::enhance;
use crate::error::CodecError;
use crate::geometry::{normalize, Orientation};
use crate::output::{pack, IndexBuffer, PackedOutput};
use crate::quantize::quantize;

/// Run every stage and return the packed codes for `config.hardware`.
///
/// The configuration is validated before any pixel work. Stages run in
/// order: geometry, enhancement, quantization, classification, hardware
/// remap, packing.
///
/// # Example
///
/// ```
/// use epd_codec::{convert, Orientation, PixelBuffer, RenderConfig, Rgb};
///
/// let photo = PixelBuffer::filled(40, 30, Rgb::new(255, 255, 255));
/// let packed = convert(&photo, Orientation::Normal, &RenderConfig::new(8, 2)).unwrap();
/// assert_eq!(packed.as_bytes(), &[0x11; 8]);
/// ```
pub fn convert(
    source: &PixelBuffer,
    orientation: Orientation,
    config: &RenderConfig,
) -> Result<PackedOutput, CodecError> {
    let codes = render_codes(source, orientation, config)?;
    let _span = debug_span!("pack").entered();
    pack(&codes)
}

/// Everything [`convert`] does except packing.
pub fn render_codes(
    source: &PixelBuffer,
    orientation: Orientation,
    config: &RenderConfig,
) -> Result<IndexBuffer, CodecError> {
    config.validate()?;
    let palette = config.palette_ref();

    let normalized = {
        let _span = debug_span!("normalize").entered();
        normalize(source, orientation, config)?
    };
    let enhanced = {
        let _span = debug_span!("enhance").entered();
        enhance(&normalized, config.saturation, config.contrast)?
    };
    let quantized = {
        let _span = debug_span!("quantize").entered();
        quantize(&enhanced, palette, config.strength)?
    };
    let indices = classify(&quantized, palette);
    config.hardware.remap_indices(&indices)
}
