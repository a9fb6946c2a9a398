//! Turn downloaded photo bytes into a codec pixel buffer.

use epd_codec::{CodecError, Orientation, PixelBuffer};
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;

/// Camera raw and HEIF containers the `image` crate cannot read.
const UNSUPPORTED_EXTENSIONS: &[&str] = &["raw", "dng", "arw", "cr2", "nef", "heic", "heif"];

/// A decoded photo with its EXIF orientation, not yet applied.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: PixelBuffer,
    pub orientation: Orientation,
}

/// Decode `bytes`, sniffing the format from the content.
///
/// `extension` is the lowercased file extension of the original upload, if
/// known; it only serves to reject formats up front with a clear message.
pub fn decode(bytes: &[u8], extension: Option<&str>) -> Result<DecodedImage, CodecError> {
    if let Some(ext) = extension.filter(|e| UNSUPPORTED_EXTENSIONS.contains(e)) {
        return Err(CodecError::Decode(format!("unsupported image format: .{ext}")));
    }

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(e.to_string()))?
        .into_decoder()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let orientation = match decoder.orientation() {
        Ok(o) => Orientation::from_exif(o.to_exif() as u16).unwrap_or(Orientation::Normal),
        Err(e) => {
            tracing::debug!(error = %e, "No usable orientation metadata");
            Orientation::Normal
        }
    };

    let rgb = DynamicImage::from_decoder(decoder)
        .map_err(|e| CodecError::Decode(e.to_string()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = PixelBuffer::from_raw_rgb(width as usize, height as usize, rgb.as_raw())?;

    tracing::debug!(width, height, ?orientation, "Decoded image");
    Ok(DecodedImage {
        pixels,
        orientation,
    })
}
