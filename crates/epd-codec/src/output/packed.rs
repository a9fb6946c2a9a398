//! Nibble packing and the textual byte-array format the firmware embeds.

use std::fmt::{self, Write};

use super::index_buffer::{IndexBuffer, NIBBLE_BOUND};
use crate::error::CodecError;

/// Values per line in the text rendering.
const BYTES_PER_LINE: usize = 16;

/// Packed display data: two 4-bit codes per byte, high nibble first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedOutput {
    bytes: Vec<u8>,
}

impl PackedOutput {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Render as the firmware's C-array body.
    ///
    /// Each byte is two uppercase hex digits and a comma, with a line break
    /// after every 16th byte, then `};` and a final line break.
    ///
    /// ```
    /// use epd_codec::{pack, IndexBuffer};
    ///
    /// let buf = IndexBuffer::new(vec![3, 5, 1], 3, 1, 7).unwrap();
    /// assert_eq!(pack(&buf).unwrap().to_c_array(), "35,10,};\n");
    /// ```
    pub fn to_c_array(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PackedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            write!(f, "{byte:02X},")?;
            if (i + 1) % BYTES_PER_LINE == 0 {
                f.write_char('\n')?;
            }
        }
        f.write_str("};\n")
    }
}

/// Pack `indices` row by row, two per byte.
///
/// The pixel at even `x` lands in the high nibble and its right neighbor in
/// the low nibble. An odd-width row ends with a byte whose low nibble is 0.
///
/// # Errors
///
/// [`CodecError::Processing`] for any value at or above the buffer's bound
/// (or above 15). Nothing is clamped.
pub fn pack(indices: &IndexBuffer) -> Result<PackedOutput, CodecError> {
    let bound = indices.bound().min(NIBBLE_BOUND);
    if let Some((pos, &v)) = indices
        .indices()
        .iter()
        .enumerate()
        .find(|(_, &v)| v >= bound)
    {
        return Err(CodecError::Processing(format!(
            "index {v} at ({}, {}) is out of range 0..{bound}",
            pos % indices.width().max(1),
            pos / indices.width().max(1)
        )));
    }

    let bytes_per_row = indices.width().div_ceil(2);
    let mut bytes = Vec::with_capacity(bytes_per_row * indices.height());
    for y in 0..indices.height() {
        for pair in indices.row(y).chunks(2) {
            let high = pair[0] << 4;
            let low = pair.get(1).copied().unwrap_or(0);
            bytes.push(high | low);
        }
    }

    tracing::debug!(
        width = indices.width(),
        height = indices.height(),
        bytes = bytes.len(),
        "packed"
    );
    Ok(PackedOutput { bytes })
}

/// Reverse [`pack`] for a known `width x height`.
///
/// The result is bounded by 16 since the byte stream carries no palette
/// information.
pub fn unpack(bytes: &[u8], width: usize, height: usize) -> Result<IndexBuffer, CodecError> {
    let bytes_per_row = width.div_ceil(2);
    if bytes.len() != bytes_per_row * height {
        return Err(CodecError::Processing(format!(
            "expected {} packed bytes for {}x{}, got {}",
            bytes_per_row * height,
            width,
            height,
            bytes.len()
        )));
    }

    let mut indices = Vec::with_capacity(width * height);
    for row in bytes.chunks(bytes_per_row.max(1)).take(height) {
        for x in 0..width {
            let byte = row[x / 2];
            indices.push(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F });
        }
    }
    IndexBuffer::new(indices, width, height, NIBBLE_BOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buf(values: Vec<u8>, width: usize, height: usize) -> IndexBuffer {
        IndexBuffer::new(values, width, height, 7).unwrap()
    }

    #[test]
    fn test_pack_pairs() {
        let packed = pack(&buf(vec![3, 5], 2, 1)).unwrap();
        assert_eq!(packed.as_bytes(), &[0x35]);
    }

    #[test]
    fn test_pack_odd_width_pads_low_nibble() {
        let packed = pack(&buf(vec![3, 5, 1], 3, 1)).unwrap();
        assert_eq!(packed.as_bytes(), &[0x35, 0x10]);
    }

    #[test]
    fn test_pack_odd_width_per_row() {
        let packed = pack(&buf(vec![1, 2, 3, 4, 5, 6], 3, 2)).unwrap();
        assert_eq!(packed.as_bytes(), &[0x12, 0x30, 0x45, 0x60]);
    }

    #[test]
    fn test_pack_rejects_values_at_bound() {
        let err = pack(&buf(vec![0, 7], 2, 1)).unwrap_err();
        assert_eq!(
            err,
            CodecError::Processing("index 7 at (1, 0) is out of range 0..7".into())
        );
    }

    #[test]
    fn test_text_format() {
        let values: Vec<u8> = (0..34).map(|i| (i % 7) as u8).collect();
        let packed = pack(&buf(values, 34, 1)).unwrap();
        let text = packed.to_c_array();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "01,23,45,60,12,34,56,01,23,45,60,12,34,56,01,23,"
        );
        assert_eq!(lines[1], "45,};");
        assert!(text.ends_with("};\n"));
    }

    #[test]
    fn test_exactly_sixteen_bytes_breaks_before_terminator() {
        let packed = pack(&buf(vec![0; 32], 32, 1)).unwrap();
        assert_eq!(
            packed.to_c_array(),
            "00,00,00,00,00,00,00,00,00,00,00,00,00,00,00,00,\n};\n"
        );
    }

    #[test]
    fn test_unpack_reverses_pack() {
        let original = buf(vec![6, 0, 1, 5, 2, 3, 4, 4], 4, 2);
        let packed = pack(&original).unwrap();
        let unpacked = unpack(packed.as_bytes(), 4, 2).unwrap();
        assert_eq!(unpacked.indices(), original.indices());
        assert_eq!(unpacked.bound(), 16);
    }

    #[test]
    fn test_unpack_checks_length() {
        assert!(unpack(&[0x12, 0x30], 3, 2).is_err());
        assert_eq!(unpack(&[0x35, 0x10], 3, 1).unwrap().indices(), &[3, 5, 1]);
    }
}
