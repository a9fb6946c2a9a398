//! Grid of palette indices or device codes.

use crate::error::CodecError;

/// Largest value a 4-bit nibble can carry, plus one.
pub const NIBBLE_BOUND: u8 = 16;

/// Row-major indices plus the exclusive bound their values must respect.
///
/// After classification the bound is the palette length; after a hardware
/// remap it is the controller's code range. The bound is what the packer
/// checks every value against.
///
/// # Example
///
/// ```
/// use epd_codec::IndexBuffer;
///
/// let buf = IndexBuffer::new(vec![0, 1, 1, 0], 2, 2, 7).unwrap();
/// assert_eq!(buf.get(1, 0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    bound: u8,
}

impl IndexBuffer {
    /// # Errors
    ///
    /// [`CodecError::Processing`] if the length does not match the
    /// dimensions or the bound does not fit in a nibble. Individual values
    /// are checked when packing.
    pub fn new(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        bound: u8,
    ) -> Result<Self, CodecError> {
        if indices.len() != width * height {
            return Err(CodecError::Processing(format!(
                "index buffer has {} entries, expected {}x{}",
                indices.len(),
                width,
                height
            )));
        }
        if bound == 0 || bound > NIBBLE_BOUND {
            return Err(CodecError::Processing(format!(
                "index bound {bound} is outside 1..={NIBBLE_BOUND}"
            )));
        }
        Ok(Self {
            indices,
            width,
            height,
            bound,
        })
    }

    /// Caller guarantees the length and bound are consistent.
    pub(crate) fn from_parts(indices: Vec<u8>, width: usize, height: usize, bound: u8) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        Self {
            indices,
            width,
            height,
            bound,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bound(&self) -> u8 {
        self.bound
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.indices[y * self.width..(y + 1) * self.width]
    }
}
