//! Output types: index grids and their packed wire form.

mod index_buffer;
mod packed;

pub use index_buffer::{IndexBuffer, NIBBLE_BOUND};
pub use packed::{pack, unpack, PackedOutput};
