//! Palette types, panel presets and their error types

mod error;
mod hardware;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use hardware::HardwareTarget;
pub use palette::{Palette, MAX_COLORS, MIN_COLORS};
