//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` to a not-yet-visited neighbor and the
/// numerator of the share of error it receives; the denominator is
/// `divisor`. `max_dy` sets how many rows the error buffer must hold
/// (`max_dy + 1`).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
    pub max_dy: usize,
}

/// Floyd-Steinberg: all of the error goes to four neighbors.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
