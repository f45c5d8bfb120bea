//! Row stride arithmetic. Every padded-row computation in the crate goes through [`stride`].

/// Bytes per stored row: `ceil(width * bits / 8)` rounded up to a multiple of 4.
///
/// Total for every input; the result fits comfortably in a `u64`.
pub const fn stride(width: u32, bits_per_pixel: u16) -> u64 {
    let raw = (width as u64 * bits_per_pixel as u64).div_ceil(8);
    let pad = (4 - raw % 4) % 4;
    raw + pad
}
