/// Pixel memory layout of a bitmap row.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 16 bits per pixel, little-endian `0rrrrrgg gggbbbbb` (high bit unused).
    Bgr555,
    /// 24 bits per pixel, bytes in B, G, R order.
    Bgr888,
}

impl PixelLayout {
    /// Map a header `bitsPerPixel` value to a layout.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            16 => Some(Self::Bgr555),
            24 => Some(Self::Bgr888),
            _ => None,
        }
    }

    /// Value stored in the header's `bitsPerPixel` field.
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Bgr555 => 16,
            Self::Bgr888 => 24,
        }
    }

    /// Bytes per pixel for this layout.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgr555 => 2,
            Self::Bgr888 => 3,
        }
    }
}

/// Reduce an 8-bit channel to 5 bits by dropping the low 3 bits.
#[inline]
pub const fn quantize5(channel8: u8) -> u8 {
    channel8 >> 3
}

/// Expand a 5-bit channel to 8 bits: `round(channel5 * 255 / 31)`.
///
/// `quantize5(expand5(c)) == c` for every `c` in `0..32`.
#[inline]
pub const fn expand5(channel5: u8) -> u8 {
    (((channel5 as u16 & 0x1F) * 255 + 15) / 31) as u8
}

/// Pack 5-bit channels as `r << 10 | g << 5 | b`.
#[inline]
pub const fn pack555(r5: u8, g5: u8, b5: u8) -> u16 {
    ((r5 as u16 & 0x1F) << 10) | ((g5 as u16 & 0x1F) << 5) | (b5 as u16 & 0x1F)
}

/// Split a 5:5:5 pixel into `(r5, g5, b5)`. The unused high bit is ignored.
#[inline]
pub const fn unpack555(pixel: u16) -> (u8, u8, u8) {
    (
        ((pixel >> 10) & 0x1F) as u8,
        ((pixel >> 5) & 0x1F) as u8,
        (pixel & 0x1F) as u8,
    )
}
