//! Strict BMP codec: one header layout (BITMAPINFOHEADER, 54 bytes total),
//! 16- or 24-bit, uncompressed, no palette, bottom-up rows.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod header;
#[cfg(feature = "std")]
pub(crate) mod io;
