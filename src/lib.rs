//! # zenbmp16
//!
//! Strict BMP codec for one narrow profile, with conversions between 24-bit
//! BGR and 16-bit 5:5:5.
//!
//! ## Supported files
//!
//! Exactly one layout is accepted: a 14-byte file header plus a 40-byte
//! BITMAPINFOHEADER, pixel data at offset 54, one plane, no compression, no
//! palette, 16 or 24 bits per pixel, positive width and height (bottom-up rows),
//! and size fields that agree with the 4-byte-aligned row [`stride`].
//! Everything else is rejected with [`BitmapError::InvalidHeader`].
//!
//! ## Transforms
//!
//! - [`to_bgr555`]: 24 → 16 bit, channels truncated to 5 bits
//! - [`to_bgr555_dithered`]: 24 → 16 bit with error diffusion ([`Diffusion`])
//! - [`to_bgr888`]: 16 → 24 bit, channels expanded with rounding
//! - [`crop_top_half`]: keep the visual top `ceil(height / 2)` rows
//!
//! Each transform borrows its input and returns a new [`Image`].
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp16::{Diffusion, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let image = zenbmp16::decode(data, Unstoppable)?;
//! let reduced = zenbmp16::to_bgr555_dithered(&image, Diffusion::Row, Unstoppable)?;
//! let bytes = zenbmp16::encode(&reduced, Unstoppable)?;
//! # let _ = bytes;
//! # Ok::<(), zenbmp16::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod convert;
mod decode;
mod error;
mod image;
mod limits;
mod pixel;
mod stride;

use alloc::vec::Vec;

// Re-exports
pub use bmp::header::{BMP_MAGIC, BitmapHeader, DIB_HEADER_SIZE, HEADER_SIZE};
#[cfg(feature = "std")]
pub use bmp::io::{read_image, read_image_with_limits, write_image};
pub use convert::{
    Diffusion, crop_left_half, crop_top_half, to_bgr555, to_bgr555_dithered, to_bgr888,
};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BitmapError, HeaderViolation};
pub use image::Image;
pub use limits::Limits;
pub use pixel::{PixelLayout, expand5, pack555, quantize5, unpack555};
pub use stride::stride;

/// Decode an in-memory BMP (header, validation, pixel copy).
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Serialize an image: the 54 header bytes as stored, then the pixel rows.
pub fn encode(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode::encode_image(image, &stop)
}
