//! Pixel-format transforms between 24-bit BGR and 16-bit 5:5:5, plus cropping.
//!
//! Every transform borrows its source and returns a new [`Image`] with its own
//! buffer; the source is never modified.

mod crop;
mod dither;
mod expand;
mod nearest;

use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::PixelLayout;

pub use dither::Diffusion;

/// 24-bit → 16-bit, truncating each channel to its top 5 bits.
pub fn to_bgr555(image: &Image, stop: impl Stop) -> Result<Image, BitmapError> {
    require(image, PixelLayout::Bgr888)?;
    nearest::convert(image, &stop)
}

/// 24-bit → 16-bit with error diffusion. [`Diffusion::Row`] keeps every row
/// independent; [`Diffusion::FloydSteinberg`] also carries error into the next
/// stored row.
pub fn to_bgr555_dithered(
    image: &Image,
    diffusion: Diffusion,
    stop: impl Stop,
) -> Result<Image, BitmapError> {
    require(image, PixelLayout::Bgr888)?;
    dither::convert(image, diffusion, &stop)
}

/// 16-bit → 24-bit, expanding each 5-bit channel with [`crate::expand5`].
pub fn to_bgr888(image: &Image, stop: impl Stop) -> Result<Image, BitmapError> {
    require(image, PixelLayout::Bgr555)?;
    expand::convert(image, &stop)
}

/// Keep the visually top `ceil(height / 2)` rows. Works for either depth.
pub fn crop_top_half(image: &Image, stop: impl Stop) -> Result<Image, BitmapError> {
    crop::top_half(image, &stop)
}

/// Always fails with [`BitmapError::UnsupportedOperation`]; horizontal
/// cropping is not part of this codec.
pub fn crop_left_half(_image: &Image) -> Result<Image, BitmapError> {
    Err(BitmapError::UnsupportedOperation("left-half crop"))
}

fn require(image: &Image, layout: PixelLayout) -> Result<(), BitmapError> {
    if image.layout() == layout {
        Ok(())
    } else {
        Err(BitmapError::UnsupportedBitDepth(
            image.header().bits_per_pixel,
        ))
    }
}
