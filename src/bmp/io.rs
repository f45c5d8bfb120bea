//! `std::io` entry points for reading from and writing to byte streams.

use std::io::{self, Read, Write};

use super::encode::payload;
use super::header::{BitmapHeader, HEADER_SIZE};
use crate::error::BitmapError;
use crate::image::{Image, try_alloc};
use crate::limits::Limits;

/// Read one image from `reader`: exactly 54 header bytes, then `image_size`
/// pixel bytes. Nothing past the pixel data is consumed.
pub fn read_image<R: Read>(reader: R) -> Result<Image, BitmapError> {
    read_image_with_limits(reader, &Limits::default())
}

/// [`read_image`], rejecting images that exceed `limits` before allocating.
pub fn read_image_with_limits<R: Read>(
    mut reader: R,
    limits: &Limits,
) -> Result<Image, BitmapError> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader
        .read_exact(&mut header_bytes)
        .map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BitmapError::TruncatedHeader,
            _ => BitmapError::Read(e),
        })?;

    let header = BitmapHeader::from_bytes(&header_bytes);
    header.validate()?;
    limits.check_header(&header)?;

    let needed = header.image_size as usize;
    let mut pixels = try_alloc(needed)?;
    let actual = reader
        .take(needed as u64)
        .read_to_end(&mut pixels)
        .map_err(BitmapError::Read)?;
    if actual < needed {
        return Err(BitmapError::TruncatedPixelData { needed, actual });
    }

    Image::from_derived(header, pixels)
}

/// Write the header verbatim, then `file_size - 54` pixel bytes, and flush.
pub fn write_image<W: Write>(mut writer: W, image: &Image) -> Result<(), BitmapError> {
    writer
        .write_all(&image.header().to_bytes())
        .map_err(BitmapError::Write)?;
    writer
        .write_all(payload(image))
        .map_err(BitmapError::Write)?;
    writer.flush().map_err(BitmapError::Write)
}
