//! Slice decoder for the fixed 54-byte-header profile.

use enough::Stop;

use super::header::{BitmapHeader, HEADER_SIZE};
use crate::error::BitmapError;
use crate::image::{Image, try_alloc};
use crate::limits::Limits;

/// Parse and validate the header at the start of `data`.
pub(crate) fn parse_header(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    let bytes: &[u8; HEADER_SIZE] = data
        .get(..HEADER_SIZE)
        .and_then(|h| h.try_into().ok())
        .ok_or(BitmapError::TruncatedHeader)?;
    let header = BitmapHeader::from_bytes(bytes);
    header.validate()?;
    Ok(header)
}

/// Decode a complete image. Bytes past `image_size` are ignored.
pub(crate) fn decode_image(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let header = parse_header(data)?;
    if let Some(limits) = limits {
        limits.check_header(&header)?;
    }
    stop.check()?;

    let needed = header.image_size as usize;
    let pixel_data = &data[HEADER_SIZE..];
    if pixel_data.len() < needed {
        return Err(BitmapError::TruncatedPixelData {
            needed,
            actual: pixel_data.len(),
        });
    }

    let mut pixels = try_alloc(needed)?;
    let stride = header.stride() as usize;
    for (row_idx, row) in pixel_data[..needed].chunks_exact(stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        pixels.extend_from_slice(row);
    }

    Image::from_derived(header, pixels)
}
