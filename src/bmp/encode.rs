//! Serializer: header verbatim, then the stored rows.

use alloc::vec::Vec;
use enough::Stop;

use super::header::HEADER_SIZE;
use crate::error::BitmapError;
use crate::image::{Image, try_alloc};

/// Serialize `image` to a freshly allocated byte vector.
///
/// The header is written as stored; no validation is repeated here.
pub(crate) fn encode_image(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let payload = payload(image);
    let mut out = try_alloc(HEADER_SIZE + payload.len())?;
    out.extend_from_slice(&image.header().to_bytes());

    for (row_idx, row) in payload.chunks(image.stride()).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
    }
    Ok(out)
}

/// The `file_size - 54` bytes that follow the header.
pub(crate) fn payload(image: &Image) -> &[u8] {
    let len = (image.header().file_size as usize).saturating_sub(HEADER_SIZE);
    let pixels = image.pixels();
    &pixels[..len.min(pixels.len())]
}
