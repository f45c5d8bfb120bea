use enough::Stop;

use crate::error::BitmapError;
use crate::image::{Image, try_alloc};

/// Rows are stored bottom-up, so the visual top half is the last
/// `ceil(height / 2)` stored rows.
pub(super) fn top_half(src: &Image, stop: &dyn Stop) -> Result<Image, BitmapError> {
    let height = src.height();
    let new_height = height.div_ceil(2);
    let header = src
        .header()
        .with_geometry(src.width(), new_height, src.layout())?;

    let stride = src.stride();
    let skip = (height - new_height) as usize * stride;
    let mut pixels = try_alloc(header.image_size as usize)?;
    for (row_idx, row) in src.pixels()[skip..].chunks_exact(stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        pixels.extend_from_slice(row);
    }

    Image::from_derived(header, pixels)
}
