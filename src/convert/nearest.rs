use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::{PixelLayout, pack555, quantize5};

pub(super) fn convert(src: &Image, stop: &dyn Stop) -> Result<Image, BitmapError> {
    let header = src
        .header()
        .with_geometry(src.width(), src.height(), PixelLayout::Bgr555)?;
    let mut dst = Image::zeroed_like(header)?;

    let w = src.width() as usize;
    let dst_stride = dst.stride();
    for (row_idx, (src_row, dst_row)) in src
        .rows()
        .zip(dst.pixels_mut().chunks_exact_mut(dst_stride))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        // Padding past w * 2 stays zero from the allocation.
        for (bgr, out) in src_row[..w * 3]
            .chunks_exact(3)
            .zip(dst_row[..w * 2].chunks_exact_mut(2))
        {
            let px = pack555(quantize5(bgr[2]), quantize5(bgr[1]), quantize5(bgr[0]));
            out.copy_from_slice(&px.to_le_bytes());
        }
    }
    Ok(dst)
}
