use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::{PixelLayout, expand5, unpack555};

pub(super) fn convert(src: &Image, stop: &dyn Stop) -> Result<Image, BitmapError> {
    let header = src
        .header()
        .with_geometry(src.width(), src.height(), PixelLayout::Bgr888)?;
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
        for (px, out) in src_row[..w * 2]
            .chunks_exact(2)
            .zip(dst_row[..w * 3].chunks_exact_mut(3))
        {
            let (r5, g5, b5) = unpack555(u16::from_le_bytes([px[0], px[1]]));
            out.copy_from_slice(&[expand5(b5), expand5(g5), expand5(r5)]);
        }
    }
    Ok(dst)
}
