use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::header::BitmapHeader;
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// A validated header paired with its raw, bottom-up, row-padded pixel buffer.
///
/// Constructed only through paths that uphold the invariants: the header passes
/// [`BitmapHeader::validate`] and the buffer holds exactly `image_size` bytes.
/// Converters never mutate an `Image`; each returns a new, independently owned one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: BitmapHeader,
    layout: PixelLayout,
    pixels: Vec<u8>,
}

impl Image {
    /// Pair a header with a pixel buffer, checking both.
    pub fn new(header: BitmapHeader, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        header.validate()?;
        let needed = header.image_size as usize;
        if pixels.len() < needed {
            return Err(BitmapError::TruncatedPixelData {
                needed,
                actual: pixels.len(),
            });
        }
        if pixels.len() > needed {
            return Err(BitmapError::ExcessPixelData {
                expected: needed,
                actual: pixels.len(),
            });
        }
        Self::from_derived(header, pixels)
    }

    /// Zero-filled image with a freshly built header.
    pub fn blank(width: u32, height: u32, layout: PixelLayout) -> Result<Self, BitmapError> {
        let header = BitmapHeader::new(width, height, layout)?;
        Self::zeroed_like(header)
    }

    /// Build from tightly packed, top-down pixels (BGR bytes, or little-endian
    /// 5:5:5 words), flipping to bottom-up storage and adding row padding.
    pub fn from_pixels(
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Self, BitmapError> {
        let mut image = Self::blank(width, height, layout)?;
        let row_bytes = width as usize * layout.bytes_per_pixel();
        let expected = row_bytes * height as usize;
        if pixels.len() < expected {
            return Err(BitmapError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }

        let stride = image.stride();
        for (row_idx, (src, dst)) in pixels[..expected]
            .chunks_exact(row_bytes)
            .zip(image.pixels.rchunks_exact_mut(stride))
            .enumerate()
        {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            dst[..row_bytes].copy_from_slice(src);
        }
        Ok(image)
    }

    /// Tightly packed, top-down copy of the pixels (padding dropped).
    pub fn to_pixels(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let row_bytes = self.width() as usize * self.layout().bytes_per_pixel();
        let mut out = try_alloc(row_bytes * self.height() as usize)?;
        for (row_idx, row) in self.pixels.rchunks_exact(self.stride()).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            out.extend_from_slice(&row[..row_bytes]);
        }
        Ok(out)
    }

    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    /// Raw stored bytes, bottom row first, padding included.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.header.width.unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        self.header.height.unsigned_abs()
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Stored row width in bytes.
    pub fn stride(&self) -> usize {
        self.header.stride() as usize
    }

    /// Stored row `j` (0 is the visually bottom scanline), padding included.
    pub fn row(&self, j: usize) -> Option<&[u8]> {
        let stride = self.stride();
        let start = j.checked_mul(stride)?;
        self.pixels.get(start..start.checked_add(stride)?)
    }

    /// Stored rows in buffer order (bottom-up).
    pub fn rows(&self) -> core::slice::ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.stride())
    }

    pub fn into_parts(self) -> (BitmapHeader, Vec<u8>) {
        (self.header, self.pixels)
    }

    /// Typed view of each stored row of a 24-bit image (padding dropped).
    #[cfg(feature = "rgb")]
    pub fn bgr8_rows(
        &self,
    ) -> Result<impl Iterator<Item = &[rgb::Bgr<u8>]> + '_, BitmapError> {
        use rgb::AsPixels as _;

        if self.layout() != PixelLayout::Bgr888 {
            return Err(BitmapError::UnsupportedBitDepth(self.header.bits_per_pixel));
        }
        let row_bytes = self.width() as usize * 3;
        Ok(self.rows().map(move |row| {
            let pixels: &[rgb::Bgr<u8>] = row[..row_bytes].as_pixels();
            pixels
        }))
    }

    /// Top-down [`imgref::ImgVec`] of BGR pixels. 16-bit images are upsampled
    /// with [`crate::expand5`].
    #[cfg(feature = "imgref")]
    pub fn to_bgr8_imgvec(
        &self,
        stop: impl Stop,
    ) -> Result<imgref::ImgVec<rgb::Bgr<u8>>, BitmapError> {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let mut buf = Vec::new();
        buf.try_reserve_exact(w * h)
            .map_err(|_| BitmapError::AllocationFailure { bytes: w * h * 3 })?;

        for (row_idx, row) in self.pixels.rchunks_exact(self.stride()).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            match self.layout() {
                PixelLayout::Bgr888 => buf.extend(
                    row[..w * 3]
                        .chunks_exact(3)
                        .map(|p| rgb::Bgr { b: p[0], g: p[1], r: p[2] }),
                ),
                PixelLayout::Bgr555 => buf.extend(row[..w * 2].chunks_exact(2).map(|p| {
                    let (r5, g5, b5) = crate::pixel::unpack555(u16::from_le_bytes([p[0], p[1]]));
                    rgb::Bgr {
                        b: crate::pixel::expand5(b5),
                        g: crate::pixel::expand5(g5),
                        r: crate::pixel::expand5(r5),
                    }
                })),
            }
        }
        Ok(imgref::ImgVec::new(buf, w, h))
    }

    /// Allocate a zeroed buffer sized for `header` and wrap it.
    pub(crate) fn zeroed_like(header: BitmapHeader) -> Result<Self, BitmapError> {
        let len = header.image_size as usize;
        let mut pixels = try_alloc(len)?;
        pixels.resize(len, 0);
        Self::from_derived(header, pixels)
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Wrap parts produced by crate code: the header is derived from a valid one
    /// and the buffer is sized to `image_size`.
    pub(crate) fn from_derived(header: BitmapHeader, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        debug_assert!(header.is_valid());
        debug_assert_eq!(pixels.len(), header.image_size as usize);
        let layout = header
            .layout()
            .ok_or(BitmapError::UnsupportedBitDepth(header.bits_per_pixel))?;
        Ok(Self {
            header,
            layout,
            pixels,
        })
    }
}

/// Empty vector with exactly `bytes` of capacity, or [`BitmapError::AllocationFailure`].
pub(crate) fn try_alloc(bytes: usize) -> Result<Vec<u8>, BitmapError> {
    let mut v = Vec::new();
    v.try_reserve_exact(bytes)
        .map_err(|_| BitmapError::AllocationFailure { bytes })?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn from_pixels_flips_and_pads() {
        // 1x2, top pixel (1,2,3), bottom pixel (4,5,6)
        let img = Image::from_pixels(&[1, 2, 3, 4, 5, 6], 1, 2, PixelLayout::Bgr888, Unstoppable)
            .unwrap();
        assert_eq!(img.stride(), 4);
        assert_eq!(img.pixels(), &[4, 5, 6, 0, 1, 2, 3, 0]);
        assert_eq!(img.to_pixels(Unstoppable).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn new_rejects_wrong_length() {
        let header = BitmapHeader::new(2, 2, PixelLayout::Bgr555).unwrap();
        let err = Image::new(header, vec![0; 7]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedPixelData {
                needed: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn new_rejects_invalid_header() {
        let mut header = BitmapHeader::new(2, 2, PixelLayout::Bgr555).unwrap();
        header.color_planes = 0;
        assert!(matches!(
            Image::new(header, vec![0; 8]),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rows_and_row_agree() {
        let img = Image::blank(3, 4, PixelLayout::Bgr888).unwrap();
        assert_eq!(img.rows().count(), 4);
        assert_eq!(img.row(3).map(<[u8]>::len), Some(12));
        assert!(img.row(4).is_none());
    }

    #[test]
    fn row_index_overflow_is_none() {
        let img = Image::blank(1, 1, PixelLayout::Bgr888).unwrap();
        assert!(img.row(usize::MAX).is_none());
        assert!(img.row(usize::MAX / 4).is_none());
    }

    #[test]
    fn new_rejects_oversized_buffer() {
        let header = BitmapHeader::new(2, 2, PixelLayout::Bgr555).unwrap();
        assert!(matches!(
            Image::new(header, vec![0; 9]),
            Err(BitmapError::ExcessPixelData {
                expected: 8,
                actual: 9
            })
        ));
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn bgr8_rows_are_bottom_up() {
        let img = Image::from_pixels(&[1, 2, 3, 4, 5, 6], 1, 2, PixelLayout::Bgr888, Unstoppable)
            .unwrap();
        let rows: Vec<_> = img.bgr8_rows().unwrap().collect();
        assert_eq!(rows[0], [rgb::Bgr { b: 4, g: 5, r: 6 }]);
        assert_eq!(rows[1], [rgb::Bgr { b: 1, g: 2, r: 3 }]);

        let sixteen = Image::blank(1, 1, PixelLayout::Bgr555).unwrap();
        assert!(matches!(
            sixteen.bgr8_rows().map(|_| ()),
            Err(BitmapError::UnsupportedBitDepth(16))
        ));
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgvec_is_top_down() {
        let packed = [0x00, 0x7C, 0x1F, 0x00];
        let img = Image::from_pixels(&packed, 1, 2, PixelLayout::Bgr555, Unstoppable).unwrap();
        let view = img.to_bgr8_imgvec(Unstoppable).unwrap();
        assert_eq!((view.width(), view.height()), (1, 2));
        assert_eq!(view.buf()[0], rgb::Bgr { b: 0, g: 0, r: 255 });
        assert_eq!(view.buf()[1], rgb::Bgr { b: 255, g: 0, r: 0 });
    }

    #[test]
    fn from_pixels_short_input() {
        assert!(matches!(
            Image::from_pixels(&[0; 5], 1, 2, PixelLayout::Bgr888, Unstoppable),
            Err(BitmapError::BufferTooSmall { needed: 6, actual: 5 })
        ));
    }
}
