//! The fixed 54-byte BITMAPFILEHEADER + BITMAPINFOHEADER pair.

use crate::error::{BitmapError, HeaderViolation};
use crate::pixel::PixelLayout;
use crate::stride::stride;

/// Size of the combined file + info header, and the only accepted pixel offset.
pub const HEADER_SIZE: usize = 54;
/// Size of the BITMAPINFOHEADER part.
pub const DIB_HEADER_SIZE: u32 = 40;
/// `"BM"` read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = 0x4D42;

/// Default resolution written into new headers (72 DPI).
const DEFAULT_PPM: i32 = 2835;

/// In-memory copy of the 54-byte bitmap header. Fields mirror the on-disk layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
    pub dib_header_size: u32,
    pub width: i32,
    pub height: i32,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_ppm: i32,
    pub y_ppm: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl BitmapHeader {
    /// Build a consistent header for a bottom-up, uncompressed image.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self, BitmapError> {
        let template = Self {
            magic: BMP_MAGIC,
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            data_offset: HEADER_SIZE as u32,
            dib_header_size: DIB_HEADER_SIZE,
            width: 0,
            height: 0,
            color_planes: 1,
            bits_per_pixel: layout.bits_per_pixel(),
            compression: 0,
            image_size: 0,
            x_ppm: DEFAULT_PPM,
            y_ppm: DEFAULT_PPM,
            colors_used: 0,
            important_colors: 0,
        };
        template.with_geometry(width, height, layout)
    }

    /// Copy of this header with new dimensions and depth; sizes are recomputed,
    /// every other field (reserved words, resolution) is carried over.
    pub fn with_geometry(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = stride(width, layout.bits_per_pixel())
            .checked_mul(u64::from(height))
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(HEADER_SIZE as u32)
            .ok_or_else(too_large)?;
        Ok(Self {
            width: w,
            height: h,
            bits_per_pixel: layout.bits_per_pixel(),
            image_size,
            file_size,
            ..*self
        })
    }

    /// Parse the little-endian on-disk layout. No validation is performed.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut c = Cursor::new(bytes);
        Self {
            magic: c.u16(),
            file_size: c.u32(),
            reserved1: c.u16(),
            reserved2: c.u16(),
            data_offset: c.u32(),
            dib_header_size: c.u32(),
            width: c.i32(),
            height: c.i32(),
            color_planes: c.u16(),
            bits_per_pixel: c.u16(),
            compression: c.u32(),
            image_size: c.u32(),
            x_ppm: c.i32(),
            y_ppm: c.i32(),
            colors_used: c.u32(),
            important_colors: c.u32(),
        }
    }

    /// Serialize verbatim to the little-endian on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut pos = 0;
        let mut put = |bytes: &[u8]| {
            out[pos..pos + bytes.len()].copy_from_slice(bytes);
            pos += bytes.len();
        };
        // File header (14 bytes)
        put(&self.magic.to_le_bytes());
        put(&self.file_size.to_le_bytes());
        put(&self.reserved1.to_le_bytes());
        put(&self.reserved2.to_le_bytes());
        put(&self.data_offset.to_le_bytes());
        // DIB header (BITMAPINFOHEADER, 40 bytes)
        put(&self.dib_header_size.to_le_bytes());
        put(&self.width.to_le_bytes());
        put(&self.height.to_le_bytes());
        put(&self.color_planes.to_le_bytes());
        put(&self.bits_per_pixel.to_le_bytes());
        put(&self.compression.to_le_bytes());
        put(&self.image_size.to_le_bytes());
        put(&self.x_ppm.to_le_bytes());
        put(&self.y_ppm.to_le_bytes());
        put(&self.colors_used.to_le_bytes());
        put(&self.important_colors.to_le_bytes());
        out
    }

    /// Check every structural invariant, stopping at the first violation.
    ///
    /// Fields are checked in on-disk order. `file_size` is derived from the
    /// geometry, so it is checked last, after `image_size`.
    pub fn validate(&self) -> Result<(), HeaderViolation> {
        use HeaderViolation as V;

        if self.magic != BMP_MAGIC {
            return Err(V::Magic(self.magic));
        }
        if self.data_offset != HEADER_SIZE as u32 {
            return Err(V::DataOffset(self.data_offset));
        }
        if self.dib_header_size != DIB_HEADER_SIZE {
            return Err(V::DibHeaderSize(self.dib_header_size));
        }
        if self.width < 1 {
            return Err(V::Width(self.width));
        }
        if self.height < 1 {
            return Err(V::Height(self.height));
        }
        if self.color_planes != 1 {
            return Err(V::ColorPlanes(self.color_planes));
        }
        if PixelLayout::from_bits(self.bits_per_pixel).is_none() {
            return Err(V::BitsPerPixel(self.bits_per_pixel));
        }
        if self.compression != 0 {
            return Err(V::Compression(self.compression));
        }

        let expected = stride(self.width as u32, self.bits_per_pixel) * self.height as u64;
        if u64::from(self.image_size) != expected {
            return Err(V::ImageSize {
                expected,
                actual: self.image_size,
            });
        }
        if self.colors_used != 0 {
            return Err(V::ColorsUsed(self.colors_used));
        }
        if self.important_colors != 0 {
            return Err(V::ImportantColors(self.important_colors));
        }
        let expected_file = expected + HEADER_SIZE as u64;
        if u64::from(self.file_size) != expected_file {
            return Err(V::FileSize {
                expected: expected_file,
                actual: self.file_size,
            });
        }
        Ok(())
    }

    /// `true` when the header fits the supported profile.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Pixel layout, if the bit depth is one this crate handles.
    pub fn layout(&self) -> Option<PixelLayout> {
        PixelLayout::from_bits(self.bits_per_pixel)
    }

    /// Stored row width in bytes.
    pub fn stride(&self) -> u64 {
        stride(self.width.unsigned_abs(), self.bits_per_pixel)
    }
}

// ── Cursor for reading header fields ────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8; HEADER_SIZE],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8; HEADER_SIZE]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}
