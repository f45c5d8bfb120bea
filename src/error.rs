use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding, and pixel conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unexpected end of input while reading the 54-byte header")]
    TruncatedHeader,

    #[error("invalid header: {0}")]
    InvalidHeader(HeaderViolation),

    #[error("unsupported bit depth: {0} (expected 16 or 24)")]
    UnsupportedBitDepth(u16),

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedPixelData { needed: usize, actual: usize },

    #[error("pixel buffer holds {actual} bytes, header expects exactly {expected}")]
    ExcessPixelData { expected: usize, actual: usize },

    #[error("failed to allocate {bytes} bytes")]
    AllocationFailure { bytes: usize },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[cfg(feature = "std")]
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[cfg(feature = "std")]
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl From<HeaderViolation> for BitmapError {
    fn from(v: HeaderViolation) -> Self {
        BitmapError::InvalidHeader(v)
    }
}

/// The first header invariant a [`crate::BitmapHeader`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HeaderViolation {
    #[error("magic is {0:#06x}, expected 0x4d42 (\"BM\")")]
    Magic(u16),

    #[error("pixel data offset is {0}, expected 54")]
    DataOffset(u32),

    #[error("DIB header size is {0}, expected 40 (BITMAPINFOHEADER)")]
    DibHeaderSize(u32),

    #[error("color plane count is {0}, expected 1")]
    ColorPlanes(u16),

    #[error("compression is {0}, only uncompressed (0) is supported")]
    Compression(u32),

    #[error("colors used is {0}, palettes are not supported")]
    ColorsUsed(u32),

    #[error("important colors is {0}, palettes are not supported")]
    ImportantColors(u32),

    #[error("bit depth is {0}, expected 16 or 24")]
    BitsPerPixel(u16),

    #[error("width is {0}, expected a positive value")]
    Width(i32),

    #[error("height is {0}, expected a positive value (bottom-up rows)")]
    Height(i32),

    #[error("image size field is {actual}, expected {expected}")]
    ImageSize { expected: u64, actual: u32 },

    #[error("file size field is {actual}, expected {expected}")]
    FileSize { expected: u64, actual: u32 },
}
