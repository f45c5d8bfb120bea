use crate::error::BitmapError;
use crate::bmp::header::BitmapHeader;

/// Resource limits applied while decoding, before the pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the pixel buffer in bytes, row padding included.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a validated header against every configured limit.
    pub(crate) fn check_header(&self, header: &BitmapHeader) -> Result<(), BitmapError> {
        // Validated headers have positive dimensions.
        let width = u64::from(header.width.unsigned_abs());
        let height = u64::from(header.height.unsigned_abs());

        exceeds("width", width, self.max_width)?;
        exceeds("height", height, self.max_height)?;
        exceeds("pixel count", width * height, self.max_pixels)?;
        exceeds(
            "pixel buffer bytes",
            u64::from(header.image_size),
            self.max_memory_bytes,
        )
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
