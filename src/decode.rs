use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding an in-memory BMP with optional resource limits.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before the pixel buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Validate the header and copy out the pixel data.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BitmapError> {
        crate::bmp::decode::decode_image(self.data, self.limits, &stop)
    }
}
