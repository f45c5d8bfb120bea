//! Error-diffusion down-conversion to 5:5:5.
//!
//! Each pixel's channels are adjusted by the error carried into it, clamped to
//! `0..=255`, truncated to 5 bits, and the residual against the 5-bit level's
//! 8-bit value is pushed to unprocessed neighbours. Pixels are visited left to
//! right within a stored row and rows in stored order. Targets outside the
//! image are dropped.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::{PixelLayout, expand5, pack555, quantize5};

/// Error-diffusion kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Diffusion {
    /// Single-row forward kernel: 7/16, 3/16, 5/16, 1/16 to the next four
    /// pixels of the same row. Rows never influence each other.
    #[default]
    Row,
    /// Floyd–Steinberg: 7/16 right, then 3/16, 5/16, 1/16 below-left, below,
    /// below-right (in stored row order).
    FloydSteinberg,
}

#[derive(Clone, Copy)]
struct Tap {
    dx: isize,
    dy: usize,
    weight: i32,
}

const ROW: &[Tap] = &[
    Tap { dx: 1, dy: 0, weight: 7 },
    Tap { dx: 2, dy: 0, weight: 3 },
    Tap { dx: 3, dy: 0, weight: 5 },
    Tap { dx: 4, dy: 0, weight: 1 },
];

const FLOYD_STEINBERG: &[Tap] = &[
    Tap { dx: 1, dy: 0, weight: 7 },
    Tap { dx: -1, dy: 1, weight: 3 },
    Tap { dx: 0, dy: 1, weight: 5 },
    Tap { dx: 1, dy: 1, weight: 1 },
];

impl Diffusion {
    fn taps(self) -> &'static [Tap] {
        match self {
            Self::Row => ROW,
            Self::FloydSteinberg => FLOYD_STEINBERG,
        }
    }
}

/// Pending error for the rows a kernel can reach, current row first.
struct ErrorRows {
    width: usize,
    rows: usize,
    buf: Vec<[i32; 3]>,
}

impl ErrorRows {
    fn new(width: usize, taps: &[Tap]) -> Result<Self, BitmapError> {
        let rows = taps.iter().map(|t| t.dy).max().unwrap_or(0) + 1;
        let len = width * rows;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| BitmapError::AllocationFailure {
                bytes: len * core::mem::size_of::<[i32; 3]>(),
            })?;
        buf.resize(len, [0; 3]);
        Ok(Self { width, rows, buf })
    }

    fn get(&self, x: usize) -> [i32; 3] {
        self.buf[x]
    }

    fn add(&mut self, x: usize, dy: usize, err: [i32; 3], weight: i32) {
        let slot = &mut self.buf[dy * self.width + x];
        for c in 0..3 {
            // Truncating division keeps positive and negative residuals symmetric.
            slot[c] += err[c] * weight / 16;
        }
    }

    /// Drop the finished row and open an empty one at the far end.
    fn advance(&mut self) {
        self.buf.rotate_left(self.width);
        let last = (self.rows - 1) * self.width;
        self.buf[last..].fill([0; 3]);
    }
}

pub(super) fn convert(
    src: &Image,
    diffusion: Diffusion,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let header = src
        .header()
        .with_geometry(src.width(), src.height(), PixelLayout::Bgr555)?;
    let mut dst = Image::zeroed_like(header)?;

    let w = src.width() as usize;
    let taps = diffusion.taps();
    let mut errors = ErrorRows::new(w, taps)?;

    let dst_stride = dst.stride();
    for (row_idx, (src_row, dst_row)) in src
        .rows()
        .zip(dst.pixels_mut().chunks_exact_mut(dst_stride))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (x, (bgr, out)) in src_row[..w * 3]
            .chunks_exact(3)
            .zip(dst_row[..w * 2].chunks_exact_mut(2))
            .enumerate()
        {
            let carried = errors.get(x);
            let mut level = [0u8; 3];
            let mut residual = [0i32; 3];
            for c in 0..3 {
                let adjusted = (i32::from(bgr[c]) + carried[c]).clamp(0, 255) as u8;
                level[c] = quantize5(adjusted);
                residual[c] = i32::from(adjusted) - i32::from(expand5(level[c]));
            }
            let [b5, g5, r5] = level;
            out.copy_from_slice(&pack555(r5, g5, b5).to_le_bytes());

            for tap in taps {
                let Some(tx) = x.checked_add_signed(tap.dx) else {
                    continue;
                };
                if tx < w {
                    errors.add(tx, tap.dy, residual, tap.weight);
                }
            }
        }
        errors.advance();
    }
    Ok(dst)
}
