//! Owned 8-bit raster with interleaved channels.
//!
//! `RasterU8` is the boundary type of the pipeline: callers hand in a 1- or
//! 3-channel raster, and every pipeline output is a 1-channel raster with
//! samples in [0, 255]. Channel counts outside {1, 3} are representable (so
//! the caller can report them) but are rejected by the grayscale conversion.
use super::ImageF32;

/// Rec.601 luma weights, matching the viewer's BGR→gray conversion step.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterU8 {
    w: usize,
    h: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RasterU8 {
    /// Construct a zero-filled single-channel raster.
    pub fn new_gray(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            channels: 1,
            data: vec![0; w * h],
        }
    }

    /// Wrap raw interleaved samples. Returns `None` when the buffer length
    /// does not match `w * h * channels`.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h * channels).then_some(Self {
            w,
            h,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.w + x) * self.channels + c]
    }

    #[inline]
    pub(crate) fn put_sample(&mut self, x: usize, y: usize, c: usize, v: u8) {
        self.data[(y * self.w + x) * self.channels + c] = v;
    }

    /// Convert to a single-channel [0, 1] float plane.
    ///
    /// 1-channel rasters are rescaled directly; 3-channel rasters go through
    /// the Rec.601 luma weights. Returns `None` for any other channel count.
    pub fn luma_plane(&self) -> Option<ImageF32> {
        let mut plane = ImageF32::new(self.w, self.h);
        match self.channels {
            1 => {
                for (dst, &src) in plane.data.iter_mut().zip(self.data.iter()) {
                    *dst = src as f32 / 255.0;
                }
            }
            3 => {
                for (dst, px) in plane.data.iter_mut().zip(self.data.chunks_exact(3)) {
                    let luma =
                        LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
                    *dst = luma / 255.0;
                }
            }
            _ => return None,
        }
        Some(plane)
    }
}
