//! Separable convolution and Gaussian smoothing.
//!
//! - Kernels are 1D tap slices applied horizontally then vertically.
//! - Boundary handling uses clamping (replicate border).
//! - Gaussian taps are derived from sigma with a 3-sigma support radius and
//!   normalized to unit sum.
//!
//! Complexity: O(W·H·K) per pass with two 1D passes.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Convolve with a separable kernel pair: `hx` along x, `hy` along y.
///
/// Tap slices must have odd length. The anchor is the central tap.
pub(crate) fn convolve_separable(l: &ImageF32, hx: &[f32], hy: &[f32]) -> ImageF32 {
    let tmp = convolve_rows(l, hx);
    convolve_cols(&tmp, hy)
}

fn convolve_rows(l: &ImageF32, taps: &[f32]) -> ImageF32 {
    let w = l.w;
    let h = l.h;
    let half = taps.len() / 2;
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let row = l.row(y);
        let out_row = out.row_mut(y);
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = (x + k).saturating_sub(half).min(w - 1);
                sum += row[sx] * tap;
            }
            out_row[x] = sum;
        }
    }
    out
}

fn convolve_cols(l: &ImageF32, taps: &[f32]) -> ImageF32 {
    let w = l.w;
    let h = l.h;
    let half = taps.len() / 2;
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let out_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = (y + k).saturating_sub(half).min(h - 1);
            let src_row = l.row(sy);
            for x in 0..w {
                out_row[x] += src_row[x] * tap;
            }
        }
    }
    out
}

/// Normalized Gaussian taps for `sigma`, odd length with 3-sigma support.
pub(crate) fn gaussian_taps(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (3.0 * sigma).ceil() as usize;
    let mut taps: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    for tap in taps.iter_mut() {
        *tap /= sum;
    }
    taps
}

/// Separable Gaussian blur with replicate borders.
pub fn gaussian_blur(l: &ImageF32, sigma: f32) -> ImageF32 {
    let taps = gaussian_taps(sigma);
    convolve_separable(l, &taps, &taps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalized_and_odd() {
        for sigma in [0.5, 1.0, 3.0] {
            let taps = gaussian_taps(sigma);
            assert_eq!(taps.len() % 2, 1);
            let sum: f32 = taps.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn blur_preserves_constant_plane() {
        let mut l = ImageF32::new(8, 8);
        for v in l.data.iter_mut() {
            *v = 0.5;
        }
        let blurred = gaussian_blur(&l, 1.5);
        for &v in &blurred.data {
            assert!((v - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut l = ImageF32::new(9, 9);
        l.set(4, 4, 1.0);
        let blurred = gaussian_blur(&l, 1.0);
        assert!(blurred.get(4, 4) < 1.0);
        assert!(blurred.get(3, 4) > 0.0);
        let total: f32 = blurred.data.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }
}
