//! Normalization of raw detector responses into displayable 8-bit rasters.
//!
//! Three policies, selected by the response class:
//! - min-max rescale into [0, 255] for signed/floating gradient responses,
//! - min-max rescale followed by histogram equalization for ridge responses
//!   (raw vesselness is a near-constant-range float with poor contrast),
//! - 0/255 mapping for boolean masks.
//!
//! A constant response rescales to all-zero, so a blank input image stays
//! blank through every filter.
use super::spec::MaskImage;
use crate::image::{ImageF32, ImageView, RasterU8};

/// Min-max rescale a float plane into an 8-bit raster.
pub fn min_max_to_u8(resp: &ImageF32) -> RasterU8 {
    let mut out = RasterU8::new_gray(resp.w, resp.h);
    let Some(slice) = resp.as_slice() else {
        return out;
    };
    if slice.is_empty() {
        return out;
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in slice {
        min = min.min(v);
        max = max.max(v);
    }
    if !(max > min) {
        return out;
    }

    let scale = 255.0 / (max - min);
    for y in 0..resp.h {
        let row = resp.row(y);
        for (x, &v) in row.iter().enumerate() {
            out.put_sample(x, y, 0, ((v - min) * scale).round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Ridge normalization: rescale to [0, 255] then equalize the histogram.
pub fn vesselness_to_u8(resp: &ImageF32) -> RasterU8 {
    let mut out = min_max_to_u8(resp);
    equalize_hist(&mut out);
    out
}

/// In-place histogram equalization of a single-channel raster.
///
/// A constant image is left unchanged (there is no contrast to spread).
pub fn equalize_hist(raster: &mut RasterU8) {
    debug_assert_eq!(raster.channels(), 1);
    let total = raster.width() * raster.height();
    if total == 0 {
        return;
    }

    let mut hist = [0usize; 256];
    for &v in raster.data() {
        hist[v as usize] += 1;
    }

    let first_count = match hist.iter().find(|&&c| c > 0) {
        Some(&c) => c,
        None => return,
    };
    if first_count == total {
        return;
    }

    let scale = 255.0 / (total - first_count) as f64;
    let mut lut = [0u8; 256];
    let mut cdf = 0usize;
    for (v, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[v] = (((cdf - first_count.min(cdf)) as f64) * scale).round().min(255.0) as u8;
    }

    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let v = raster.sample(x, y, 0);
            raster.put_sample(x, y, 0, lut[v as usize]);
        }
    }
}

/// Convert a boolean edge mask to 0/255 samples.
pub fn mask_to_u8(mask: &MaskImage) -> RasterU8 {
    let data = mask.data.iter().map(|&v| if v { 255 } else { 0 }).collect();
    RasterU8::from_raw(mask.w, mask.h, 1, data).expect("mask dimensions are consistent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_spans_the_full_range() {
        let mut resp = ImageF32::new(3, 1);
        resp.set(0, 0, -2.0);
        resp.set(1, 0, 0.0);
        resp.set(2, 0, 2.0);
        let out = min_max_to_u8(&resp);
        assert_eq!(out.data(), &[0, 128, 255]);
    }

    #[test]
    fn constant_response_maps_to_zero() {
        let mut resp = ImageF32::new(4, 4);
        for v in resp.data.iter_mut() {
            *v = 3.25;
        }
        let out = min_max_to_u8(&resp);
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn equalize_leaves_constant_rasters_alone() {
        let mut raster = RasterU8::from_raw(2, 2, 1, vec![7; 4]).unwrap();
        equalize_hist(&mut raster);
        assert_eq!(raster.data(), &[7, 7, 7, 7]);
    }

    #[test]
    fn equalize_spreads_a_two_level_histogram() {
        let mut raster = RasterU8::from_raw(4, 1, 1, vec![10, 10, 20, 20]).unwrap();
        equalize_hist(&mut raster);
        assert_eq!(raster.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn mask_maps_true_to_white() {
        let mut mask = MaskImage::new(2, 1);
        mask.set(1, 0, true);
        let out = mask_to_u8(&mask);
        assert_eq!(out.data(), &[0, 255]);
    }
}
