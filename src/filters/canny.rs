//! Canny edge detection with quantile thresholds.
//!
//! Stages: Gaussian smoothing at `sigma`, Sobel gradients, direction-aligned
//! non-maximum suppression, then hysteresis from strong seeds through weak
//! pixels (8-connected).
//!
//! The two thresholds are quantiles of the gradient-magnitude distribution
//! rather than absolute magnitudes, so a threshold slider behaves the same
//! on low- and high-contrast images. `threshold1 > threshold2` is rejected
//! before any computation runs.
//!
//! Border handling: gradients clamp at the border, and NMS ignores the
//! outermost 1-pixel frame to avoid out-of-bounds neighbor lookups, so the
//! frame never carries edges.
use super::grad::{image_gradients, Grad, GradientKernel};
use super::id::FilterId;
use super::smooth::gaussian_blur;
use super::spec::{MaskImage, Response};
use super::transform_failed;
use crate::error::FilterError;
use crate::image::{ImageF32, ImageView};
use crate::params::ParamSet;

const TAN_22_5_DEG: f32 = 0.41421356237;

pub(crate) fn canny_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    let sigma = params.float("sigma")? as f32;
    let low_quantile = params.float("threshold1")?;
    let high_quantile = params.float("threshold2")?;
    if low_quantile > high_quantile {
        return Err(FilterError::invalid_parameter(
            "threshold1",
            format!("low quantile {low_quantile} exceeds threshold2 ({high_quantile})"),
        ));
    }
    if l.w == 0 || l.h == 0 {
        return Err(transform_failed(FilterId::Canny, "empty input image"));
    }
    Ok(Response::Mask(canny(
        l,
        sigma,
        low_quantile as f32,
        high_quantile as f32,
    )))
}

/// Run the full Canny chain on a [0, 1] plane.
pub fn canny(l: &ImageF32, sigma: f32, low_quantile: f32, high_quantile: f32) -> MaskImage {
    let smoothed = gaussian_blur(l, sigma);
    let grad = image_gradients(&smoothed, GradientKernel::Sobel3);

    let mut sorted = grad.mag.data.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let low_thresh = quantile(&sorted, low_quantile);
    let high_thresh = quantile(&sorted, high_quantile);

    let maxima = suppress_non_maxima(&grad);
    hysteresis(&grad.mag, &maxima, low_thresh, high_thresh)
}

/// Linear-interpolated quantile of an ascending-sorted slice, `q` in [0, 1].
fn quantile(sorted: &[f32], q: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f32;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Keep pixels whose magnitude dominates both neighbors along the quantized
/// gradient direction (ties break toward the trailing neighbor so a two-pixel
/// plateau keeps exactly one crest).
fn suppress_non_maxima(grad: &Grad) -> MaskImage {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut kept = MaskImage::new(w, h);
    if w < 3 || h < 3 {
        return kept;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag >= neighbor1 && mag > neighbor2 {
                kept.set(x, y, true);
            }
        }
    }

    kept
}

/// Grow edges from strong seeds (≥ `high_thresh`) through connected weak
/// pixels (≥ `low_thresh`), 8-neighborhood.
fn hysteresis(mag: &ImageF32, maxima: &MaskImage, low_thresh: f32, high_thresh: f32) -> MaskImage {
    let w = maxima.w;
    let h = maxima.h;
    let mut edges = MaskImage::new(w, h);
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if maxima.get(x, y) && mag.get(x, y) >= high_thresh && mag.get(x, y) > 0.0 {
                edges.set(x, y, true);
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if edges.get(nx, ny) || !maxima.get(nx, ny) {
                    continue;
                }
                if mag.get(nx, ny) >= low_thresh && mag.get(nx, ny) > 0.0 {
                    edges.set(nx, ny, true);
                    stack.push((nx, ny));
                }
            }
        }
    }

    edges
}
