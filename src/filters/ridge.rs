//! Ridge and vesselness detectors: Hessian (Frangi-style), Sato, Meijering,
//! and the parameterless single-scale ridge map.
//!
//! The multiscale detectors share one chain per scale: Gaussian smoothing at
//! sigma, scale-normalized second derivatives by central differences, 2×2
//! symmetric eigen-decomposition per pixel, and a per-filter response from
//! the eigenvalue pair. The final plane is the pixel-wise maximum across the
//! integer scale sweep 1..=sigmas. `black_ridges` inverts the plane before
//! the sweep so dark structures respond like bright ones.
//!
//! Raw responses have poor native contrast; the pipeline rescales and
//! histogram-equalizes them (the `Vesselness` normalization class).
use super::grad::{derivative_x, derivative_y, GradientKernel};
use super::id::FilterId;
use super::smooth::gaussian_blur;
use super::spec::Response;
use super::transform_failed;
use crate::error::FilterError;
use crate::image::{ImageF32, RasterU8};
use crate::params::ParamSet;
use nalgebra::Matrix2;

/// Response profile of the multiscale ridge family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RidgeKind {
    /// Frangi-style vesselness from the Hessian eigenvalue ratio.
    Hessian,
    /// Negated principal curvature (Sato).
    Sato,
    /// Neuriteness-weighted principal curvature (Meijering).
    Meijering,
}

struct HessianPlanes {
    fxx: ImageF32,
    fxy: ImageF32,
    fyy: ImageF32,
}

/// Scale-normalized second derivatives of the sigma-smoothed plane.
fn hessian_planes(l: &ImageF32, sigma: f32) -> HessianPlanes {
    let smoothed = gaussian_blur(l, sigma);
    let scale = sigma * sigma;
    let fx = central_diff_x(&smoothed);
    let fy = central_diff_y(&smoothed);
    HessianPlanes {
        fxx: central_diff_x(&fx).map(|v| v * scale),
        fxy: central_diff_y(&fx).map(|v| v * scale),
        fyy: central_diff_y(&fy).map(|v| v * scale),
    }
}

fn central_diff_x(l: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(l.w, l.h);
    if l.w == 0 || l.h == 0 {
        return out;
    }
    for y in 0..l.h {
        for x in 0..l.w {
            let xm = x.saturating_sub(1);
            let xp = (x + 1).min(l.w - 1);
            out.set(x, y, (l.get(xp, y) - l.get(xm, y)) * 0.5);
        }
    }
    out
}

fn central_diff_y(l: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(l.w, l.h);
    if l.w == 0 || l.h == 0 {
        return out;
    }
    for y in 0..l.h {
        let ym = y.saturating_sub(1);
        let yp = (y + 1).min(l.h - 1);
        for x in 0..l.w {
            out.set(x, y, (l.get(x, yp) - l.get(x, ym)) * 0.5);
        }
    }
    out
}

/// Eigenvalues of the per-pixel Hessian, ordered by ascending magnitude.
fn eigenvalue_planes(planes: &HessianPlanes) -> (Vec<f32>, Vec<f32>) {
    let count = planes.fxx.data.len();
    let mut lam_small = vec![0.0f32; count];
    let mut lam_large = vec![0.0f32; count];
    for i in 0..count {
        let m = Matrix2::new(
            planes.fxx.data[i],
            planes.fxy.data[i],
            planes.fxy.data[i],
            planes.fyy.data[i],
        );
        let eig = m.symmetric_eigen().eigenvalues;
        let (e0, e1) = (eig[0], eig[1]);
        if e0.abs() <= e1.abs() {
            lam_small[i] = e0;
            lam_large[i] = e1;
        } else {
            lam_small[i] = e1;
            lam_large[i] = e0;
        }
    }
    (lam_small, lam_large)
}

/// Single-scale response for one ridge profile.
fn scale_response(l: &ImageF32, sigma: f32, kind: RidgeKind) -> ImageF32 {
    let planes = hessian_planes(l, sigma);
    let (lam_small, lam_large) = eigenvalue_planes(&planes);

    let mut out = ImageF32::new(l.w, l.h);
    match kind {
        RidgeKind::Sato => {
            for (o, &lam) in out.data.iter_mut().zip(lam_large.iter()) {
                if lam < 0.0 {
                    *o = -lam;
                }
            }
        }
        RidgeKind::Meijering => {
            for ((o, &big), &small) in out
                .data
                .iter_mut()
                .zip(lam_large.iter())
                .zip(lam_small.iter())
            {
                let modified = big + small / 3.0;
                if modified < 0.0 {
                    *o = -modified;
                }
            }
        }
        RidgeKind::Hessian => {
            // Frangi: blobness ratio gated by overall second-order structure;
            // gamma follows the half-of-max-norm convention.
            const BETA: f32 = 0.5;
            let max_norm = lam_small
                .iter()
                .zip(lam_large.iter())
                .map(|(&s, &b)| (s * s + b * b).sqrt())
                .fold(0.0f32, f32::max);
            if max_norm <= 0.0 {
                return out;
            }
            let gamma = max_norm * 0.5;
            for ((o, &big), &small) in out
                .data
                .iter_mut()
                .zip(lam_large.iter())
                .zip(lam_small.iter())
            {
                if big >= 0.0 {
                    continue;
                }
                let rb = small.abs() / big.abs();
                let s2 = small * small + big * big;
                *o = (-rb * rb / (2.0 * BETA * BETA)).exp()
                    * (1.0 - (-s2 / (2.0 * gamma * gamma)).exp());
            }
        }
    }
    out
}

fn max_planes(mut acc: ImageF32, next: ImageF32) -> ImageF32 {
    for (a, &n) in acc.data.iter_mut().zip(next.data.iter()) {
        if n > *a {
            *a = n;
        }
    }
    acc
}

/// Pixel-wise maximum response over the integer scale sweep 1..=`max_sigma`.
#[cfg(not(feature = "parallel"))]
pub fn multiscale_response(
    l: &ImageF32,
    max_sigma: u32,
    black_ridges: bool,
    kind: RidgeKind,
) -> ImageF32 {
    let plane = prepare_plane(l, black_ridges);
    (1..=max_sigma.max(1))
        .map(|s| scale_response(&plane, s as f32, kind))
        .fold(ImageF32::new(l.w, l.h), max_planes)
}

/// Pixel-wise maximum response over the integer scale sweep 1..=`max_sigma`.
#[cfg(feature = "parallel")]
pub fn multiscale_response(
    l: &ImageF32,
    max_sigma: u32,
    black_ridges: bool,
    kind: RidgeKind,
) -> ImageF32 {
    use rayon::prelude::*;

    let plane = prepare_plane(l, black_ridges);
    (1..=max_sigma.max(1))
        .into_par_iter()
        .map(|s| scale_response(&plane, s as f32, kind))
        .reduce(|| ImageF32::new(l.w, l.h), max_planes)
}

fn prepare_plane(l: &ImageF32, black_ridges: bool) -> ImageF32 {
    if black_ridges {
        l.map(|v| 1.0 - v)
    } else {
        l.clone()
    }
}

fn ridge_transform(
    id: FilterId,
    kind: RidgeKind,
    l: &ImageF32,
    params: &ParamSet,
) -> Result<Response, FilterError> {
    let sigmas = params.int("sigmas")?;
    let black_ridges = params.bool("black_ridges")?;
    if l.w == 0 || l.h == 0 {
        return Err(transform_failed(id, "empty input image"));
    }
    Ok(Response::Vesselness(multiscale_response(
        l,
        sigmas.max(1) as u32,
        black_ridges,
        kind,
    )))
}

pub(crate) fn hessian_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    ridge_transform(FilterId::Hessian, RidgeKind::Hessian, l, params)
}

pub(crate) fn sato_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    ridge_transform(FilterId::Sato, RidgeKind::Sato, l, params)
}

pub(crate) fn meijering_transform(
    l: &ImageF32,
    params: &ParamSet,
) -> Result<Response, FilterError> {
    ridge_transform(FilterId::Meijering, RidgeKind::Meijering, l, params)
}

/// Parameterless single-scale ridge map: maximum eigenvalue of the Sobel
/// Hessian, saturated into an 8-bit edge map. Any settings payload was
/// already dropped by the pipeline.
pub(crate) fn cv_ridge_transform(l: &ImageF32, _params: &ParamSet) -> Result<Response, FilterError> {
    if l.w == 0 || l.h == 0 {
        return Err(transform_failed(FilterId::CvRidge, "empty input image"));
    }

    let dx = derivative_x(l, GradientKernel::Sobel3);
    let dxx = derivative_x(&dx, GradientKernel::Sobel3);
    let dxy = derivative_y(&dx, GradientKernel::Sobel3);
    let dyy = derivative_y(&derivative_y(l, GradientKernel::Sobel3), GradientKernel::Sobel3);

    let mut data = Vec::with_capacity(l.w * l.h);
    for i in 0..l.w * l.h {
        let (xx, xy, yy) = (dxx.data[i], dxy.data[i], dyy.data[i]);
        let root = ((xx - yy) * (xx - yy) + 4.0 * xy * xy).sqrt();
        let lam_max = 0.5 * ((xx + yy) + root);
        data.push((lam_max * 255.0).clamp(0.0, 255.0).round() as u8);
    }
    let raster = RasterU8::from_raw(l.w, l.h, 1, data)
        .ok_or_else(|| transform_failed(FilterId::CvRidge, "inconsistent response buffer"))?;
    Ok(Response::EdgeMap(raster))
}
