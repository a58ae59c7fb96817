//! Directional gradient detectors: Sobel, Scharr, Prewitt, Farid.
//!
//! Each detector is a separable derivative kernel: a differentiating tap row
//! along one axis combined with a smoothing tap row along the other. The
//! x-derivative responds to vertical structure and the y-derivative to
//! horizontal structure, which is exactly how the `direction` parameter maps:
//! `vertical` selects the x-derivative, `horizontal` the y-derivative, and
//! `combined` the Euclidean norm of both.
//!
//! Responses are signed floats; the pipeline min-max rescales them into the
//! displayable 8-bit range.
use super::id::FilterId;
use super::smooth::convolve_separable;
use super::spec::Response;
use super::transform_failed;
use crate::error::FilterError;
use crate::image::ImageF32;
use crate::params::ParamSet;

const SOBEL3_SMOOTH: &[f32] = &[1.0, 2.0, 1.0];
const SOBEL3_DERIV: &[f32] = &[-1.0, 0.0, 1.0];

const SOBEL5_SMOOTH: &[f32] = &[1.0, 4.0, 6.0, 4.0, 1.0];
const SOBEL5_DERIV: &[f32] = &[-1.0, -2.0, 0.0, 2.0, 1.0];

const SOBEL7_SMOOTH: &[f32] = &[1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0];
const SOBEL7_DERIV: &[f32] = &[-1.0, -4.0, -5.0, 0.0, 5.0, 4.0, 1.0];

const SCHARR_SMOOTH: &[f32] = &[3.0, 10.0, 3.0];
const SCHARR_DERIV: &[f32] = &[-1.0, 0.0, 1.0];

const PREWITT_SMOOTH: &[f32] = &[1.0, 1.0, 1.0];
const PREWITT_DERIV: &[f32] = &[-1.0, 0.0, 1.0];

// Farid & Simoncelli 5-tap interpolator/differentiator pair.
const FARID_SMOOTH: &[f32] = &[0.030320, 0.249724, 0.439911, 0.249724, 0.030320];
const FARID_DERIV: &[f32] = &[-0.104550, -0.292315, 0.0, 0.292315, 0.104550];

/// Separable derivative kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientKernel {
    Sobel3,
    Sobel5,
    Sobel7,
    Scharr,
    Prewitt,
    Farid,
}

impl GradientKernel {
    fn taps(&self) -> (&'static [f32], &'static [f32]) {
        match self {
            GradientKernel::Sobel3 => (SOBEL3_SMOOTH, SOBEL3_DERIV),
            GradientKernel::Sobel5 => (SOBEL5_SMOOTH, SOBEL5_DERIV),
            GradientKernel::Sobel7 => (SOBEL7_SMOOTH, SOBEL7_DERIV),
            GradientKernel::Scharr => (SCHARR_SMOOTH, SCHARR_DERIV),
            GradientKernel::Prewitt => (PREWITT_SMOOTH, PREWITT_DERIV),
            GradientKernel::Farid => (FARID_SMOOTH, FARID_DERIV),
        }
    }
}

/// Horizontal derivative: differentiate along x, smooth along y.
pub fn derivative_x(l: &ImageF32, kernel: GradientKernel) -> ImageF32 {
    let (smooth, deriv) = kernel.taps();
    convolve_separable(l, deriv, smooth)
}

/// Vertical derivative: differentiate along y, smooth along x.
pub fn derivative_y(l: &ImageF32, kernel: GradientKernel) -> ImageF32 {
    let (smooth, deriv) = kernel.taps();
    convolve_separable(l, smooth, deriv)
}

/// Per-pixel gradient planes.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with the x kernel)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with the y kernel)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

/// Compute both directional derivatives and their Euclidean magnitude.
pub fn image_gradients(l: &ImageF32, kernel: GradientKernel) -> Grad {
    let gx = derivative_x(l, kernel);
    let gy = derivative_y(l, kernel);
    let mut mag = ImageF32::new(l.w, l.h);
    for ((m, &x), &y) in mag.data.iter_mut().zip(gx.data.iter()).zip(gy.data.iter()) {
        *m = (x * x + y * y).sqrt();
    }
    Grad { gx, gy, mag }
}

fn directional_response(
    id: FilterId,
    l: &ImageF32,
    params: &ParamSet,
    kernel: GradientKernel,
) -> Result<Response, FilterError> {
    if l.w == 0 || l.h == 0 {
        return Err(transform_failed(id, "empty input image"));
    }
    match params.choice("direction")? {
        "combined" => Ok(Response::Gradient(image_gradients(l, kernel).mag)),
        "vertical" => Ok(Response::Gradient(derivative_x(l, kernel))),
        "horizontal" => Ok(Response::Gradient(derivative_y(l, kernel))),
        other => Err(FilterError::invalid_parameter(
            "direction",
            format!("'{other}' is not one of [\"combined\", \"vertical\", \"horizontal\"]"),
        )),
    }
}

pub(crate) fn sobel_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    let kernel = match params.int("kernel_size")? {
        3 => GradientKernel::Sobel3,
        5 => GradientKernel::Sobel5,
        7 => GradientKernel::Sobel7,
        other => {
            return Err(FilterError::invalid_parameter(
                "kernel_size",
                format!("{other} is not one of [3, 5, 7]"),
            ))
        }
    };
    directional_response(FilterId::Sobel, l, params, kernel)
}

pub(crate) fn scharr_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    directional_response(FilterId::Scharr, l, params, GradientKernel::Scharr)
}

pub(crate) fn prewitt_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    directional_response(FilterId::Prewitt, l, params, GradientKernel::Prewitt)
}

pub(crate) fn farid_transform(l: &ImageF32, params: &ParamSet) -> Result<Response, FilterError> {
    directional_response(FilterId::Farid, l, params, GradientKernel::Farid)
}
