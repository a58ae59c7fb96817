//! Filter catalogue: identifiers, specs, registry, and the detectors.
//!
//! Structure
//! - [`id`] – the closed identifier set.
//! - [`spec`] – static descriptors binding schema, control table, transform.
//! - [`registry`] – identifier → spec lookup, the single extension point.
//! - [`grad`] – directional gradient detectors (Sobel/Scharr/Prewitt/Farid).
//! - [`canny`] – quantile-thresholded hysteresis edges.
//! - [`ridge`] – multiscale ridge/vesselness detectors plus the
//!   parameterless single-scale ridge map.
//! - [`smooth`] – separable convolution and Gaussian blur shared by the
//!   detectors.
//! - [`normalize`] – response → displayable 8-bit raster policies.

pub mod canny;
pub mod grad;
pub mod id;
pub mod normalize;
pub mod registry;
pub mod ridge;
pub mod smooth;
pub mod spec;

pub use id::FilterId;
pub use registry::FilterRegistry;
pub use spec::{FilterSpec, MaskImage, Response, TransformFn};

use crate::controls::Binding;
use crate::error::FilterError;
use crate::params::{ParamKind, ParamSchema, ParamSpec};

pub(crate) fn transform_failed(id: FilterId, message: impl Into<String>) -> FilterError {
    FilterError::TransformExecution {
        filter: id.as_str().to_string(),
        message: message.into(),
    }
}

const DIRECTIONS: &[&str] = &["combined", "vertical", "horizontal"];
const KERNEL_SIZES: &[i64] = &[3, 5, 7];

/// Slider positions 1/2/3 map to kernel sizes (and Canny sigmas) 3/5/7.
const SIZE_LOOKUP: &[(i64, i64)] = &[(1, 3), (2, 5), (3, 7)];

const DIRECTION_BINDINGS: &[Binding] = &[Binding::ChoiceGroup {
    widget: "dim_groupbox",
    param: "direction",
}];

const SOBEL_BINDINGS: &[Binding] = &[
    Binding::LookupSlider {
        widget: "kernel_size_slider",
        param: "kernel_size",
        lookup: SIZE_LOOKUP,
    },
    Binding::ChoiceGroup {
        widget: "dim_groupbox",
        param: "direction",
    },
];

const CANNY_BINDINGS: &[Binding] = &[
    Binding::LookupSlider {
        widget: "sigma_slider",
        param: "sigma",
        lookup: SIZE_LOOKUP,
    },
    Binding::RangeSlider {
        widget: "hysteresis_slider",
        low_param: "threshold1",
        high_param: "threshold2",
    },
];

const RIDGE_BINDINGS: &[Binding] = &[
    Binding::Slider {
        widget: "sigma_value_slider",
        param: "sigmas",
    },
    Binding::Checkbox {
        widget: "black_ridges_checkbox",
        param: "black_ridges",
    },
];

fn direction_param() -> ParamSpec {
    ParamSpec {
        name: "direction",
        kind: ParamKind::Choice(DIRECTIONS),
    }
}

fn sobel_schema() -> ParamSchema {
    ParamSchema::new(vec![
        ParamSpec {
            name: "kernel_size",
            kind: ParamKind::IntSet(KERNEL_SIZES),
        },
        direction_param(),
    ])
}

fn direction_schema() -> ParamSchema {
    ParamSchema::new(vec![direction_param()])
}

fn canny_schema() -> ParamSchema {
    ParamSchema::new(vec![
        ParamSpec {
            name: "threshold1",
            kind: ParamKind::FloatRange { min: 0.0, max: 1.0 },
        },
        ParamSpec {
            name: "threshold2",
            kind: ParamKind::FloatRange { min: 0.0, max: 1.0 },
        },
        ParamSpec {
            name: "sigma",
            kind: ParamKind::FloatRange {
                min: 0.0,
                max: 16.0,
            },
        },
    ])
}

fn ridge_schema() -> ParamSchema {
    ParamSchema::new(vec![
        ParamSpec {
            name: "sigmas",
            kind: ParamKind::IntRange { min: 1, max: 16 },
        },
        ParamSpec {
            name: "black_ridges",
            kind: ParamKind::Bool,
        },
    ])
}

/// Build the full built-in filter set, one spec per identifier.
pub fn builtin_specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::new(
            FilterId::Sobel,
            sobel_schema(),
            SOBEL_BINDINGS,
            grad::sobel_transform,
        ),
        FilterSpec::new(
            FilterId::Scharr,
            direction_schema(),
            DIRECTION_BINDINGS,
            grad::scharr_transform,
        ),
        FilterSpec::new(
            FilterId::Canny,
            canny_schema(),
            CANNY_BINDINGS,
            canny::canny_transform,
        ),
        FilterSpec::new(
            FilterId::Sato,
            ridge_schema(),
            RIDGE_BINDINGS,
            ridge::sato_transform,
        ),
        FilterSpec::new(
            FilterId::Meijering,
            ridge_schema(),
            RIDGE_BINDINGS,
            ridge::meijering_transform,
        ),
        FilterSpec::new(
            FilterId::Prewitt,
            direction_schema(),
            DIRECTION_BINDINGS,
            grad::prewitt_transform,
        ),
        FilterSpec::new(
            FilterId::Farid,
            direction_schema(),
            DIRECTION_BINDINGS,
            grad::farid_transform,
        ),
        FilterSpec::new(
            FilterId::Hessian,
            ridge_schema(),
            RIDGE_BINDINGS,
            ridge::hessian_transform,
        ),
        FilterSpec::new(
            FilterId::CvRidge,
            ParamSchema::empty(),
            &[],
            ridge::cv_ridge_transform,
        ),
    ]
}
