//! Static filter descriptors: identifier, schema, control bindings, and the
//! transform entry point.
//!
//! Specs are created once when the registry is built and shared read-only by
//! every pipeline invocation afterwards.

use super::id::FilterId;
use crate::controls::Binding;
use crate::error::FilterError;
use crate::image::{ImageF32, RasterU8};
use crate::params::{ParamSchema, ParamSet};

/// Raw detector output before normalization.
///
/// The variant selects the normalization policy the pipeline applies:
/// min-max rescale for gradients, rescale-plus-equalization for ridge
/// responses, 0/255 mapping for boolean masks. An `EdgeMap` is already a
/// displayable 8-bit image and passes through untouched.
#[derive(Clone, Debug)]
pub enum Response {
    Gradient(ImageF32),
    Vesselness(ImageF32),
    Mask(MaskImage),
    EdgeMap(RasterU8),
}

/// Dense boolean edge mask, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl MaskImage {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = v;
    }
}

/// Detector entry point: single-channel [0, 1] plane plus validated
/// parameters in, raw response out.
pub type TransformFn = fn(&ImageF32, &ParamSet) -> Result<Response, FilterError>;

/// Immutable descriptor binding one identifier to its schema, its control
/// binding table, and its transform.
#[derive(Clone, Debug)]
pub struct FilterSpec {
    id: FilterId,
    schema: ParamSchema,
    bindings: &'static [Binding],
    transform: TransformFn,
}

impl FilterSpec {
    pub fn new(
        id: FilterId,
        schema: ParamSchema,
        bindings: &'static [Binding],
        transform: TransformFn,
    ) -> Self {
        Self {
            id,
            schema,
            bindings,
            transform,
        }
    }

    pub fn id(&self) -> FilterId {
        self.id
    }

    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    /// Widget-name → parameter-name table for the control extractor.
    pub fn bindings(&self) -> &'static [Binding] {
        self.bindings
    }

    pub(crate) fn run_transform(
        &self,
        plane: &ImageF32,
        params: &ParamSet,
    ) -> Result<Response, FilterError> {
        (self.transform)(plane, params)
    }
}
