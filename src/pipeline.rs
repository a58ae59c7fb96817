//! Filter pipeline orchestrating end-to-end invocation.
//!
//! One call runs to completion before returning: resolve the spec, validate
//! the parameter set against its schema, convert the raster to a grayscale
//! working plane, run the transform, normalize the raw response into a
//! displayable 8-bit raster. Synchronous and stateless per invocation — the
//! registry is immutable after construction and nothing is cached between
//! calls, so concurrent invocations need no locking.
//!
//! Typical usage:
//! ```no_run
//! use edge_detector::pipeline::FilterPipeline;
//! use edge_detector::image::RasterU8;
//! use edge_detector::params::ParamSet;
//!
//! # fn example(raster: RasterU8) {
//! let pipeline = FilterPipeline::with_builtin_filters();
//! match pipeline.run("cv_ridge", &raster, &ParamSet::empty()) {
//!     Ok(out) => println!("{}x{} ridge map", out.width(), out.height()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

use crate::error::FilterError;
use crate::filters::{normalize, FilterRegistry, FilterSpec, Response};
use crate::image::RasterU8;
use crate::params::ParamSet;
use log::{debug, warn};
use std::time::Instant;

pub struct FilterPipeline {
    registry: FilterRegistry,
}

impl FilterPipeline {
    /// Wrap an already-populated registry.
    pub fn new(registry: FilterRegistry) -> Self {
        Self { registry }
    }

    /// A pipeline over the full built-in filter set.
    pub fn with_builtin_filters() -> Self {
        Self::new(FilterRegistry::with_builtin_filters())
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Run one filter invocation: validate, convert, transform, normalize.
    ///
    /// The output is always a single-channel 8-bit raster with the input's
    /// dimensions. Any failure is returned as-is — no retries, no fallback
    /// image.
    pub fn run(
        &self,
        name: &str,
        raster: &RasterU8,
        params: &ParamSet,
    ) -> Result<RasterU8, FilterError> {
        let spec = self.registry.resolve(name)?;
        self.check_params(spec, params)?;

        let plane = raster.luma_plane().ok_or(FilterError::UnsupportedImage {
            channels: raster.channels(),
        })?;

        let start = Instant::now();
        let response = spec.run_transform(&plane, params)?;
        debug!(
            "{}: transform ran in {:.3} ms on {}x{}",
            spec.id(),
            start.elapsed().as_secs_f64() * 1000.0,
            plane.w,
            plane.h
        );

        Ok(match response {
            Response::Gradient(resp) => normalize::min_max_to_u8(&resp),
            Response::Vesselness(resp) => normalize::vesselness_to_u8(&resp),
            Response::Mask(mask) => normalize::mask_to_u8(&mask),
            Response::EdgeMap(raster) => raster,
        })
    }

    fn check_params(&self, spec: &FilterSpec, params: &ParamSet) -> Result<(), FilterError> {
        if spec.schema().is_empty() {
            // Parameterless filters accept and drop any payload.
            if !params.is_empty() {
                warn!(
                    "{}: ignoring {} parameter(s) supplied to a parameterless filter",
                    spec.id(),
                    params.len()
                );
            }
            return Ok(());
        }
        spec.schema().validate(params)
    }
}
