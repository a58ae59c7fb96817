#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod controls;
pub mod error;
pub mod filters;
pub mod image;
pub mod params;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + registry.
pub use crate::filters::{FilterId, FilterRegistry, FilterSpec};
pub use crate::pipeline::FilterPipeline;

// Error taxonomy shared by every operation.
pub use crate::error::FilterError;

// Parameter plumbing used at the UI boundary.
pub use crate::controls::{extract, ControlPanel, ControlState};
pub use crate::params::{ParamSet, ParamSetBuilder, ParamValue};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use edge_detector::prelude::*;
///
/// # fn main() -> Result<(), FilterError> {
/// let pipeline = FilterPipeline::with_builtin_filters();
/// let raster = RasterU8::new_gray(640, 480);
/// let out = pipeline.run("cv_ridge", &raster, &ParamSet::empty())?;
/// println!("{}x{}", out.width(), out.height());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::error::FilterError;
    pub use crate::filters::{FilterId, FilterRegistry};
    pub use crate::image::RasterU8;
    pub use crate::params::{ParamSet, ParamSetBuilder, ParamValue};
    pub use crate::pipeline::FilterPipeline;
}
