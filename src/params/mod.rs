//! Typed filter parameters: values, per-filter schemas, and immutable sets.
//!
//! A `ParamSchema` declares the parameters one filter accepts (ordered, with
//! kinds and constraints). A `ParamSet` is built fresh per apply action —
//! either by the control extractor or from a JSON config — and is never
//! mutated afterwards. The schema-checked `ParamSetBuilder` is the only
//! construction path, so a successfully built set always conforms to exactly
//! one schema.

pub mod schema;
pub mod set;
pub mod value;

pub use schema::{ParamKind, ParamSchema, ParamSpec};
pub use set::{ParamSet, ParamSetBuilder};
pub use value::ParamValue;
