//! Parameter schemas: the declared names, kinds, and constraints per filter.
//!
//! Schemas are static — they are assembled once when the registry is built
//! and shared read-only by every validation and extraction pass. Declaration
//! order is preserved so extracted sets iterate the way the control surface
//! lays its widgets out.

use super::value::ParamValue;
use crate::error::FilterError;

/// Kind and constraint of a single parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    /// Integer restricted to an explicit allowed set (e.g. kernel sizes).
    IntSet(&'static [i64]),
    /// Integer within inclusive bounds.
    IntRange { min: i64, max: i64 },
    Bool,
    /// One of a closed set of lower-cased labels.
    Choice(&'static [&'static str]),
    /// Float within inclusive bounds.
    FloatRange { min: f64, max: f64 },
}

impl ParamKind {
    /// Check `value` against this kind, coercing where the kind allows it
    /// (an integer is accepted for a float-range parameter).
    ///
    /// Returns the conformed value, or a reason string on mismatch.
    pub fn conform(&self, value: ParamValue) -> Result<ParamValue, String> {
        match (self, value) {
            (ParamKind::IntSet(allowed), ParamValue::Int(v)) => {
                if allowed.contains(&v) {
                    Ok(ParamValue::Int(v))
                } else {
                    Err(format!("{v} is not one of {allowed:?}"))
                }
            }
            (ParamKind::IntRange { min, max }, ParamValue::Int(v)) => {
                if (*min..=*max).contains(&v) {
                    Ok(ParamValue::Int(v))
                } else {
                    Err(format!("{v} is outside [{min}, {max}]"))
                }
            }
            (ParamKind::Bool, ParamValue::Bool(v)) => Ok(ParamValue::Bool(v)),
            (ParamKind::Choice(options), ParamValue::Choice(v)) => {
                if options.contains(&v.as_str()) {
                    Ok(ParamValue::Choice(v))
                } else {
                    Err(format!("'{v}' is not one of {options:?}"))
                }
            }
            (ParamKind::FloatRange { min, max }, ParamValue::Float(v)) => {
                if v.is_finite() && (*min..=*max).contains(&v) {
                    Ok(ParamValue::Float(v))
                } else {
                    Err(format!("{v} is outside [{min}, {max}]"))
                }
            }
            (ParamKind::FloatRange { .. }, ParamValue::Int(v)) => {
                self.conform(ParamValue::Float(v as f64))
            }
            (_, value) => Err(format!(
                "expected {}, got {} value '{value}'",
                self.label(),
                value.kind_label()
            )),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ParamKind::IntSet(_) | ParamKind::IntRange { .. } => "integer",
            ParamKind::Bool => "boolean",
            ParamKind::Choice(_) => "string",
            ParamKind::FloatRange { .. } => "float",
        }
    }
}

/// One declared parameter: name plus kind/constraint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

/// Ordered list of parameter declarations for one filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamSchema {
    specs: Vec<ParamSpec>,
}

impl ParamSchema {
    /// An empty schema for parameterless filters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(specs: Vec<ParamSpec>) -> Self {
        Self { specs }
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.specs.iter()
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Validate a parameter set: every declared name present with a
    /// conforming value, and no undeclared keys.
    pub fn validate(&self, params: &super::ParamSet) -> Result<(), FilterError> {
        for spec in &self.specs {
            let value = params.get(spec.name).ok_or_else(|| {
                FilterError::invalid_parameter(spec.name, "missing required parameter")
            })?;
            spec.kind
                .conform(value.clone())
                .map_err(|reason| FilterError::invalid_parameter(spec.name, reason))?;
        }
        for (name, _) in params.iter() {
            if self.spec(name).is_none() {
                return Err(FilterError::invalid_parameter(
                    name,
                    "not declared by the filter schema",
                ));
            }
        }
        Ok(())
    }
}
