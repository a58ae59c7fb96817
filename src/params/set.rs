//! Immutable parameter sets and the schema-checked builder.

use super::schema::ParamSchema;
use super::value::ParamValue;
use crate::error::FilterError;

/// An ordered name→value mapping conforming to one filter schema.
///
/// Built fresh per apply action and never mutated afterwards — a new apply
/// replaces the whole set. Typed accessors fail with `InvalidParameter`
/// naming the offending key, so transforms never index blindly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    /// An empty set, used by parameterless filters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a set from raw entries without schema checking.
    ///
    /// Validation still happens inside the pipeline; this exists for callers
    /// that assemble sets outside the builder (tests, foreign boundaries).
    pub fn from_entries(entries: Vec<(String, ParamValue)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Ordered list of parameter names, mostly for reporting.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn int(&self, name: &str) -> Result<i64, FilterError> {
        match self.get(name) {
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(other) => Err(FilterError::invalid_parameter(
                name,
                format!("expected integer, got {}", other.kind_label()),
            )),
            None => Err(FilterError::invalid_parameter(
                name,
                "missing required parameter",
            )),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool, FilterError> {
        match self.get(name) {
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(other) => Err(FilterError::invalid_parameter(
                name,
                format!("expected boolean, got {}", other.kind_label()),
            )),
            None => Err(FilterError::invalid_parameter(
                name,
                "missing required parameter",
            )),
        }
    }

    pub fn choice(&self, name: &str) -> Result<&str, FilterError> {
        match self.get(name) {
            Some(ParamValue::Choice(v)) => Ok(v.as_str()),
            Some(other) => Err(FilterError::invalid_parameter(
                name,
                format!("expected string, got {}", other.kind_label()),
            )),
            None => Err(FilterError::invalid_parameter(
                name,
                "missing required parameter",
            )),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, FilterError> {
        match self.get(name) {
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            Some(other) => Err(FilterError::invalid_parameter(
                name,
                format!("expected float, got {}", other.kind_label()),
            )),
            None => Err(FilterError::invalid_parameter(
                name,
                "missing required parameter",
            )),
        }
    }
}

/// Schema-checked builder — the explicit replacement for widget
/// introspection. Each `set` call conforms the value against the declared
/// kind, and `build` requires every declared parameter to be present.
#[derive(Debug)]
pub struct ParamSetBuilder<'a> {
    schema: &'a ParamSchema,
    entries: Vec<(String, ParamValue)>,
}

impl<'a> ParamSetBuilder<'a> {
    pub fn new(schema: &'a ParamSchema) -> Self {
        Self {
            schema,
            entries: Vec::with_capacity(schema.len()),
        }
    }

    /// Set one parameter, replacing an earlier value for the same name.
    pub fn set(mut self, name: &str, value: ParamValue) -> Result<Self, FilterError> {
        let spec = self.schema.spec(name).ok_or_else(|| {
            FilterError::invalid_parameter(name, "not declared by the filter schema")
        })?;
        let value = spec
            .kind
            .conform(value)
            .map_err(|reason| FilterError::invalid_parameter(name, reason))?;
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find_map(|(n, v)| (n.as_str() == name).then_some(v))
        {
            *slot = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
        Ok(self)
    }

    /// Finish the set, ordered by schema declaration order.
    pub fn build(self) -> Result<ParamSet, FilterError> {
        let mut ordered = Vec::with_capacity(self.schema.len());
        for spec in self.schema.iter() {
            let value = self
                .entries
                .iter()
                .find_map(|(n, v)| (n == spec.name).then_some(v.clone()))
                .ok_or_else(|| {
                    FilterError::invalid_parameter(spec.name, "missing required parameter")
                })?;
            ordered.push((spec.name.to_string(), value));
        }
        Ok(ParamSet { entries: ordered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::schema::{ParamKind, ParamSpec};

    fn schema() -> ParamSchema {
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

    #[test]
    fn builder_orders_by_schema_declaration() {
        let schema = schema();
        let set = ParamSetBuilder::new(&schema)
            .set("black_ridges", ParamValue::Bool(true))
            .unwrap()
            .set("sigmas", ParamValue::Int(4))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(set.names(), vec!["sigmas", "black_ridges"]);
    }

    #[test]
    fn builder_rejects_undeclared_name() {
        let schema = schema();
        let err = ParamSetBuilder::new(&schema)
            .set("sigma", ParamValue::Int(4))
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidParameter { ref name, .. } if name == "sigma"
        ));
    }

    #[test]
    fn builder_rejects_out_of_range_value() {
        let schema = schema();
        assert!(ParamSetBuilder::new(&schema)
            .set("sigmas", ParamValue::Int(0))
            .is_err());
    }

    #[test]
    fn build_requires_every_declared_parameter() {
        let schema = schema();
        let err = ParamSetBuilder::new(&schema)
            .set("sigmas", ParamValue::Int(4))
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidParameter { ref name, .. } if name == "black_ridges"
        ));
    }

    #[test]
    fn typed_accessors_name_the_offending_key() {
        let set = ParamSet::from_entries(vec![("sigmas".into(), ParamValue::Int(4))]);
        assert_eq!(set.int("sigmas").unwrap(), 4);
        let err = set.bool("sigmas").unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidParameter { ref name, .. } if name == "sigmas"
        ));
    }
}
