use serde::{Deserialize, Serialize};

/// A single parameter value, as produced by the control extractor or parsed
/// from a tool config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Choice(String),
    Float(f64),
}

impl ParamValue {
    /// Human-readable kind label used in validation messages.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Choice(_) => "string",
            ParamValue::Float(_) => "float",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Choice(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}
