//! JSON configuration for the `filter_tool` binary.

use crate::error::FilterError;
use crate::params::{ParamSchema, ParamSet, ParamSetBuilder, ParamValue};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FilterToolConfig {
    pub input: PathBuf,
    /// Stable filter name, e.g. `"sobel"` or `"cv_ridge"`.
    pub filter: String,
    /// Raw parameter map; conformed against the filter schema after the
    /// registry resolves the name.
    #[serde(default)]
    pub params: serde_json::Map<String, Value>,
    pub output: FilterOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FilterToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Conform a raw JSON parameter map into a schema-checked set.
pub fn params_from_json(
    schema: &ParamSchema,
    raw: &serde_json::Map<String, Value>,
) -> Result<ParamSet, FilterError> {
    if schema.is_empty() {
        // Parameterless filters: hand the payload through untouched so the
        // pipeline can apply its ignore-with-warning policy.
        let entries = raw
            .iter()
            .map(|(name, value)| Ok((name.clone(), json_value(name, value)?)))
            .collect::<Result<Vec<_>, FilterError>>()?;
        return Ok(ParamSet::from_entries(entries));
    }

    let mut builder = ParamSetBuilder::new(schema);
    for (name, value) in raw {
        builder = builder.set(name, json_value(name, value)?)?;
    }
    builder.build()
}

fn json_value(name: &str, value: &Value) -> Result<ParamValue, FilterError> {
    match value {
        Value::Bool(v) => Ok(ParamValue::Bool(*v)),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(ParamValue::Int(v))
            } else if let Some(v) = n.as_f64() {
                Ok(ParamValue::Float(v))
            } else {
                Err(FilterError::invalid_parameter(name, "unrepresentable number"))
            }
        }
        Value::String(v) => Ok(ParamValue::Choice(v.clone())),
        other => Err(FilterError::invalid_parameter(
            name,
            format!("unsupported JSON value {other}"),
        )),
    }
}
