//! Parameter extraction from a UI-style control surface.
//!
//! The out-of-scope UI layer owns real widgets; the core only sees a
//! [`ControlPanel`] — a named snapshot of control states — plus the active
//! filter's binding table ([`Binding`], owned by the `FilterSpec`). The
//! binding table replaces runtime widget introspection: each entry says
//! which widget feeds which parameter and how to read it.
//!
//! Extraction is a pure function of `(panel, spec)`: it never touches the
//! image, and calling it twice without a state change yields an identical
//! `ParamSet`. The result goes through the schema-checked builder, so a
//! successful extraction always contains exactly the schema's keys.

use crate::error::FilterError;
use crate::filters::FilterSpec;
use crate::params::{ParamKind, ParamSet, ParamSetBuilder, ParamValue};

/// Snapshot of one control's state.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlState {
    /// Plain bounded slider; the position is the value.
    Slider { position: i64 },
    /// Two-state checkbox.
    Checkbox { checked: bool },
    /// Mutually-exclusive choice group. One option is always selected —
    /// panels are constructed with a default selection, never empty.
    ChoiceGroup {
        options: Vec<String>,
        selected: usize,
    },
    /// Dual-ended range control with both ends in [0, 100].
    RangeSlider { low: i64, high: i64 },
}

/// Named control states, keyed the way the UI names its widgets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlPanel {
    controls: Vec<(String, ControlState)>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one control's state.
    pub fn insert(&mut self, widget: impl Into<String>, state: ControlState) {
        let widget = widget.into();
        if let Some(slot) = self
            .controls
            .iter_mut()
            .find_map(|(n, s)| (*n == widget).then_some(s))
        {
            *slot = state;
        } else {
            self.controls.push((widget, state));
        }
    }

    pub fn control(&self, widget: &str) -> Option<&ControlState> {
        self.controls
            .iter()
            .find_map(|(n, s)| (n == widget).then_some(s))
    }
}

/// One row of the widget-name → parameter-name table.
///
/// The variant also declares how the widget is read, so extraction needs no
/// runtime type inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Binding {
    /// Slider position used as-is.
    Slider {
        widget: &'static str,
        param: &'static str,
    },
    /// Slider position mapped through a discrete lookup
    /// (e.g. positions 1/2/3 → kernel sizes 3/5/7).
    LookupSlider {
        widget: &'static str,
        param: &'static str,
        lookup: &'static [(i64, i64)],
    },
    Checkbox {
        widget: &'static str,
        param: &'static str,
    },
    /// Choice group; the selected label is lower-cased into the value.
    ChoiceGroup {
        widget: &'static str,
        param: &'static str,
    },
    /// Dual-ended range; low/high are normalized by /100 into a pair of
    /// float parameters.
    RangeSlider {
        widget: &'static str,
        low_param: &'static str,
        high_param: &'static str,
    },
}

impl Binding {
    fn widget(&self) -> &'static str {
        match self {
            Binding::Slider { widget, .. }
            | Binding::LookupSlider { widget, .. }
            | Binding::Checkbox { widget, .. }
            | Binding::ChoiceGroup { widget, .. }
            | Binding::RangeSlider { widget, .. } => widget,
        }
    }

    fn first_param(&self) -> &'static str {
        match self {
            Binding::Slider { param, .. }
            | Binding::LookupSlider { param, .. }
            | Binding::Checkbox { param, .. }
            | Binding::ChoiceGroup { param, .. } => param,
            Binding::RangeSlider { low_param, .. } => low_param,
        }
    }
}

/// Read the current control states into a schema-conforming parameter set.
pub fn extract(panel: &ControlPanel, spec: &FilterSpec) -> Result<ParamSet, FilterError> {
    let mut builder = ParamSetBuilder::new(spec.schema());
    for binding in spec.bindings() {
        let state = panel.control(binding.widget()).ok_or_else(|| {
            FilterError::invalid_parameter(
                binding.first_param(),
                format!("control '{}' is missing from the panel", binding.widget()),
            )
        })?;
        builder = apply_binding(builder, binding, state)?;
    }
    builder.build()
}

fn apply_binding<'a>(
    builder: ParamSetBuilder<'a>,
    binding: &Binding,
    state: &ControlState,
) -> Result<ParamSetBuilder<'a>, FilterError> {
    match (binding, state) {
        (Binding::Slider { param, .. }, ControlState::Slider { position }) => {
            builder.set(param, ParamValue::Int(*position))
        }
        (
            Binding::LookupSlider { param, lookup, .. },
            ControlState::Slider { position },
        ) => {
            let value = lookup
                .iter()
                .find_map(|&(pos, v)| (pos == *position).then_some(v))
                .ok_or_else(|| {
                    FilterError::invalid_parameter(
                        *param,
                        format!("slider position {position} has no lookup entry"),
                    )
                })?;
            builder.set(param, ParamValue::Int(value))
        }
        (Binding::Checkbox { param, .. }, ControlState::Checkbox { checked }) => {
            builder.set(param, ParamValue::Bool(*checked))
        }
        (Binding::ChoiceGroup { param, .. }, ControlState::ChoiceGroup { options, selected }) => {
            let label = options.get(*selected).ok_or_else(|| {
                FilterError::invalid_parameter(*param, "choice group has no selected option")
            })?;
            builder.set(param, ParamValue::Choice(label.to_lowercase()))
        }
        (
            Binding::RangeSlider {
                low_param,
                high_param,
                ..
            },
            ControlState::RangeSlider { low, high },
        ) => builder
            .set(low_param, ParamValue::Float(*low as f64 / 100.0))?
            .set(high_param, ParamValue::Float(*high as f64 / 100.0)),
        (binding, state) => Err(FilterError::invalid_parameter(
            binding.first_param(),
            format!(
                "control '{}' has an unexpected state {state:?}",
                binding.widget()
            ),
        )),
    }
}

/// Build the default panel for a filter: each bound widget in its initial
/// state, mirroring how the UI lays the controls out when a detector is
/// picked.
pub fn default_panel(spec: &FilterSpec) -> ControlPanel {
    let mut panel = ControlPanel::new();
    for binding in spec.bindings() {
        let state = match binding {
            Binding::Slider { param, .. } => {
                let position = match spec.schema().spec(param).map(|s| s.kind) {
                    Some(ParamKind::IntRange { min, .. }) => min,
                    _ => 1,
                };
                ControlState::Slider { position }
            }
            Binding::LookupSlider { lookup, .. } => ControlState::Slider {
                position: lookup.first().map(|&(pos, _)| pos).unwrap_or(1),
            },
            Binding::Checkbox { .. } => ControlState::Checkbox { checked: false },
            Binding::ChoiceGroup { param, .. } => {
                let options = match spec.schema().spec(param).map(|s| s.kind) {
                    Some(ParamKind::Choice(labels)) => {
                        labels.iter().map(|l| capitalize(l)).collect()
                    }
                    _ => Vec::new(),
                };
                ControlState::ChoiceGroup {
                    options,
                    selected: 0,
                }
            }
            Binding::RangeSlider { .. } => ControlState::RangeSlider { low: 0, high: 100 },
        };
        panel.insert(binding.widget(), state);
    }
    panel
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterRegistry;

    fn sobel_panel() -> ControlPanel {
        let mut panel = ControlPanel::new();
        panel.insert("kernel_size_slider", ControlState::Slider { position: 2 });
        panel.insert(
            "dim_groupbox",
            ControlState::ChoiceGroup {
                options: vec![
                    "Combined".to_string(),
                    "Vertical".to_string(),
                    "Horizontal".to_string(),
                ],
                selected: 1,
            },
        );
        panel
    }

    #[test]
    fn lookup_slider_applies_the_declared_mapping() {
        let registry = FilterRegistry::with_builtin_filters();
        let spec = registry.resolve("sobel").unwrap();
        let params = extract(&sobel_panel(), spec).unwrap();
        // Slider position 2 maps to kernel size 5, not to the raw position.
        assert_eq!(params.int("kernel_size").unwrap(), 5);
        assert_eq!(params.choice("direction").unwrap(), "vertical");
    }

    #[test]
    fn extraction_is_idempotent() {
        let registry = FilterRegistry::with_builtin_filters();
        let spec = registry.resolve("sobel").unwrap();
        let panel = sobel_panel();
        assert_eq!(extract(&panel, spec).unwrap(), extract(&panel, spec).unwrap());
    }

    #[test]
    fn range_slider_is_normalized_to_unit_interval() {
        let registry = FilterRegistry::with_builtin_filters();
        let spec = registry.resolve("canny").unwrap();
        let mut panel = default_panel(spec);
        panel.insert("hysteresis_slider", ControlState::RangeSlider { low: 20, high: 85 });
        let params = extract(&panel, spec).unwrap();
        assert_eq!(params.float("threshold1").unwrap(), 0.2);
        assert_eq!(params.float("threshold2").unwrap(), 0.85);
    }

    #[test]
    fn missing_control_names_the_parameter() {
        let registry = FilterRegistry::with_builtin_filters();
        let spec = registry.resolve("sobel").unwrap();
        let mut panel = sobel_panel();
        panel.controls.retain(|(n, _)| n != "dim_groupbox");
        let err = extract(&panel, spec).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidParameter { ref name, .. } if name == "direction"
        ));
    }

    #[test]
    fn default_panels_extract_for_every_builtin_filter() {
        let registry = FilterRegistry::with_builtin_filters();
        for id in crate::filters::FilterId::ALL {
            let spec = registry.resolve_id(id).unwrap();
            let panel = default_panel(spec);
            let params = extract(&panel, spec).unwrap();
            let declared: Vec<&str> = spec.schema().iter().map(|s| s.name).collect();
            assert_eq!(params.names(), declared, "{id}");
        }
    }
}
