//! Identifier → spec mapping, the single extension point for detectors.
//!
//! The registry is populated exhaustively at startup and read-only
//! afterwards, so concurrent `resolve` calls need no locking. There is no
//! removal; `register` replaces an existing entry with the same identifier.

use super::id::FilterId;
use super::spec::FilterSpec;
use crate::error::FilterError;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
    specs: HashMap<FilterId, FilterSpec>,
}

impl FilterRegistry {
    /// An empty registry, for callers that register a custom filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in detector.
    pub fn with_builtin_filters() -> Self {
        let mut registry = Self::new();
        for spec in super::builtin_specs() {
            registry.register(spec);
        }
        registry
    }

    /// Add a spec, replacing any previous entry for the same identifier.
    pub fn register(&mut self, spec: FilterSpec) {
        self.specs.insert(spec.id(), spec);
    }

    /// Look up a spec by its stable string name.
    pub fn resolve(&self, name: &str) -> Result<&FilterSpec, FilterError> {
        let id = FilterId::parse(name).ok_or_else(|| FilterError::unknown_filter(name))?;
        self.resolve_id(id)
    }

    /// Look up a spec by identifier.
    pub fn resolve_id(&self, id: FilterId) -> Result<&FilterSpec, FilterError> {
        self.specs
            .get(&id)
            .ok_or_else(|| FilterError::unknown_filter(id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn builtin_registry_resolves_every_identifier() {
        let registry = FilterRegistry::with_builtin_filters();
        assert_eq!(registry.len(), FilterId::ALL.len());
        for id in FilterId::ALL {
            assert_eq!(registry.resolve(id.as_str()).unwrap().id(), id);
        }
    }

    #[test]
    fn resolve_fails_on_unregistered_name() {
        let registry = FilterRegistry::new();
        let err = registry.resolve("sobel").unwrap_err();
        assert!(matches!(err, FilterError::UnknownFilter { ref name } if name == "sobel"));
    }

    #[test]
    fn resolve_fails_on_unknown_name() {
        let registry = FilterRegistry::with_builtin_filters();
        let err = registry.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, FilterError::UnknownFilter { ref name } if name == "nonexistent"));
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = FilterRegistry::with_builtin_filters();
        let replacement = crate::filters::builtin_specs()
            .into_iter()
            .find(|s| s.id() == FilterId::Sobel)
            .unwrap();
        registry.register(replacement);
        assert_eq!(registry.len(), FilterId::ALL.len());
    }
}
