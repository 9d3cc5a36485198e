//! Catalog of template definitions keyed by name.

use std::collections::BTreeMap;

use crate::error::{Result, StencilError};
use crate::templates::{catalog, TemplateDefinition};

/// Name and help text of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSummary<'a> {
    pub name: &'a str,
    pub help: &'a str,
}

/// Read-only catalog of templates.
///
/// Build it once at startup and share it by reference; lookups never mutate.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The packaged catalog.
    pub fn builtin() -> Self {
        Self::from_definitions(catalog::builtin_templates())
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = TemplateDefinition>) -> Self {
        let mut registry = Self::new();
        registry.extend(definitions);
        registry
    }

    /// Add a definition, replacing any existing one with the same name.
    pub fn insert(&mut self, definition: TemplateDefinition) -> Option<TemplateDefinition> {
        self.templates.insert(definition.name.clone(), definition)
    }

    pub fn extend(&mut self, definitions: impl IntoIterator<Item = TemplateDefinition>) {
        for definition in definitions {
            self.insert(definition);
        }
    }

    /// Look up a template by name.
    pub fn lookup(&self, name: &str) -> Result<&TemplateDefinition> {
        self.templates
            .get(name)
            .ok_or_else(|| StencilError::UnknownTemplate(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Name and help text of every template, sorted by name.
    pub fn list(&self) -> Vec<TemplateSummary<'_>> {
        self.templates
            .values()
            .map(|t| TemplateSummary {
                name: &t.name,
                help: &t.help,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_unknown_template() {
        let registry = TemplateRegistry::builtin();
        let err = registry.lookup("hello:cobol").unwrap_err();
        assert!(matches!(err, StencilError::UnknownTemplate(ref n) if n == "hello:cobol"));
    }

    #[test]
    fn test_builtin_catalog() {
        let registry = TemplateRegistry::builtin();
        assert!(registry.has("default"));
        assert!(registry.has("hello:python"));
        assert!(!registry.has("hello"));

        let python = registry.lookup("hello:python").unwrap();
        assert_eq!(python.params.get("appname"), Some("hello"));
        assert_eq!(python.params.get("realm"), Some("realm1"));

        let erwa = registry.lookup("hello:erwa").unwrap();
        assert!(erwa.delimiters.is_some());
        assert!(erwa.is_verbatim("relx"));
        assert!(erwa.get_started_hint.is_some());
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = TemplateRegistry::builtin();
        let names: Vec<&str> = registry.list().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut registry = TemplateRegistry::new();
        assert!(registry.is_empty());
        registry.insert(TemplateDefinition::new("t", "first", "t"));
        let old = registry.insert(TemplateDefinition::new("t", "second", "t"));
        assert_eq!(old.map(|d| d.help), Some("first".to_string()));
        assert_eq!(registry.lookup("t").unwrap().help, "second");
        assert_eq!(registry.len(), 1);
    }
}
