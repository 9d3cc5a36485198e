//! Template definitions, the registry, and rendering.
//!
//! A [`TemplateDefinition`] is an immutable catalog entry: a name, help text,
//! an optional get-started hint, the location of its source tree (resolved by
//! a [`TemplateSource`](crate::assets::TemplateSource)), default parameters,
//! optional delimiter overrides, and the file names copied byte-for-byte.
//!
//! The [`TemplateRegistry`] is constructed once and passed by reference to
//! whatever needs lookup. [`TemplateRegistry::builtin`] yields the packaged
//! catalog from [`catalog`]; catalog files loaded through
//! [`config`](crate::config) extend it.
//!
//! Contents and paths are rendered by [`renderer::TemplateRenderer`] and
//! [`renderer::render_path`].

pub mod catalog;
pub mod registry;
pub mod renderer;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

pub use registry::{TemplateRegistry, TemplateSummary};

/// Delimiter overrides for one template.
///
/// Each marker left unset falls back to the engine default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_end: Option<String>,
}

impl DelimiterConfig {
    pub const DEFAULT_BLOCK: (&'static str, &'static str) = ("{%", "%}");
    pub const DEFAULT_VARIABLE: (&'static str, &'static str) = ("{{", "}}");
    pub const DEFAULT_COMMENT: (&'static str, &'static str) = ("{#", "#}");

    /// Delimiters that stay clear of Erlang's `{{ ... }}` tuples.
    pub fn erlang() -> Self {
        Self {
            block_start: Some("@@".into()),
            block_end: Some("@@".into()),
            variable_start: Some("@=".into()),
            variable_end: Some("=@".into()),
            comment_start: Some("@#".into()),
            comment_end: Some("#@".into()),
        }
    }

    pub fn block(&self) -> (String, String) {
        resolve(&self.block_start, &self.block_end, Self::DEFAULT_BLOCK)
    }

    pub fn variable(&self) -> (String, String) {
        resolve(&self.variable_start, &self.variable_end, Self::DEFAULT_VARIABLE)
    }

    pub fn comment(&self) -> (String, String) {
        resolve(&self.comment_start, &self.comment_end, Self::DEFAULT_COMMENT)
    }
}

fn resolve(
    start: &Option<String>,
    end: &Option<String>,
    default: (&str, &str),
) -> (String, String) {
    (
        start.clone().unwrap_or_else(|| default.0.to_string()),
        end.clone().unwrap_or_else(|| default.1.to_string()),
    )
}

/// A named, parameterized project template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Unique catalog key, e.g. `hello:python`.
    pub name: String,
    /// One-line description shown by `list`.
    pub help: String,
    /// Printed after a successful instantiation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_started_hint: Option<String>,
    /// Source tree location, relative to the asset root.
    pub base_dir: String,
    /// Default parameters; caller overrides win.
    #[serde(default)]
    pub params: ParameterSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<DelimiterConfig>,
    /// File names, matched after `appname` substitution, copied
    /// byte-for-byte instead of rendered.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub verbatim: BTreeSet<String>,
}

impl TemplateDefinition {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        base_dir: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            get_started_hint: None,
            base_dir: base_dir.into(),
            params: ParameterSet::new(),
            delimiters: None,
            verbatim: BTreeSet::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.get_started_hint = Some(hint.into());
        self
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterConfig) -> Self {
        self.delimiters = Some(delimiters);
        self
    }

    pub fn with_verbatim(mut self, file_name: impl Into<String>) -> Self {
        self.verbatim.insert(file_name.into());
        self
    }

    /// Whether a file with this base name, after `appname` substitution, is
    /// copied without rendering.
    pub fn is_verbatim(&self, file_name: &str) -> bool {
        self.verbatim.contains(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_delimiters_fall_back_to_defaults() {
        let delimiters = DelimiterConfig {
            variable_start: Some("@=".into()),
            variable_end: Some("=@".into()),
            ..Default::default()
        };
        assert_eq!(delimiters.variable(), ("@=".to_string(), "=@".to_string()));
        assert_eq!(delimiters.block(), ("{%".to_string(), "%}".to_string()));
        assert_eq!(delimiters.comment(), ("{#".to_string(), "#}".to_string()));
    }

    #[test]
    fn test_definition_from_json() {
        let json = r#"{
            "name": "hello:go",
            "help": "A minimal Go component.",
            "base_dir": "hello/go",
            "params": { "appname": "hello" },
            "delimiters": { "variable_start": "[[", "variable_end": "]]" },
            "verbatim": ["go.sum"]
        }"#;
        let def: TemplateDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.name, "hello:go");
        assert_eq!(def.params.get("appname"), Some("hello"));
        assert!(def.is_verbatim("go.sum"));
        assert!(!def.is_verbatim("main.go"));
        assert!(def.get_started_hint.is_none());
        let delimiters = def.delimiters.unwrap();
        assert_eq!(delimiters.variable(), ("[[".to_string(), "]]".to_string()));
    }

    #[test]
    fn test_definition_builder() {
        let def = TemplateDefinition::new("t", "help", "t")
            .with_param("realm", "realm1")
            .with_hint("run it")
            .with_verbatim("relx");
        assert_eq!(def.params.get("realm"), Some("realm1"));
        assert_eq!(def.get_started_hint.as_deref(), Some("run it"));
        assert!(def.is_verbatim("relx"));
    }
}
