//! Template parameters and the default/override merge.
//!
//! A [`ParameterSet`] maps string keys to string values. It serializes as a
//! flat JSON object, so it doubles as the rendering context handed to the
//! template engine and as the `params` table of a catalog entry. Non-string
//! values are rejected when deserializing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Parameter name whose value replaces the `appname` token in paths.
pub const APPNAME: &str = "appname";

/// String-to-string parameter mapping used for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, String>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `overrides` onto `defaults`. Overrides win key by key.
    pub fn merge(defaults: &ParameterSet, overrides: Option<&ParameterSet>) -> ParameterSet {
        let mut merged = defaults.clone();
        if let Some(overrides) = overrides {
            for (key, value) in overrides.iter() {
                merged.0.insert(key.to_string(), value.to_string());
            }
        }
        merged
    }

    /// Parse a list of `key=value` assignments, as given on a command line.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for assignment in assignments {
            let (key, value) = parse_assignment(assignment.as_ref())?;
            params.insert(key, value);
        }
        Ok(params)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Split `key=value` at the first `=`. The key must be non-empty.
pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(StencilError::InvalidParameter(assignment.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_and_defaults_pass_through() {
        let defaults = ParameterSet::new()
            .with("appname", "hello")
            .with("realm", "realm1");
        let overrides = ParameterSet::new().with("realm", "prod");

        let merged = ParameterSet::merge(&defaults, Some(&overrides));
        assert_eq!(merged.get("realm"), Some("prod"));
        assert_eq!(merged.get("appname"), Some("hello"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_override_only_keys_are_added() {
        let defaults = ParameterSet::new().with("realm", "realm1");
        let overrides = ParameterSet::new().with("unused", "x");

        let merged = ParameterSet::merge(&defaults, Some(&overrides));
        assert_eq!(merged.get("unused"), Some("x"));
        assert_eq!(merged.get("realm"), Some("realm1"));
    }

    #[test]
    fn test_merge_without_overrides() {
        let defaults = ParameterSet::new().with("realm", "realm1");
        assert_eq!(ParameterSet::merge(&defaults, None), defaults);
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("url=ws://127.0.0.1:8080/ws?a=b").unwrap(),
            ("url".to_string(), "ws://127.0.0.1:8080/ws?a=b".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_rejects_non_string_values() {
        let ok: ParameterSet = serde_json::from_str(r#"{"realm": "realm1"}"#).unwrap();
        assert_eq!(ok.get("realm"), Some("realm1"));

        let bad = serde_json::from_str::<ParameterSet>(r#"{"port": 8080}"#);
        assert!(bad.is_err());
    }
}
