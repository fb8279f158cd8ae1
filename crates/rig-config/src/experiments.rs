//! Named experiment toggles forwarded to the engine.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Experiment flags understood by the engine.
pub const KNOWN_EXPERIMENTS: &[&str] = &[
    "css",
    "asyncWebAssembly",
    "outputModule",
    "topLevelAwait",
    "layers",
    "lazyCompilation",
    "futureDefaults",
    "incremental",
    "parallelCodeSplitting",
    "parallelLoader",
    "buildHttp",
    "cache",
];

/// Feature name to boolean or feature-specific options object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Experiments(IndexMap<String, Value>);

impl Experiments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// A flag counts as enabled when set to `true` or to an options object.
    pub fn is_enabled(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(Value::Bool(true)) | Some(Value::Object(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, value) in &self.0 {
            if !KNOWN_EXPERIMENTS.contains(&name.as_str()) {
                return Err(ConfigError::UnknownExperiment { name: name.clone() });
            }
            if !matches!(value, Value::Bool(_) | Value::Object(_)) {
                return Err(ConfigError::InvalidExperimentValue { name: name.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_boolean_flag_is_valid() {
        let mut experiments = Experiments::new();
        experiments.insert("css", true);
        assert!(experiments.validate().is_ok());
        assert!(experiments.is_enabled("css"));
    }

    #[test]
    fn object_value_counts_as_enabled() {
        let mut experiments = Experiments::new();
        experiments.insert("lazyCompilation", json!({ "entries": false }));
        assert!(experiments.validate().is_ok());
        assert!(experiments.is_enabled("lazyCompilation"));
    }

    #[test]
    fn disabled_flag_is_not_enabled() {
        let mut experiments = Experiments::new();
        experiments.insert("css", false);
        assert!(!experiments.is_enabled("css"));
        assert!(!experiments.is_enabled("outputModule"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let mut experiments = Experiments::new();
        experiments.insert("cssNative", true);
        assert!(matches!(
            experiments.validate().unwrap_err(),
            ConfigError::UnknownExperiment { name } if name == "cssNative"
        ));
    }

    #[test]
    fn scalar_value_is_rejected() {
        let mut experiments = Experiments::new();
        experiments.insert("css", "yes");
        assert!(matches!(
            experiments.validate().unwrap_err(),
            ConfigError::InvalidExperimentValue { .. }
        ));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut experiments = Experiments::new();
        experiments.insert("css", true);
        assert_eq!(serde_json::to_value(&experiments).unwrap(), json!({ "css": true }));
    }
}
