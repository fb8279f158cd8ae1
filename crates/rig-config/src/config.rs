//! The validated build configuration handed to the bundler engine.
//!
//! A [`BuildConfiguration`] can only be obtained through the builder or through
//! deserialization, and both paths run [`SchemaValidator`]. Once constructed
//! the value is read-only.

use std::fmt;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::builder::BuildConfigurationBuilder;
use crate::error::{ConfigError, Result};
use crate::experiments::Experiments;
use crate::optimizer::{OptimizationOptions, OptimizerDescriptor};
use crate::profile::merge_values;
use crate::rule::TransformRule;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Engine build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    Development,
    None,
}

/// Module-processing section of the engine schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModuleOptions {
    /// Rules in declaration order
    #[serde(default)]
    pub rules: Vec<TransformRule>,
}

/// Description of one build job, shaped the way the engine expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigDocument")]
pub struct BuildConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<BuildMode>,
    entry: IndexMap<String, String>,
    module: ModuleOptions,
    optimization: OptimizationOptions,
    experiments: Experiments,
}

/// Unvalidated form of [`BuildConfiguration`], as written in configuration files.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Engine mode (production, development or none)
    #[serde(default)]
    pub mode: Option<BuildMode>,

    /// Bundle name to source path
    #[serde(default, deserialize_with = "unique_entries")]
    #[schemars(with = "IndexMap<String, String>")]
    pub entry: IndexMap<String, String>,

    #[serde(default)]
    pub module: ModuleOptions,

    #[serde(default)]
    pub optimization: OptimizationOptions,

    #[serde(default)]
    pub experiments: Experiments,
}

/// Read the `entry` table, rejecting a name that appears twice.
fn unique_entries<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = IndexMap<String, String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a table of entry names to source paths")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, path)) = access.next_entry::<String, String>()? {
                if entries.contains_key(&name) {
                    return Err(de::Error::custom(ConfigError::DuplicateEntry { name }));
                }
                entries.insert(name, path);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

impl TryFrom<ConfigDocument> for BuildConfiguration {
    type Error = ConfigError;

    fn try_from(document: ConfigDocument) -> Result<Self> {
        let config = BuildConfiguration {
            mode: document.mode,
            entry: document.entry,
            module: document.module,
            optimization: document.optimization,
            experiments: document.experiments,
        };
        SchemaValidator.validate(&config)?;
        Ok(config)
    }
}

impl BuildConfiguration {
    pub fn builder() -> BuildConfigurationBuilder {
        BuildConfigurationBuilder::default()
    }

    /// Assemble and validate. Used by the builder once entries are de-duplicated.
    pub(crate) fn assemble(
        mode: Option<BuildMode>,
        entry: IndexMap<String, String>,
        rules: Vec<TransformRule>,
        minimizer: Vec<OptimizerDescriptor>,
        experiments: Experiments,
    ) -> Result<Self> {
        let config = BuildConfiguration {
            mode,
            entry,
            module: ModuleOptions { rules },
            optimization: OptimizationOptions { minimizer },
            experiments,
        };
        SchemaValidator.validate(&config)?;
        debug!(
            entries = config.entry.len(),
            rules = config.module.rules.len(),
            optimizers = config.optimization.minimizer.len(),
            "built configuration"
        );
        Ok(config)
    }

    pub fn mode(&self) -> Option<BuildMode> {
        self.mode
    }

    /// Entry points in declaration order
    pub fn entry_points(&self) -> &IndexMap<String, String> {
        &self.entry
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[TransformRule] {
        &self.module.rules
    }

    pub fn optimizers(&self) -> &[OptimizerDescriptor] {
        &self.optimization.minimizer
    }

    pub fn experiments(&self) -> &Experiments {
        &self.experiments
    }

    /// Rules whose pattern matches `path`, with their declaration index, in order.
    ///
    /// Whether the engine applies only the first match or combines all of them
    /// is up to the engine; this only reports which rules match.
    ///
    /// ```
    /// let config = rig_config::build_configuration().unwrap();
    /// let matched: Vec<usize> = config
    ///     .matching_rules("./web/styles/app.css")
    ///     .map(|(index, _)| index)
    ///     .collect();
    /// assert_eq!(matched, vec![1]);
    /// ```
    pub fn matching_rules<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = (usize, &'a TransformRule)> + 'a {
        self.module
            .rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.matches(path))
    }

    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use rig_config::BuildConfiguration;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "entry": { "main": "./web/index.js" },
    ///     "module": {
    ///         "rules": [{ "test": "\\.css$", "use": ["postcss-loader"], "type": "css" }]
    ///     },
    ///     "experiments": { "css": true }
    /// });
    ///
    /// let config = BuildConfiguration::from_value(value).unwrap();
    /// assert_eq!(config.entry_points()["main"], "./web/index.js");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let document: ConfigDocument =
            serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("config", e))?;
        Self::try_from(document)
    }

    /// Convert to serde_json::Value in the engine schema
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Pretty-printed engine JSON
    pub fn to_engine_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Render in the `rig.toml` file format
    ///
    /// TOML has no null. A `null` anywhere inside loader or optimizer options
    /// fails with `InvalidValue` whose `field` is the path to it, e.g.
    /// `module.rules[0].use[0].options.jsc.target`.
    pub fn to_toml(&self) -> Result<String> {
        if let Some(path) = find_null(&self.to_value()?, "") {
            return Err(ConfigError::invalid_value(
                path,
                "null cannot be represented in TOML",
            ));
        }
        toml::to_string_pretty(self).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Deep-merge `overrides` over this configuration and validate the result.
    ///
    /// Objects merge key by key; arrays and scalars replace.
    ///
    /// ```
    /// use rig_config::{build_configuration, BuildMode};
    /// use serde_json::json;
    ///
    /// let config = build_configuration()
    ///     .unwrap()
    ///     .with_overrides(&json!({ "mode": "development" }))
    ///     .unwrap();
    /// assert_eq!(config.mode(), Some(BuildMode::Development));
    /// ```
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut base = self.to_value()?;
        merge_values(&mut base, overrides);
        Self::from_value(base)
    }
}

/// Path of the first `null` inside `value`, in `a.b[0].c` form.
fn find_null(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Null => Some(path.to_string()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(index, item)| find_null(item, &format!("{path}[{index}]"))),
        Value::Object(map) => map.iter().find_map(|(key, item)| {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            find_null(item, &child)
        }),
        _ => None,
    }
}

/// JSON schema of the configuration file format
pub fn config_schema() -> Value {
    let schema = schemars::schema_for!(ConfigDocument);
    schema.to_value()
}
