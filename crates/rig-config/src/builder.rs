use indexmap::IndexMap;
use serde_json::Value;

use crate::config::{BuildConfiguration, BuildMode};
use crate::error::{ConfigError, Result};
use crate::experiments::Experiments;
use crate::optimizer::OptimizerDescriptor;
use crate::rule::TransformRule;

/// Fluent construction of a [`BuildConfiguration`].
///
/// Nothing is checked until [`build`](Self::build), which rejects the
/// configuration as a whole.
///
/// # Example
///
/// ```
/// use rig_config::{BuildConfiguration, ModuleType, OptimizerDescriptor, TransformRule};
///
/// let config = BuildConfiguration::builder()
///     .entry("main", "./web/index.js")
///     .rule(TransformRule::new(r"\.css$")?.loader("postcss-loader").with_type(ModuleType::Css))
///     .optimizer(OptimizerDescriptor::new("SwcJsMinimizerRspackPlugin"))
///     .experiment("css", true)
///     .build()?;
///
/// assert_eq!(config.rules().len(), 1);
/// # Ok::<(), rig_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildConfigurationBuilder {
    mode: Option<BuildMode>,
    entries: Vec<(String, String)>,
    rules: Vec<TransformRule>,
    optimizers: Vec<OptimizerDescriptor>,
    experiments: Experiments,
}

impl BuildConfigurationBuilder {
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn entry(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.entries.push((name.into(), path.into()));
        self
    }

    pub fn rule(mut self, rule: TransformRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn optimizer(mut self, optimizer: OptimizerDescriptor) -> Self {
        self.optimizers.push(optimizer);
        self
    }

    pub fn experiment(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.experiments.insert(name, value);
        self
    }

    pub fn build(self) -> Result<BuildConfiguration> {
        let mut entry = IndexMap::with_capacity(self.entries.len());
        for (name, path) in self.entries {
            if entry.contains_key(&name) {
                return Err(ConfigError::DuplicateEntry { name });
            }
            entry.insert(name, path);
        }

        BuildConfiguration::assemble(
            self.mode,
            entry,
            self.rules,
            self.optimizers,
            self.experiments,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_entry_is_rejected() {
        let result = BuildConfiguration::builder()
            .entry("main", "./web/index.js")
            .entry("main", "./web/other.js")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::DuplicateEntry { name } if name == "main"
        ));
    }

    #[test]
    fn entries_keep_declaration_order() {
        let config = BuildConfiguration::builder()
            .entry("worker", "./web/worker.js")
            .entry("main", "./web/index.js")
            .build()
            .unwrap();
        let names: Vec<&str> = config.entry_points().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["worker", "main"]);
    }

    #[test]
    fn empty_builder_fails() {
        let result = BuildConfiguration::builder().build();
        assert!(matches!(result.unwrap_err(), ConfigError::NoEntries));
    }

    #[test]
    fn rule_without_loaders_fails() {
        let result = BuildConfiguration::builder()
            .entry("main", "./web/index.js")
            .rule(TransformRule::new(r"\.js$").unwrap())
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EmptyLoaderChain { index: 0 }
        ));
    }

    #[test]
    fn mode_is_recorded() {
        let config = BuildConfiguration::builder()
            .mode(BuildMode::Development)
            .entry("main", "./web/index.js")
            .build()
            .unwrap();
        assert_eq!(config.mode(), Some(BuildMode::Development));
    }
}
