//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation, which
//! runs on every constructed configuration.

use std::path::{Path, PathBuf};

use crate::config::BuildConfiguration;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Checks the construction invariants: at least one entry, no blank names or
/// paths, non-empty loader chains, named loaders and optimizers, and known
/// experiment flags.
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()> {
        if config.entry_points().is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for (name, path) in config.entry_points() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidEntry {
                    name: name.clone(),
                    message: "entry name cannot be empty".to_string(),
                });
            }
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidEntry {
                    name: name.clone(),
                    message: "entry path cannot be empty".to_string(),
                });
            }
        }

        for (index, rule) in config.rules().iter().enumerate() {
            if rule.loaders.is_empty() {
                return Err(ConfigError::EmptyLoaderChain { index });
            }
            if rule.loaders.iter().any(|l| l.loader.trim().is_empty()) {
                return Err(ConfigError::InvalidRule {
                    index,
                    message: "loader name cannot be empty".to_string(),
                });
            }
        }

        for (index, optimizer) in config.optimizers().iter().enumerate() {
            if optimizer.name.trim().is_empty() {
                return Err(ConfigError::InvalidOptimizer {
                    index,
                    message: "optimizer name cannot be empty".to_string(),
                });
            }
        }

        config.experiments().validate()
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then requires every entry path to exist under `root`.
///
/// # Example
///
/// ```no_run
/// use rig_config::{build_configuration, ConfigValidator, FsValidator};
///
/// let config = build_configuration().unwrap();
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()> {
        SchemaValidator.validate(config)?;

        for (name, entry) in config.entry_points() {
            let path = self.root.join(entry);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound {
                    name: name.clone(),
                    path,
                });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfiguration) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfiguration, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
