//! Error types for configuration construction, validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Construction errors (schema-level, no filesystem access)
    #[error("no entry points specified")]
    NoEntries,

    #[error("entry point '{name}' is declared more than once")]
    DuplicateEntry { name: String },

    #[error("invalid entry point '{name}': {message}")]
    InvalidEntry { name: String, message: String },

    #[error("rule #{index} has an empty loader chain")]
    EmptyLoaderChain { index: usize },

    #[error("rule #{index} is invalid: {message}")]
    InvalidRule { index: usize, message: String },

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("optimizer #{index} is invalid: {message}")]
    InvalidOptimizer { index: usize, message: String },

    #[error("unrecognized experiment flag: {name}")]
    UnknownExperiment { name: String },

    #[error("experiment '{name}' must be a boolean or an options object")]
    InvalidExperimentValue { name: String },

    // Filesystem validation errors (for CLI use)
    #[error("entry '{name}' not found: {}", path.display())]
    EntryNotFound { name: String, path: PathBuf },

    // Config discovery/loading errors
    #[error("no configuration file found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value in {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("profile '{name}' not found in configuration")]
    ProfileNotFound {
        name: String,
        /// Profiles the document does declare
        available: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.to_string(),
        }
    }
}
