//! Error handling for the rig CLI.
//!
//! Library errors arrive as [`ConfigError`] and are wrapped in [`CliError`];
//! `main` converts the final error to a miette report.

use std::path::PathBuf;

use miette::Report;
use rig_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An explicitly named file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// `init` would overwrite an existing file
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert CliError to a miette Report, attaching a hint where one helps
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::NotFound(root)) => miette::miette!(
            help = "Run `rig init` to create rig.toml, or pass --config <FILE>",
            "No configuration file found in {}",
            root.display()
        ),
        CliError::Config(ConfigError::ProfileNotFound { name, available }) => {
            let help = if available.is_empty() {
                format!("Declare it under [profiles.{name}] in the configuration file")
            } else {
                format!("Available profiles: {}", available.join(", "))
            };
            miette::miette!(help = help, "Profile '{}' not found", name)
        }
        CliError::Config(ConfigError::UnknownExperiment { name }) => miette::miette!(
            help = format!(
                "Known experiments: {}",
                rig_config::KNOWN_EXPERIMENTS.join(", ")
            ),
            "Unrecognized experiment flag: {}",
            name
        ),
        CliError::AlreadyExists(path) => miette::miette!(
            help = "Pass --force to overwrite it",
            "{} already exists",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}
