//! Command implementations.
//!
//! Each subcommand lives in its own module and exposes an `execute` function
//! taking its parsed arguments.

pub mod check;
pub mod init;
pub mod print;
pub mod schema;

pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use print::execute as print_execute;
pub use schema::execute as schema_execute;

use rig_config::{BuildConfiguration, ConfigDiscovery, ConfigError, DEFAULT_ENV_PREFIX};
use tracing::info;

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// Resolve the configuration described by `source`.
///
/// An explicit `--config` file must exist. Otherwise the project root is
/// searched; if nothing is found and no profile was requested, the built-in
/// default is used.
pub(crate) fn load_configuration(source: &SourceArgs) -> Result<BuildConfiguration> {
    let mut discovery = ConfigDiscovery::new(&source.root);
    if !source.no_env {
        discovery = discovery.with_env_prefix(DEFAULT_ENV_PREFIX);
    }
    let profile = source.profile.as_deref();

    if let Some(path) = &source.config {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.clone()));
        }
        return Ok(discovery.load_file(path, profile)?);
    }

    match discovery.find() {
        Some(path) => {
            info!("Using configuration from {}", path.display());
            Ok(discovery.load_file(&path, profile)?)
        }
        None if profile.is_some() => Err(ConfigError::NotFound(source.root.clone()).into()),
        None => {
            ui::warning("No configuration file found, using built-in defaults");
            Ok(rig_config::build_configuration()?)
        }
    }
}
