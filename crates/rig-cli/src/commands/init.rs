//! Init command implementation.
//!
//! Writes the built-in default configuration as rig.toml.

use std::fs;

use tracing::debug;

use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use crate::ui;

pub const CONFIG_FILE_NAME: &str = "rig.toml";

pub fn execute(args: InitArgs) -> Result<()> {
    let path = args.dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    let config = rig_config::build_configuration()?;
    let content = config.to_toml()?;

    fs::create_dir_all(&args.dir)?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), "wrote default configuration");

    ui::success(&format!("Created {}", path.display()));
    Ok(())
}
