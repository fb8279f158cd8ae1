//! Schema command implementation.

use crate::error::Result;

/// Print the JSON schema of the configuration file format.
pub fn execute() -> Result<()> {
    let schema = rig_config::config_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
