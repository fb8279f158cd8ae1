//! Check command implementation.
//!
//! Loads and validates the configuration without producing output files.

use rig_config::{BuildConfiguration, validate_fs};

use crate::cli::CheckArgs;
use crate::commands::load_configuration;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// 1. Load the configuration (schema validation runs during loading)
/// 2. With `--fs`, require every entry file to exist under the root
/// 3. Print a summary
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");
    let config = load_configuration(&args.source)?;

    if args.fs {
        validate_fs(&config, &args.source.root)?;
        ui::success("All entry points exist");
    }

    ui::success("Configuration is valid");
    print_summary(&config);
    Ok(())
}

fn print_summary(config: &BuildConfiguration) {
    if let Some(mode) = config.mode() {
        ui::detail("mode", &format!("{mode:?}").to_lowercase());
    }

    for (name, path) in config.entry_points() {
        ui::detail("entry", &format!("{name} -> {path}"));
    }

    for rule in config.rules() {
        let chain = rule
            .loaders
            .iter()
            .map(|l| l.loader.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        ui::detail("rule", &format!("{} : {chain}", rule.test));
    }

    for optimizer in config.optimizers() {
        ui::detail("optimizer", &optimizer.name);
    }

    for (name, value) in config.experiments().iter() {
        ui::detail("experiment", &format!("{name} = {value}"));
    }
}
