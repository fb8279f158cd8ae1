//! Print command implementation.

use std::fs;

use tracing::debug;

use crate::cli::PrintArgs;
use crate::commands::load_configuration;
use crate::error::Result;
use crate::ui;

/// Execute the print command.
///
/// Writes the engine JSON to stdout, or to `--output` when given.
pub fn execute(args: PrintArgs) -> Result<()> {
    let config = load_configuration(&args.source)?;

    let json = if args.compact {
        serde_json::to_string(&config)?
    } else {
        config.to_engine_json()?
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("{json}\n"))?;
            debug!(path = %path.display(), bytes = json.len(), "wrote engine configuration");
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => println!("{json}"),
    }

    Ok(())
}
