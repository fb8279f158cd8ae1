//! Rig CLI - builds, checks and prints bundler configurations.
//!
//! Parses arguments, initializes logging and colors, and dispatches to the
//! command implementations.

use clap::Parser;
use miette::Result;
use rig_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);

    let result = match args.command {
        cli::Command::Print(print_args) => commands::print_execute(print_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Init(init_args) => commands::init_execute(init_args),
        cli::Command::Schema => commands::schema_execute(),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
