//! Command-line interface definition.
//!
//! - `rig print` - Print the engine-ready configuration as JSON
//! - `rig check` - Validate a configuration
//! - `rig init` - Write the default configuration to `rig.toml`
//! - `rig schema` - Print the JSON schema of the configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Rig - build configuration front end for rspack-compatible bundlers
#[derive(Parser, Debug)]
#[command(
    name = "rig",
    version,
    about = "Build configuration front end for rspack-compatible bundlers",
    long_about = "Rig loads, validates and prints bundler configurations.\n\
                  Configuration comes from rig.toml, rig.json or the \"rig\" field of\n\
                  package.json, with optional profiles and RIG_ environment overrides."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the engine-ready configuration
    ///
    /// Falls back to the built-in default when no configuration file exists.
    Print(PrintArgs),

    /// Validate configuration
    Check(CheckArgs),

    /// Write the default configuration to rig.toml
    Init(InitArgs),

    /// Print the JSON schema of the configuration file
    Schema,
}

/// Where to load configuration from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Project root searched for rig.toml, rig.json or package.json
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Explicit configuration file (skips discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile to merge over the base configuration
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Ignore RIG_ environment overrides
    #[arg(long)]
    pub no_env: bool,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also require entry files to exist under the project root
    #[arg(long)]
    pub fs: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write rig.toml into
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Overwrite an existing rig.toml
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_print_with_profile() {
        let cli = Cli::try_parse_from(["rig", "print", "--profile", "development", "--compact"])
            .unwrap();
        match cli.command {
            Command::Print(args) => {
                assert_eq!(args.source.profile.as_deref(), Some("development"));
                assert_eq!(args.source.root, PathBuf::from("."));
                assert!(args.compact);
                assert!(args.output.is_none());
            }
            other => panic!("expected print, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["rig", "check", "--fs", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Check(CheckArgs { fs: true, .. })));
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["rig", "-v", "-q", "schema"]).is_err());
    }

    #[test]
    fn init_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["rig", "init"]).unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.dir, PathBuf::from("."));
                assert!(!args.force);
            }
            other => panic!("expected init, got {other:?}"),
        }
    }
}
