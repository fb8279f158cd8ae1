//! Typed, validated build configuration for rspack-compatible bundler engines.
//!
//! The crate produces a [`BuildConfiguration`]: entry points, ordered module
//! rules with their loader chains, minimizer plugins and experiment flags. It
//! never runs a build itself; the serialized value is what the engine reads.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod experiments;
pub mod optimizer;
pub mod profile;
pub mod rule;
pub mod validation;

// Re-export main types
pub use builder::BuildConfigurationBuilder;
pub use config::*;
pub use defaults::build_configuration;
pub use error::*;
pub use experiments::{Experiments, KNOWN_EXPERIMENTS};
pub use optimizer::{OptimizationOptions, OptimizerDescriptor};
pub use rule::{FilePattern, LoaderInvocation, ModuleType, TransformRule};

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, DEFAULT_ENV_PREFIX, discover, discover_with_profile};
pub use profile::merge_values;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
