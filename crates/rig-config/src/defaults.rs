//! The project's default build job.

use serde_json::json;

use crate::config::BuildConfiguration;
use crate::error::Result;
use crate::optimizer::OptimizerDescriptor;
use crate::rule::{LoaderInvocation, ModuleType, TransformRule};

pub const DEFAULT_ENTRY_NAME: &str = "main";
pub const DEFAULT_ENTRY_PATH: &str = "./web/index.js";

pub const SCRIPT_PATTERN: &str = r"\.js$";
pub const STYLESHEET_PATTERN: &str = r"\.css$";

pub const SCRIPT_LOADER: &str = "builtin:swc-loader";
pub const STYLESHEET_LOADER: &str = "postcss-loader";
pub const SCRIPT_MINIMIZER: &str = "SwcJsMinimizerRspackPlugin";

/// Build the default configuration.
///
/// One `main` entry, an ECMAScript transpilation rule followed by a PostCSS
/// rule emitting native CSS modules, the SWC minimizer, and native CSS
/// handling switched on.
///
/// ```
/// let config = rig_config::build_configuration().unwrap();
/// assert_eq!(config.entry_points()["main"], "./web/index.js");
/// assert!(config.experiments().is_enabled("css"));
/// ```
pub fn build_configuration() -> Result<BuildConfiguration> {
    let script_rule = TransformRule::new(SCRIPT_PATTERN)?.loader(LoaderInvocation::with_options(
        SCRIPT_LOADER,
        json!({
            "jsc": {
                "parser": {
                    "syntax": "ecmascript"
                }
            }
        }),
    ));

    let stylesheet_rule = TransformRule::new(STYLESHEET_PATTERN)?
        .loader(STYLESHEET_LOADER)
        .with_type(ModuleType::Css);

    BuildConfiguration::builder()
        .entry(DEFAULT_ENTRY_NAME, DEFAULT_ENTRY_PATH)
        .rule(script_rule)
        .rule(stylesheet_rule)
        .optimizer(OptimizerDescriptor::new(SCRIPT_MINIMIZER))
        .experiment("css", true)
        .build()
}
