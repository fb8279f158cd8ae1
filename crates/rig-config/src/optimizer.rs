//! Output-finalization plugins (`optimization.minimizer`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plugin applied during output finalization (the engine's `optimization.minimizer`).
///
/// The descriptor is opaque: `name` identifies the engine plugin and `options`
/// is forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OptimizerDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl OptimizerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options: Some(options),
        }
    }
}

/// Output-finalization section of the engine schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OptimizationOptions {
    #[serde(default)]
    pub minimizer: Vec<OptimizerDescriptor>,
}
