//! Module rules: file patterns mapped to ordered loader chains.

use std::fmt;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Regular expression matched against input file paths (the engine's `test`).
#[derive(Clone)]
pub struct FilePattern(Regex);

impl FilePattern {
    /// Compile a pattern.
    ///
    /// ```
    /// use rig_config::FilePattern;
    ///
    /// let pattern = FilePattern::new(r"\.css$").unwrap();
    /// assert!(pattern.is_match("web/styles/app.css"));
    /// assert!(!pattern.is_match("web/index.js"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FilePattern {}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilePattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        FilePattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// One step of a loader chain: a loader name plus its opaque options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LoaderSpec")]
pub struct LoaderInvocation {
    pub loader: String,

    /// Loader-specific payload, forwarded untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderInvocation {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(loader: impl Into<String>, options: Value) -> Self {
        Self {
            loader: loader.into(),
            options: Some(options),
        }
    }
}

impl From<&str> for LoaderInvocation {
    fn from(loader: &str) -> Self {
        Self::new(loader)
    }
}

impl From<String> for LoaderInvocation {
    fn from(loader: String) -> Self {
        Self::new(loader)
    }
}

/// Accepted spellings of a loader in configuration files.
#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
pub(crate) enum LoaderSpec {
    /// Bare loader name, no options
    Name(String),
    /// Loader name with options
    Full {
        loader: String,
        #[serde(default)]
        options: Option<Value>,
    },
}

impl From<LoaderSpec> for LoaderInvocation {
    fn from(spec: LoaderSpec) -> Self {
        match spec {
            LoaderSpec::Name(loader) => Self::new(loader),
            LoaderSpec::Full { loader, options } => Self {
                loader,
                options: options.filter(|value| !value.is_null()),
            },
        }
    }
}

/// How the engine should categorize matched modules (the rule's `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ModuleType {
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "css/module")]
    CssModule,
    #[serde(rename = "css/auto")]
    CssAuto,
    #[serde(rename = "javascript/auto")]
    JavascriptAuto,
    #[serde(rename = "javascript/esm")]
    JavascriptEsm,
    #[serde(rename = "javascript/dynamic")]
    JavascriptDynamic,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "asset")]
    Asset,
    #[serde(rename = "asset/resource")]
    AssetResource,
    #[serde(rename = "asset/inline")]
    AssetInline,
    #[serde(rename = "asset/source")]
    AssetSource,
}

/// A file pattern mapped to an ordered loader chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TransformRule {
    /// Paths this rule applies to
    #[schemars(with = "String")]
    pub test: FilePattern,

    /// Loaders, in the order they were declared
    #[serde(rename = "use", default)]
    #[schemars(with = "Vec<LoaderSpec>")]
    pub loaders: Vec<LoaderInvocation>,

    /// Output categorization for matched modules
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<ModuleType>,
}

impl TransformRule {
    /// Start a rule with an empty loader chain.
    ///
    /// ```
    /// use rig_config::{ModuleType, TransformRule};
    ///
    /// let rule = TransformRule::new(r"\.css$")
    ///     .unwrap()
    ///     .loader("postcss-loader")
    ///     .with_type(ModuleType::Css);
    /// assert_eq!(rule.loaders.len(), 1);
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            test: FilePattern::new(pattern)?,
            loaders: Vec::new(),
            module_type: None,
        })
    }

    /// Append a loader to the end of the chain
    pub fn loader(mut self, loader: impl Into<LoaderInvocation>) -> Self {
        self.loaders.push(loader.into());
        self
    }

    pub fn with_type(mut self, module_type: ModuleType) -> Self {
        self.module_type = Some(module_type);
        self
    }

    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path)
    }
}
