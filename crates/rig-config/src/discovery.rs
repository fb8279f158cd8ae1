//! File-based config discovery for CLI use
//!
//! Finds the project configuration file, applies an optional profile, layers
//! environment variables on top, and validates the result.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::Env;
use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::config::BuildConfiguration;
use crate::error::{ConfigError, Result};
use crate::profile::{apply_profile, merge_values};

/// Prefix for environment overrides (`RIG_MODE`, `RIG_EXPERIMENTS__CSS`, ...)
pub const DEFAULT_ENV_PREFIX: &str = "RIG_";

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["rig.toml", "rig.json"];

/// Field read from package.json
pub const PACKAGE_JSON_FIELD: &str = "rig";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use rig_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".")
///     .with_env_prefix("RIG_")
///     .load_with_profile("development")
///     .unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    env_prefix: Option<String>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_prefix: None,
        }
    }

    /// Let environment variables with this prefix override file values.
    ///
    /// `__` separates nested keys: `RIG_ENTRY__MAIN=./src/main.js`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. rig.toml
    /// 2. rig.json
    /// 3. package.json (rig field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in CONFIG_FILE_NAMES {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BuildConfiguration> {
        let path = self.find_or_err()?;
        self.load_file(&path, None)
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<BuildConfiguration> {
        let path = self.find_or_err()?;
        self.load_file(&path, Some(profile))
    }

    /// Load config from a specific file path
    pub fn load_file(&self, path: &Path, profile: Option<&str>) -> Result<BuildConfiguration> {
        debug!(path = %path.display(), ?profile, "loading configuration");
        let mut document = read_document(path)?;
        apply_profile(&mut document, profile)?;

        if let Some(prefix) = &self.env_prefix {
            layer_env(&mut document, prefix)?;
        }

        BuildConfiguration::from_value(document)
    }

    fn find_or_err(&self) -> Result<PathBuf> {
        self.find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))
    }
}

/// Read a configuration file into a JSON document, profiles included.
pub fn read_document(path: &Path) -> Result<Value> {
    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return read_package_json(path);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    match extension {
        "toml" => {
            let content = fs::read_to_string(path)?;
            let table: toml::Table = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid_value("toml", format!("invalid TOML syntax: {e}")))?;
            serde_json::to_value(table).map_err(|e| {
                ConfigError::invalid_value("toml", format!("TOML to JSON conversion failed: {e}"))
            })
        }
        "json" => {
            let content = fs::read_to_string(path)?;
            let document = serde_json::from_str(&content)
                .map_err(|e| ConfigError::invalid_value("json", format!("invalid JSON: {e}")))?;
            if let Ok(declared) = serde_json::from_str::<DeclaredEntries>(&content) {
                declared.check()?;
            }
            Ok(document)
        }
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_package_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let mut parsed: Value = serde_json::from_str(&content)
        .map_err(|e| ConfigError::invalid_value("package.json", format!("invalid JSON: {e}")))?;
    if let Ok(PackageEntries { rig: Some(declared) }) =
        serde_json::from_str::<PackageEntries>(&content)
    {
        declared.check()?;
    }

    match parsed.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
        Some(Value::Null) | None => Err(ConfigError::invalid_value(
            PACKAGE_JSON_FIELD,
            "add a 'rig' field to your package.json",
        )),
        Some(value) => Ok(value),
    }
}

/// Entry names exactly as written in a JSON document.
///
/// Parsing into a [`Value`] keeps only the last of two equal keys, so repeated
/// entry names are looked for in the raw text.
#[derive(Deserialize)]
struct DeclaredEntries {
    #[serde(default, deserialize_with = "entry_names")]
    entry: Vec<String>,
    #[serde(default)]
    profiles: IndexMap<String, DeclaredEntries>,
}

#[derive(Deserialize)]
struct PackageEntries {
    rig: Option<DeclaredEntries>,
}

impl DeclaredEntries {
    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(name) = self.entry.iter().find(|&name| !seen.insert(name.as_str())) {
            return Err(ConfigError::DuplicateEntry { name: name.clone() });
        }
        self.profiles.values().try_for_each(DeclaredEntries::check)
    }
}

fn entry_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NamesVisitor;

    impl<'de> Visitor<'de> for NamesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a table of entry points")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut names = Vec::new();
            while let Some((name, IgnoredAny)) = access.next_entry::<String, IgnoredAny>()? {
                names.push(name);
            }
            Ok(names)
        }
    }

    deserializer.deserialize_map(NamesVisitor)
}

/// Merge prefixed environment variables over `document`.
///
/// Only the variables go through figment; merging them into the document
/// keeps its key order, and new keys land after the existing ones.
fn layer_env(document: &mut Value, prefix: &str) -> Result<()> {
    debug!(prefix, "layering environment overrides");
    let overrides: Value = Figment::from(Env::prefixed(prefix).split("__"))
        .extract()
        .map_err(|e| ConfigError::invalid_value("environment", e))?;
    merge_values(document, &overrides);
    Ok(())
}

/// Discover and load config from the current directory, honoring `RIG_` variables.
pub fn discover() -> Result<BuildConfiguration> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root)
        .with_env_prefix(DEFAULT_ENV_PREFIX)
        .load()
}

/// Discover and load config with a profile (convenience function)
pub fn discover_with_profile(profile: &str) -> Result<BuildConfiguration> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root)
        .with_env_prefix(DEFAULT_ENV_PREFIX)
        .load_with_profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rig.json"), "{}").unwrap();
        fs::write(dir.path().join("rig.toml"), "").unwrap();
        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert!(found.ends_with("rig.toml"));
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rig.yaml");
        fs::write(&path, "entry: {}").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn repeated_entry_name_in_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rig.json");
        fs::write(&path, r#"{ "entry": { "main": "./a.js", "main": "./b.js" } }"#).unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEntry { name } if name == "main"));
    }

    #[test]
    fn repeated_entry_name_in_profile_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{ "rig": {
                "entry": { "main": "./a.js" },
                "profiles": { "admin": { "entry": { "admin": "./x.js", "admin": "./y.js" } } }
            } }"#,
        )
        .unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEntry { name } if name == "admin"));
    }

    #[test]
    fn malformed_entry_table_is_left_to_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rig.json");
        fs::write(&path, r#"{ "entry": ["./a.js"] }"#).unwrap();
        let document = read_document(&path).unwrap();
        assert!(document["entry"].is_array());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
