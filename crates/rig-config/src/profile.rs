//! Profile overrides: named partial documents merged over the base configuration.

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Key holding the profile table in configuration files
pub const PROFILES_KEY: &str = "profiles";

/// Deep-merge `update` into `target`.
///
/// Objects merge key by key; arrays and scalars replace whatever was there.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Strip the profile table from `document` and merge the selected profile over it.
///
/// With `profile = None` the table is only removed.
pub fn apply_profile(document: &mut Value, profile: Option<&str>) -> Result<()> {
    let available = profile_names(document);
    let profiles = document
        .as_object_mut()
        .and_then(|map| map.shift_remove(PROFILES_KEY));

    let Some(name) = profile else {
        return Ok(());
    };

    let overrides = profiles
        .as_ref()
        .and_then(|table| table.get(name))
        .ok_or_else(|| ConfigError::ProfileNotFound {
            name: name.to_string(),
            available,
        })?;

    if !overrides.is_object() {
        return Err(ConfigError::invalid_value(
            format!("{PROFILES_KEY}.{name}"),
            "profile must be a table of overrides",
        ));
    }

    debug!(profile = name, "applying profile overrides");
    merge_values(document, overrides);
    Ok(())
}

/// Names of the profiles declared in `document`, in declaration order
pub fn profile_names(document: &Value) -> Vec<String> {
    document
        .get(PROFILES_KEY)
        .and_then(Value::as_object)
        .map(|table| table.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_replaces_scalars() {
        let mut base = json!({ "mode": "production" });
        merge_values(&mut base, &json!({ "mode": "development" }));
        assert_eq!(base, json!({ "mode": "development" }));
    }

    #[test]
    fn merge_recurses_into_objects() {
        let mut base = json!({ "experiments": { "css": true, "layers": false } });
        merge_values(&mut base, &json!({ "experiments": { "layers": true } }));
        assert_eq!(base, json!({ "experiments": { "css": true, "layers": true } }));
    }

    #[test]
    fn merge_replaces_arrays() {
        let mut base = json!({ "optimization": { "minimizer": [{ "name": "A" }] } });
        merge_values(&mut base, &json!({ "optimization": { "minimizer": [] } }));
        assert_eq!(base, json!({ "optimization": { "minimizer": [] } }));
    }

    #[test]
    fn merge_fills_missing_keys() {
        let mut base = json!({});
        merge_values(&mut base, &json!({ "entry": { "admin": "./web/admin.js" } }));
        assert_eq!(base["entry"]["admin"], json!("./web/admin.js"));
    }

    #[test]
    fn apply_profile_removes_table() {
        let mut document = json!({ "mode": "production", "profiles": { "dev": {} } });
        apply_profile(&mut document, None).unwrap();
        assert!(document.get("profiles").is_none());
    }

    #[test]
    fn apply_profile_merges_selected() {
        let mut document = json!({
            "mode": "production",
            "profiles": { "dev": { "mode": "development" } }
        });
        apply_profile(&mut document, Some("dev")).unwrap();
        assert_eq!(document, json!({ "mode": "development" }));
    }

    #[test]
    fn apply_profile_rejects_missing() {
        let mut document = json!({ "mode": "production" });
        let err = apply_profile(&mut document, Some("staging")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ProfileNotFound { name, available } if name == "staging" && available.is_empty())
        );
    }

    #[test]
    fn missing_profile_reports_declared_ones() {
        let mut document = json!({ "profiles": { "dev": {}, "ci": {} } });
        let err = apply_profile(&mut document, Some("staging")).unwrap_err();
        match err {
            ConfigError::ProfileNotFound { available, .. } => {
                assert_eq!(available, vec!["dev".to_string(), "ci".to_string()]);
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn merge_keeps_existing_key_positions() {
        let mut base = json!({ "entry": { "worker": "./w.js", "main": "./m.js" } });
        merge_values(
            &mut base,
            &json!({ "entry": { "main": "./main.js", "admin": "./a.js" } }),
        );
        let keys: Vec<&String> = base["entry"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["worker", "main", "admin"]);
    }

    #[test]
    fn apply_profile_rejects_non_table() {
        let mut document = json!({ "profiles": { "dev": true } });
        let err = apply_profile(&mut document, Some("dev")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn lists_profile_names() {
        let document = json!({ "profiles": { "dev": {}, "ci": {} } });
        assert_eq!(profile_names(&document), vec!["dev".to_string(), "ci".to_string()]);
    }
}
