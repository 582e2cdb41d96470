//! Forward migration of stored and imported data.
//!
//! Older blobs miss settings that later releases introduced. Each rule only
//! fills in what is absent, so running the whole set twice is a no-op.

use crate::core::error::{Error, Result};
use crate::data::model::AppData;
use serde_json::{json, Map, Value};

const REQUIRED_KEYS: [&str; 3] = ["settings", "favorites", "folders"];

/// Check the top-level layout: `settings` object, `favorites` and `folders` arrays.
pub fn check_shape(value: &Value) -> std::result::Result<(), String> {
    let root = value
        .as_object()
        .ok_or_else(|| "top level is not a JSON object".to_string())?;

    for key in REQUIRED_KEYS {
        if !root.contains_key(key) {
            return Err(format!("missing `{}`", key));
        }
    }
    if !root["settings"].is_object() {
        return Err("`settings` is not an object".to_string());
    }
    for key in ["favorites", "folders"] {
        if !root[key].is_array() {
            return Err(format!("`{}` is not an array", key));
        }
    }
    if root["folders"].as_array().into_iter().flatten().any(|f| !f.is_object()) {
        return Err("`folders` contains a non-object entry".to_string());
    }
    Ok(())
}

/// Apply every migration rule in order. Returns true if anything was added.
///
/// Expects a value that passed [`check_shape`]; anything else is left alone.
pub fn migrate(value: &mut Value) -> bool {
    let mut changed = false;

    if let Some(settings) = value.get_mut("settings").and_then(Value::as_object_mut) {
        changed |= ensure(settings, "background", || {
            json!({
                "type": "color",
                "color": "",
                "gradient": "",
                "imageUrl": "",
                "opacity": 1
            })
        });
        changed |= ensure(settings, "folderScrollMode", || json!("fixed"));
        changed |= ensure(settings, "language", || json!("auto"));
    }

    if let Some(folders) = value.get_mut("folders").and_then(Value::as_array_mut) {
        for folder in folders.iter_mut().filter_map(Value::as_object_mut) {
            if !folder.contains_key("color") {
                folder.insert("color".to_string(), json!(""));
                changed = true;
            }
        }
    }

    changed
}

// Treats an explicit null or empty string the same as a missing field.
fn ensure(map: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> Value) -> bool {
    let missing = match map.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing {
        map.insert(key.to_string(), default());
    }
    missing
}

/// Parse a user-supplied backup file. Every failure is an [`Error::ImportFormat`].
pub fn parse_backup(raw: &str) -> Result<AppData> {
    let mut value: Value =
        serde_json::from_str(raw).map_err(|e| Error::ImportFormat(e.to_string()))?;
    check_shape(&value).map_err(Error::ImportFormat)?;
    migrate(&mut value);
    serde_json::from_value(value).map_err(|e| Error::ImportFormat(e.to_string()))
}

/// Parse a blob read back from storage. Returns the data and whether migration changed it.
pub fn parse_stored(raw: &str) -> Result<(AppData, bool)> {
    let mut value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::Serialization(format!("Failed to parse stored data: {}", e)))?;
    check_shape(&value)
        .map_err(|e| Error::Serialization(format!("Stored data is malformed: {}", e)))?;
    let changed = migrate(&mut value);
    let data = serde_json::from_value(value)
        .map_err(|e| Error::Serialization(format!("Failed to decode stored data: {}", e)))?;
    Ok((data, changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BackgroundKind, Language, ScrollMode};

    fn legacy_blob() -> Value {
        json!({
            "settings": { "theme": "dark", "showFavorites": true, "folderRows": 1 },
            "favorites": [{ "id": "fav1", "name": "Naver", "url": "https://naver.com" }],
            "folders": [{ "id": "folder1", "name": "Work", "emoji": "💼", "sites": [] }]
        })
    }

    #[test]
    fn test_migrate_fills_missing_fields() {
        let mut value = legacy_blob();
        assert!(migrate(&mut value));

        assert_eq!(value["settings"]["background"]["type"], "color");
        assert_eq!(value["settings"]["background"]["opacity"], 1);
        assert_eq!(value["settings"]["folderScrollMode"], "fixed");
        assert_eq!(value["settings"]["language"], "auto");
        assert_eq!(value["folders"][0]["color"], "");
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut value = legacy_blob();
        migrate(&mut value);
        let once = value.clone();

        assert!(!migrate(&mut value));
        assert_eq!(value, once);
    }

    #[test]
    fn test_migrate_keeps_existing_values() {
        let mut value = legacy_blob();
        value["settings"]["language"] = json!("ko");
        value["folders"][0]["color"] = json!("#ff0000");
        migrate(&mut value);

        assert_eq!(value["settings"]["language"], "ko");
        assert_eq!(value["folders"][0]["color"], "#ff0000");
    }

    #[test]
    fn test_check_shape_rejects_missing_keys() {
        for key in REQUIRED_KEYS {
            let mut value = legacy_blob();
            value.as_object_mut().unwrap().remove(key);
            let err = check_shape(&value).unwrap_err();
            assert!(err.contains(key));
        }
        assert!(check_shape(&json!([])).is_err());
        assert!(check_shape(&json!({"settings": {}, "favorites": {}, "folders": []})).is_err());
    }

    #[test]
    fn test_parse_backup_applies_migration() {
        let data = parse_backup(&legacy_blob().to_string()).unwrap();
        assert_eq!(data.settings.folder_rows, 1);
        assert_eq!(data.settings.folder_scroll_mode, ScrollMode::Fixed);
        assert_eq!(data.settings.language, Language::Auto);
        assert_eq!(data.settings.background.kind, BackgroundKind::Color);
        assert_eq!(data.folders[0].color, "");
    }

    #[test]
    fn test_parse_backup_accepts_null_text_fields() {
        let raw = r#"{
            "settings": {},
            "favorites": [{"id": "f", "name": "Fav", "url": "https://f.test", "memo": null}],
            "folders": [{"id": "d", "name": "Dir", "emoji": null, "color": null,
                         "sites": [{"id": "s", "name": "Site", "url": "https://s.test", "memo": null}]}]
        }"#;
        let data = parse_backup(raw).unwrap();
        assert_eq!(data.favorites[0].memo, "");
        assert_eq!(data.folders[0].emoji, "");
        assert_eq!(data.folders[0].color, "");
        assert_eq!(data.folders[0].sites[0].memo, "");
    }

    #[test]
    fn test_parse_backup_rejects_garbage() {
        assert!(matches!(parse_backup("not json"), Err(Error::ImportFormat(_))));
        assert!(matches!(
            parse_backup(r#"{"settings":{},"favorites":[]}"#),
            Err(Error::ImportFormat(_))
        ));
        assert!(matches!(
            parse_backup(r#"{"settings":{},"favorites":[{"id":1}],"folders":[]}"#),
            Err(Error::ImportFormat(_))
        ));
    }
}
