//! Flattened JSON resources such as language files.
//!
//! Translations are easier to write nested:
//!
//! ```json
//! { "block": { "mymod": { "pillar": "Pillar" } } }
//! ```
//!
//! but the game expects a single level of dotted keys:
//!
//! ```json
//! { "block.mymod.pillar": "Pillar" }
//! ```

use crate::error::{DatagenError, Result};
use crate::resource::MinecraftResource;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default separator placed between nested keys.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Default top-level folder of a flattened resource.
pub const DEFAULT_FOLDER: &str = "assets";

/// Collapse nested objects into a single object with joined keys.
///
/// Only objects are descended into; arrays and primitives are copied as
/// leaves. Empty nested objects contribute nothing. Keys come out in
/// depth-first declaration order, and a later key that joins to the same
/// string as an earlier one overwrites its value.
pub fn flatten(object: &Map<String, Value>, separator: &str) -> Map<String, Value> {
    let mut result = Map::new();
    flatten_into(&mut result, None, object, separator);
    result
}

fn flatten_into(
    result: &mut Map<String, Value>,
    prefix: Option<&str>,
    object: &Map<String, Value>,
    separator: &str,
) {
    for (key, value) in object {
        let full_key = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, separator, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(result, Some(&full_key), nested, separator),
            leaf => {
                result.insert(full_key, leaf.clone());
            }
        }
    }
}

/// A JSON object written out flattened, e.g. `assets/<ns>/lang/en_us.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedJson {
    location: String,
    json: Map<String, Value>,
    folder: String,
    separator: String,
}

impl FlattenedJson {
    /// Wrap an object that will be written to `<folder>/<namespace>/<location>/`.
    pub fn new(location: impl Into<String>, json: Map<String, Value>) -> Self {
        Self {
            location: location.into(),
            json,
            folder: DEFAULT_FOLDER.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Wrap any JSON value, which must be an object.
    pub fn from_value(location: impl Into<String>, value: Value) -> Result<Self> {
        let location = location.into();
        match value {
            Value::Object(json) => Ok(Self::new(location, json)),
            other => Err(DatagenError::NotAnObject(format!(
                "source for '{}' is {}",
                location,
                json_kind(&other)
            ))),
        }
    }

    /// Parse a hand-written source. Comments, unquoted keys and trailing
    /// commas are accepted (JSON5); the top level must be an object.
    pub fn parse(text: &str, location: impl Into<String>) -> Result<Self> {
        let value: Value = json5::from_str(text)?;
        Self::from_value(location, value)
    }

    /// Load the object from a JSON or JSON5 file.
    pub fn from_file<P: AsRef<Path>>(path: P, location: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading flattened JSON source {:?}", path);

        let contents = std::fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        match value {
            Value::Object(json) => Ok(Self::new(location, json)),
            other => Err(DatagenError::NotAnObject(format!(
                "{:?} contains {}",
                path,
                json_kind(&other)
            ))),
        }
    }

    /// Change the top-level folder (`assets` or `data`).
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn generate(&self) -> Result<Value> {
        Ok(Value::Object(flatten(&self.json, &self.separator)))
    }
}

impl MinecraftResource for FlattenedJson {
    fn generate(&self) -> Result<Value> {
        FlattenedJson::generate(self)
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        base_dir
            .join(&self.folder)
            .join(namespace)
            .join(&self.location)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_flatten_nested() {
        let source = object(json!({
            "block": {
                "mymod": { "pillar": "Pillar", "slab": "Slab" }
            },
            "item": { "mymod": { "gem": "Gem" } },
            "title": "My Mod"
        }));

        let flat = flatten(&source, ".");
        assert_eq!(
            Value::Object(flat.clone()),
            json!({
                "block.mymod.pillar": "Pillar",
                "block.mymod.slab": "Slab",
                "item.mymod.gem": "Gem",
                "title": "My Mod"
            })
        );
        assert_eq!(
            keys(&flat),
            vec!["block.mymod.pillar", "block.mymod.slab", "item.mymod.gem", "title"]
        );
    }

    #[test]
    fn test_flatten_custom_separator_applies_at_every_depth() {
        let source = object(json!({ "a": { "b": { "c": 1 } } }));
        assert_eq!(Value::Object(flatten(&source, "/")), json!({ "a/b/c": 1 }));
    }

    #[test]
    fn test_arrays_and_primitives_are_leaves() {
        let source = object(json!({
            "list": [{ "nested": true }, 2],
            "n": null,
            "group": { "flag": false, "count": 3.5 }
        }));
        assert_eq!(
            Value::Object(flatten(&source, ".")),
            json!({
                "list": [{ "nested": true }, 2],
                "n": null,
                "group.flag": false,
                "group.count": 3.5
            })
        );
    }

    #[test]
    fn test_empty_nested_object_is_dropped() {
        let source = object(json!({ "a": {}, "b": { "c": {} }, "d": 1 }));
        assert_eq!(Value::Object(flatten(&source, ".")), json!({ "d": 1 }));
    }

    #[test]
    fn test_flat_object_is_unchanged() {
        let source = object(json!({ "x": 1, "y.z": "two", "w": [3] }));
        let flat = flatten(&source, ".");
        assert_eq!(flat, source);
        assert_eq!(keys(&flat), vec!["x", "y.z", "w"]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let source = object(json!({
            "a": { "b": { "c": 1, "d": [1, 2] }, "e": "f" },
            "g": { "h": {} },
            "i": true
        }));
        let once = flatten(&source, ".");
        let twice = flatten(&once, ".");
        assert_eq!(once, twice);
        assert_eq!(keys(&once), keys(&twice));
    }

    #[test]
    fn test_colliding_keys_keep_last_value() {
        let source = object(json!({ "a.b": 1, "a": { "b": 2 } }));
        assert_eq!(Value::Object(flatten(&source, ".")), json!({ "a.b": 2 }));
    }

    #[test]
    fn test_flattened_json_resource() {
        let resource = FlattenedJson::from_value("lang", json!({ "a": { "b": "c" } }))
            .unwrap()
            .with_separator("_");
        assert_eq!(resource.generate().unwrap(), json!({ "a_b": "c" }));
        assert_eq!(
            resource.output_directory(Path::new("out"), "mymod"),
            Path::new("out/assets/mymod/lang")
        );

        let data = resource.with_folder("data");
        assert_eq!(
            data.output_directory(Path::new("out"), "mymod"),
            Path::new("out/data/mymod/lang")
        );
    }

    #[test]
    fn test_non_object_source_is_rejected() {
        assert!(matches!(
            FlattenedJson::from_value("lang", json!(["a"])),
            Err(DatagenError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_us.json");
        std::fs::write(&path, r#"{ "block": { "mymod": { "pillar": "Pillar" } } }"#).unwrap();

        let resource = FlattenedJson::from_file(&path, "lang").unwrap();
        assert_eq!(
            resource.generate().unwrap(),
            json!({ "block.mymod.pillar": "Pillar" })
        );

        std::fs::write(&path, "42").unwrap();
        assert!(matches!(
            FlattenedJson::from_file(&path, "lang"),
            Err(DatagenError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_from_file_accepts_comments_and_unquoted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_us.json");
        std::fs::write(
            &path,
            "{ // blocks\n block: { mymod: { pillar: \"Pillar\", }, },\n /* items */ item: { mymod: { gem: 'Gem' } }, }",
        )
        .unwrap();

        let value = FlattenedJson::from_file(&path, "lang").unwrap().generate().unwrap();
        assert_eq!(
            value,
            json!({ "block.mymod.pillar": "Pillar", "item.mymod.gem": "Gem" })
        );
        assert_eq!(
            keys(value.as_object().unwrap()),
            vec!["block.mymod.pillar", "item.mymod.gem"]
        );
    }

    #[test]
    fn test_parse_lenient_source() {
        let resource = FlattenedJson::parse("{ a: { b: \"c\", }, }", "lang").unwrap();
        assert_eq!(resource.generate().unwrap(), json!({ "a.b": "c" }));

        assert!(matches!(
            FlattenedJson::parse("[1, 2]", "lang"),
            Err(DatagenError::NotAnObject(_))
        ));
        assert!(matches!(
            FlattenedJson::parse("{ a: ", "lang"),
            Err(DatagenError::Json5(_))
        ));
    }
}
