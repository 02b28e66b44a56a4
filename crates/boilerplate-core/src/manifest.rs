//! Access to a project's `package.json`
//!
//! The manifest is kept as an ordered JSON object so that writing it back
//! only touches the fields we change.

use crate::error::{ProjectError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File name of the dependency manifest at a project's top level
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency key identifying a React Native project
pub const FRAMEWORK_KEY: &str = "react-native";

/// A parsed `package.json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.insert("name".to_string(), Value::String(name.into()));
    }

    fn section_contains(&self, section: &str, key: &str) -> bool {
        self.fields
            .get(section)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(key))
    }

    /// True when `dependencies` declares `key`
    pub fn has_runtime_dependency(&self, key: &str) -> bool {
        self.section_contains("dependencies", key)
    }

    /// True when either `dependencies` or `devDependencies` declares `key`
    pub fn has_dependency(&self, key: &str) -> bool {
        self.has_runtime_dependency(key) || self.section_contains("devDependencies", key)
    }

    pub fn is_react_native(&self) -> bool {
        self.has_dependency(FRAMEWORK_KEY)
    }
}

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// Check whether `dir` contains a `package.json`
pub fn exists(dir: &Path) -> bool {
    manifest_path(dir).is_file()
}

/// Read and parse `dir/package.json`
pub fn read(dir: &Path) -> Result<Manifest> {
    let path = manifest_path(dir);
    read_json_object(&path).map(|fields| Manifest { fields })
}

/// Read `dir/package.json`, treating a missing or malformed file as absent
pub fn try_read(dir: &Path) -> Option<Manifest> {
    read(dir).ok()
}

/// Overwrite `dir/package.json` with 2-space indented JSON
pub fn write(dir: &Path, manifest: &Manifest) -> Result<()> {
    write_json_object(&manifest_path(dir), &manifest.fields)
}

pub(crate) fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|e| ProjectError::unreadable(path.to_path_buf(), e))
}

pub(crate) fn write_json_object(path: &Path, fields: &Map<String, Value>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(fields)
        .map_err(|e| ProjectError::ManifestWrite {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    content.push('\n');
    std::fs::write(path, content).map_err(|source| ProjectError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(value).unwrap()
    }

    #[test]
    fn test_detects_react_native_in_either_section() {
        assert!(manifest(json!({"dependencies": {"react-native": "0.76.0"}})).is_react_native());
        assert!(
            manifest(json!({"devDependencies": {"react-native": "^0.70.0"}})).is_react_native()
        );
        assert!(!manifest(json!({"dependencies": {"express": "^4.0.0"}})).is_react_native());
        assert!(!manifest(json!({"name": "plain"})).is_react_native());
    }

    #[test]
    fn test_framework_key_is_exact() {
        let m = manifest(json!({"dependencies": {"react-native-web": "1.0.0", "React-Native": "1"}}));
        assert!(!m.is_react_native());
    }

    #[test]
    fn test_runtime_dependency_ignores_dev_section() {
        let m = manifest(json!({"devDependencies": {"canvas": "^2.11.2"}}));
        assert!(m.has_dependency("canvas"));
        assert!(!m.has_runtime_dependency("canvas"));
    }

    #[test]
    fn test_exists_and_read() {
        let dir = TempDir::new().unwrap();
        assert!(!exists(dir.path()));
        assert!(matches!(
            read(dir.path()),
            Err(ProjectError::ManifestUnreadable { .. })
        ));

        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"name": "demo"}"#).unwrap();
        assert!(exists(dir.path()));
        assert_eq!(read(dir.path()).unwrap().name(), Some("demo"));
    }

    #[test]
    fn test_malformed_manifest_is_unreadable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(exists(dir.path()));
        assert!(read(dir.path()).is_err());
        assert!(try_read(dir.path()).is_none());

        std::fs::write(dir.path().join(MANIFEST_FILE), "[1, 2, 3]").unwrap();
        assert!(try_read(dir.path()).is_none());
    }

    #[test]
    fn test_write_preserves_field_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"version": "1.0.0", "name": "old", "scripts": {"ios": "react-native run-ios"}}"#,
        )
        .unwrap();

        let mut m = read(dir.path()).unwrap();
        m.set_name("new-name");
        write(dir.path(), &m).unwrap();

        let content = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(content.starts_with("{\n  \"version\": \"1.0.0\",\n  \"name\": \"new-name\""));
        assert!(content.ends_with("}\n"));
        assert_eq!(read(dir.path()).unwrap().name(), Some("new-name"));
    }
}
