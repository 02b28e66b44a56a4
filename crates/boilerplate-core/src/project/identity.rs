//! Project name, display name and iOS scheme detection

use crate::error::Result;
use crate::manifest::{self, read_json_object, write_json_object};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Name used when neither `app.json` nor `package.json` provide one
pub const DEFAULT_APP_NAME: &str = "ExApp";

/// File name of the app descriptor carrying display metadata
pub const APP_DESCRIPTOR_FILE: &str = "app.json";

/// Folders under `ios/` that are never the app's scheme folder
const IOS_EXCLUDED_DIRS: &[&str] = &["Pods", "build", "DerivedData"];

/// The fields of `app.json` used for naming
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppDescriptor {
    pub name: Option<String>,
    pub display_name: Option<String>,
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl AppDescriptor {
    /// Read `dir/app.json`; a missing or malformed file is `None`.
    ///
    /// Each field is taken on its own, so a non-string value only drops
    /// that field.
    pub fn try_read(dir: &Path) -> Option<Self> {
        let fields = read_json_object(&dir.join(APP_DESCRIPTOR_FILE)).ok()?;
        Some(Self {
            name: string_field(&fields, "name"),
            display_name: string_field(&fields, "displayName"),
        })
    }

    /// Best available label: `displayName`, then `name`
    pub fn preferred_name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.name.as_deref())
    }
}

/// Derived, read-only identity of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
    pub display_name: String,
    /// Folder under `ios/` holding the Xcode target (scheme) sources
    pub ios_scheme: String,
}

impl ProjectIdentity {
    pub fn ios_target_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join("ios").join(&self.ios_scheme)
    }
}

/// Resolve the app name: `app.json`, then `package.json` name, then `ExApp`
pub fn get_name(dir: &Path) -> String {
    AppDescriptor::try_read(dir)
        .and_then(|app| app.preferred_name().map(str::to_string))
        .or_else(|| manifest::try_read(dir).and_then(|m| m.name().map(str::to_string)))
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
}

/// Resolve name, display name and iOS scheme of the project at `dir`
pub fn get_identity(dir: &Path) -> ProjectIdentity {
    let name = get_name(dir);

    let display_name = AppDescriptor::try_read(dir)
        .and_then(|app| app.preferred_name().map(str::to_string))
        .unwrap_or_else(|| name.clone());

    let ios_scheme = detect_ios_scheme(&dir.join("ios")).unwrap_or_else(|| name.clone());

    ProjectIdentity {
        name,
        display_name,
        ios_scheme,
    }
}

/// Pick the scheme folder under `ios_dir`.
///
/// When several candidates exist the lexicographically smallest is used so
/// the result does not depend on directory listing order.
fn detect_ios_scheme(ios_dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(ios_dir).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if IOS_EXCLUDED_DIRS.contains(&name.as_str()) {
                return None;
            }
            let is_dir = std::fs::metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            is_dir.then_some(name)
        })
        .min()
}

/// Set `name` and `displayName` in `dir/app.json`, keeping every other key
pub fn write_app_descriptor(dir: &Path, name: &str, display_name: &str) -> Result<()> {
    let path = dir.join(APP_DESCRIPTOR_FILE);
    let mut fields = if path.is_file() {
        read_json_object(&path)?
    } else {
        Map::new()
    };

    fields.insert("name".to_string(), Value::String(name.to_string()));
    fields.insert(
        "displayName".to_string(),
        Value::String(display_name.to_string()),
    );

    write_json_object(&path, &fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_name_prefers_display_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp", "displayName": "MyAwesomeApp"}"#);

        assert_eq!(get_name(tmp.path()), "MyAwesomeApp");
    }

    #[test]
    fn test_name_falls_back_to_app_json_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"name": "MyProject"}"#);

        assert_eq!(get_name(tmp.path()), "MyProject");
    }

    #[test]
    fn test_expo_section_is_not_a_name_source() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"expo": {"name": "ExpoApp"}}"#);
        write(
            tmp.path(),
            "package.json",
            r#"{"name": "pkg-name", "dependencies": {"react-native": "0.76.0"}}"#,
        );

        assert_eq!(get_name(tmp.path()), "pkg-name");
        assert_eq!(get_identity(tmp.path()).display_name, "pkg-name");
    }

    #[test]
    fn test_non_string_field_keeps_other_fields() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"name": "Good", "displayName": 5}"#);

        assert_eq!(get_name(tmp.path()), "Good");
        assert_eq!(
            AppDescriptor::try_read(tmp.path()),
            Some(AppDescriptor {
                name: Some("Good".to_string()),
                display_name: None,
            })
        );
    }

    #[test]
    fn test_name_falls_back_to_package_json() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "package.json",
            r#"{"name": "fallback-project", "dependencies": {"react-native": "^0.70.0"}}"#,
        );

        assert_eq!(get_name(tmp.path()), "fallback-project");
    }

    #[test]
    fn test_malformed_app_json_falls_through() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", "{ nope");
        write(tmp.path(), "package.json", r#"{"name": "from-package"}"#);

        assert_eq!(get_name(tmp.path()), "from-package");
    }

    #[test]
    fn test_app_json_without_names_falls_through() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"displayName": ""}"#);
        write(tmp.path(), "package.json", r#"{"name": "from-package"}"#);

        assert_eq!(get_name(tmp.path()), "from-package");
    }

    #[test]
    fn test_default_name_without_files() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(get_name(tmp.path()), DEFAULT_APP_NAME);
    }

    #[test]
    fn test_identity_reuses_name_without_ios_dir() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "package.json", r#"{"name": "fallback-project"}"#);

        let identity = get_identity(tmp.path());
        assert_eq!(identity.name, get_name(tmp.path()));
        assert_eq!(identity.display_name, "fallback-project");
        assert_eq!(identity.ios_scheme, "fallback-project");
    }

    #[test]
    fn test_identity_display_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp", "displayName": "Ex App"}"#);

        let identity = get_identity(tmp.path());
        assert_eq!(identity.name, "Ex App");
        assert_eq!(identity.display_name, "Ex App");
    }

    #[test]
    fn test_ios_scheme_skips_excluded_and_files() {
        let tmp = TempDir::new().unwrap();
        let ios = tmp.path().join("ios");
        for dir in ["Pods", "build", "DerivedData", "MyScheme"] {
            std::fs::create_dir_all(ios.join(dir)).unwrap();
        }
        std::fs::write(ios.join("Podfile"), "").unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp"}"#);

        let identity = get_identity(tmp.path());
        assert_eq!(identity.ios_scheme, "MyScheme");
        assert_eq!(identity.ios_target_dir(tmp.path()), ios.join("MyScheme"));
    }

    #[test]
    fn test_ios_scheme_only_excluded_falls_back_to_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("ios").join("Pods")).unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp"}"#);

        assert_eq!(get_identity(tmp.path()).ios_scheme, "ExApp");
    }

    #[cfg(unix)]
    #[test]
    fn test_ios_scheme_skips_dangling_symlink() {
        let tmp = TempDir::new().unwrap();
        let ios = tmp.path().join("ios");
        std::fs::create_dir_all(ios.join("Real")).unwrap();
        std::os::unix::fs::symlink("/nonexistent", ios.join("Broken")).unwrap();

        assert_eq!(get_identity(tmp.path()).ios_scheme, "Real");
    }

    #[cfg(unix)]
    #[test]
    fn test_ios_scheme_only_dangling_symlink_falls_back_to_name() {
        let tmp = TempDir::new().unwrap();
        let ios = tmp.path().join("ios");
        std::fs::create_dir_all(&ios).unwrap();
        std::os::unix::fs::symlink("/nonexistent", ios.join("Broken")).unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp"}"#);

        assert_eq!(get_identity(tmp.path()).ios_scheme, "ExApp");
    }

    #[test]
    fn test_ios_scheme_multiple_candidates_is_lexicographic() {
        let tmp = TempDir::new().unwrap();
        let ios = tmp.path().join("ios");
        for dir in ["Zeta", "Alpha", "Mid"] {
            std::fs::create_dir_all(ios.join(dir)).unwrap();
        }

        assert_eq!(get_identity(tmp.path()).ios_scheme, "Alpha");
    }

    #[test]
    fn test_rename_changes_name_between_reads() {
        let tmp = TempDir::new().unwrap();
        write_app_descriptor(tmp.path(), "ExApp", "ExApp").unwrap();
        assert_eq!(get_name(tmp.path()), "ExApp");

        write_app_descriptor(tmp.path(), "MyNewApp", "MyNewApp").unwrap();
        assert_eq!(get_name(tmp.path()), "MyNewApp");
    }

    #[test]
    fn test_write_app_descriptor_keeps_other_keys() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app.json", r#"{"name": "ExApp", "plugins": ["a"]}"#);

        write_app_descriptor(tmp.path(), "Next", "Next App").unwrap();

        let content = std::fs::read_to_string(tmp.path().join("app.json")).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["plugins"][0], "a");
        assert_eq!(value["displayName"], "Next App");
    }
}
