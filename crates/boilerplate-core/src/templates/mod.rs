//! Template lookup and copying
//!
//! This module provides:
//! - Root template manifest types (`templates/template.yaml`)
//! - Template variant lookup under the CLI's base installation directory
//! - Recursive template copying with exclusion filtering
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod version;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use copier::copy_template;
pub use manifest::{RootManifest, TemplateVariant};
pub use version::check_compatibility;

/// Name of the root manifest inside the templates directory
pub const ROOT_MANIFEST_FILE: &str = "template.yaml";

/// A template variant resolved to a directory on disk
#[derive(Debug, Clone)]
pub struct LocatedTemplate {
    pub variant: TemplateVariant,
    pub path: PathBuf,
    pub excludes: Vec<String>,
}

/// Directory holding all template variants
pub fn templates_root(base_dir: &Path) -> PathBuf {
    base_dir.join("templates")
}

/// Load `templates/template.yaml`, or the built-in manifest when absent
pub fn load_root_manifest(templates_root: &Path) -> Result<RootManifest> {
    let manifest_path = templates_root.join(ROOT_MANIFEST_FILE);
    if !manifest_path.exists() {
        return Ok(RootManifest::default());
    }

    let content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest_path.display()))
}

/// Resolve a variant name (or the default) to its template directory
pub fn locate_template(base_dir: &Path, variant: Option<&str>) -> Result<LocatedTemplate> {
    let root = templates_root(base_dir);
    let manifest = load_root_manifest(&root)?;
    let requested = variant.unwrap_or_else(|| manifest.default_variant());

    let Some(found) = manifest.variant(requested) else {
        anyhow::bail!(
            "Template '{}' not found. Available templates: {}",
            requested,
            manifest.variant_names().join(", ")
        );
    };

    let path = root.join(&found.path);
    if !path.is_dir() {
        anyhow::bail!("Template directory not found: {}", path.display());
    }

    Ok(LocatedTemplate {
        variant: found.clone(),
        path,
        excludes: manifest.excludes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locates_builtin_variant() {
        let base = TempDir::new().unwrap();
        let dir = templates_root(base.path()).join(manifest::DEFAULT_TEMPLATE_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let located = locate_template(base.path(), None).unwrap();
        assert_eq!(located.path, dir);
        assert_eq!(located.variant.name, "main");
    }

    #[test]
    fn test_missing_template_directory() {
        let base = TempDir::new().unwrap();
        let err = locate_template(base.path(), None).unwrap_err();
        assert!(err.to_string().contains("Template directory not found"));
    }

    #[test]
    fn test_unknown_variant_lists_available() {
        let base = TempDir::new().unwrap();
        let err = locate_template(base.path(), Some("expo")).unwrap_err();
        assert!(err.to_string().contains("Available templates: main"));
    }

    #[test]
    fn test_variant_from_manifest() {
        let base = TempDir::new().unwrap();
        let root = templates_root(base.path());
        std::fs::create_dir_all(root.join("minimal-v2")).unwrap();
        std::fs::write(
            root.join(ROOT_MANIFEST_FILE),
            "templates:\n  - name: minimal\n    path: minimal-v2\n    version: 1.1.0\n",
        )
        .unwrap();

        let located = locate_template(base.path(), Some("minimal")).unwrap();
        assert_eq!(located.path, root.join("minimal-v2"));
        assert_eq!(located.variant.version.as_deref(), Some("1.1.0"));
    }

    #[test]
    fn test_malformed_manifest_is_error() {
        let base = TempDir::new().unwrap();
        let root = templates_root(base.path());
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(ROOT_MANIFEST_FILE), "templates: [").unwrap();

        assert!(locate_template(base.path(), None).is_err());
    }
}
