//! Resolution of the project directory a command operates on

use crate::error::{ProjectError, Result};
use crate::manifest;
use crate::project::root::{find_root, find_root_from_cwd, normalize};
use std::path::{Path, PathBuf};

/// Resolve the project directory for a command.
///
/// With an explicit path the directory itself must hold a React Native
/// `package.json`. Without one, the closest project above the current
/// working directory is used.
pub fn resolve(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => resolve_explicit(path),
        None => find_root_from_cwd().ok_or(ProjectError::NotInProject),
    }
}

/// Same as [`resolve`], searching upward from `cwd` when no explicit path is given
pub fn resolve_from(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) => resolve_explicit(&cwd.join(path)),
        None => find_root(cwd).ok_or(ProjectError::NotInProject),
    }
}

fn resolve_explicit(path: &Path) -> Result<PathBuf> {
    let project_path = normalize(path);

    if !manifest::exists(&project_path) {
        return Err(ProjectError::ManifestMissing(project_path));
    }

    if !manifest::read(&project_path)?.is_react_native() {
        return Err(ProjectError::NotFrameworkProject(project_path));
    }

    Ok(project_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_dir(tmp: &TempDir, manifest: Option<&str>) -> PathBuf {
        let dir = tmp.path().join("test-rn-project");
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(content) = manifest {
            std::fs::write(dir.join("package.json"), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_resolves_explicit_destination() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(
            &tmp,
            Some(r#"{"name": "test-project", "dependencies": {"react-native": "^0.70.0"}}"#),
        );

        assert_eq!(resolve(Some(&dir)).unwrap(), dir);
    }

    #[test]
    fn test_resolves_relative_destination_against_cwd() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(&tmp, Some(r#"{"devDependencies": {"react-native": "0.76.0"}}"#));

        let resolved = resolve_from(Some(Path::new("test-rn-project")), tmp.path()).unwrap();
        assert_eq!(resolved, dir);
    }

    #[test]
    fn test_parent_relative_destination_is_normalized() {
        let tmp = TempDir::new().unwrap();
        let proj = tmp.path().join("proj");
        std::fs::create_dir_all(&proj).unwrap();
        std::fs::write(
            proj.join("package.json"),
            r#"{"dependencies": {"react-native": "0.76.0"}}"#,
        )
        .unwrap();
        let cwd = tmp.path().join("sub");

        let resolved = resolve_from(Some(Path::new("../proj")), &cwd).unwrap();
        assert_eq!(resolved, proj);

        let err = resolve_from(Some(Path::new("./../missing")), &cwd).unwrap_err();
        let missing = tmp.path().join("missing");
        assert!(matches!(err, ProjectError::ManifestMissing(ref p) if *p == missing));
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(&tmp, None);

        let err = resolve(Some(&dir)).unwrap_err();
        assert!(matches!(err, ProjectError::ManifestMissing(ref p) if *p == dir));
        assert!(err.to_string().starts_with("No package.json found at:"));
    }

    #[test]
    fn test_not_react_native() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(&tmp, Some(r#"{"dependencies": {"express": "^4.18.0"}}"#));

        let err = resolve(Some(&dir)).unwrap_err();
        assert!(matches!(err, ProjectError::NotFrameworkProject(_)));
        assert!(err.to_string().starts_with("Not a React Native project:"));
    }

    #[test]
    fn test_unreadable_manifest_is_distinct_failure() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(&tmp, Some("{ broken"));

        let err = resolve(Some(&dir)).unwrap_err();
        assert!(matches!(err, ProjectError::ManifestUnreadable { .. }));
    }

    #[test]
    fn test_not_in_project_without_destination() {
        let tmp = TempDir::new().unwrap();
        let cwd = tmp.path().join("somewhere");
        std::fs::create_dir_all(&cwd).unwrap();

        let err = resolve_from(None, &cwd).unwrap_err();
        assert!(matches!(err, ProjectError::NotInProject));
        assert!(err.to_string().contains("--destination"));
    }

    #[test]
    fn test_finds_root_without_destination() {
        let tmp = TempDir::new().unwrap();
        let dir = project_dir(&tmp, Some(r#"{"dependencies": {"react-native": "0.76.0"}}"#));
        let nested = dir.join("src").join("components");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(resolve_from(None, &nested).unwrap(), dir);
    }
}
