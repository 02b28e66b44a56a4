//! Template directory copying with exclusion filtering

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Check a file or directory name against exclusion patterns
///
/// Patterns are exact names, `*suffix` or `prefix*`.
fn matches_any(filename: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(suffix) = pattern.strip_prefix('*') {
            filename.ends_with(suffix)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            filename.starts_with(prefix)
        } else {
            filename == pattern
        }
    })
}

fn is_excluded(entry: &DirEntry, excludes: &[String]) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| matches_any(name, excludes))
}

/// Recursively copy `source` into `target`, skipping excluded entries.
///
/// Returns the number of files copied.
pub fn copy_template(source: &Path, target: &Path, excludes: &[String]) -> Result<usize> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;

    let mut copied = 0;

    let walker = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, excludes));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to read {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Template entry outside template directory")?;
        let target_path = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target_path).with_context(|| {
                format!("Failed to create directory: {}", target_path.display())
            })?;
        } else {
            if let Some(parent) = target_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::copy(entry.path(), &target_path)
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
