//! Project name validation and derived identifiers

use crate::error::{ProjectError, Result};
use regex::Regex;
use std::sync::LazyLock;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid project name regex"));

/// Check a project name: starts with a letter, then letters, digits, `_` or `-`
pub fn validate(name: &str) -> bool {
    PROJECT_NAME.is_match(name)
}

pub fn ensure_valid(name: &str) -> Result<()> {
    if validate(name) {
        Ok(())
    } else {
        Err(ProjectError::InvalidNameGrammar(name.to_string()))
    }
}

/// Derive the `package.json` name: lowercase, every other character becomes `-`.
///
/// One output character per input character; runs are not collapsed.
pub fn to_manifest_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.is_ascii_lowercase() || l.is_ascii_digit() => l,
                _ => '-',
            }
        })
        .collect()
}

/// Bundle identifier passed to the rename tool
pub fn bundle_id(name: &str) -> String {
    format!("com.{}", name.to_lowercase())
}
