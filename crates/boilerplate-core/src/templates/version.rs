//! Version comparison for CLI and template compatibility

use semver::Version;

/// Parse a version, accepting a leading `v`
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    Version::parse(cleaned).ok()
}

/// Compare CLI version against the version a template expects.
/// Returns a warning message if the CLI is older than the template.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    // Unparseable versions can't be compared, skip the warning
    let cli_ver = parse_version(cli_version)?;
    let template_ver = parse_version(template_version)?;

    (cli_ver < template_ver).then(|| {
        format!(
            "This template was designed for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            template_version, cli_version, upgrade_command
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install rn-boilerplate --force";

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("1.0.0", "1.2.0", UPGRADE);
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("1.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("1.0.0", "1.0.0", UPGRADE).is_none());
        assert!(check_compatibility("1.1.0", "v1.0.0", UPGRADE).is_none());
    }

    #[test]
    fn test_leading_v_is_accepted() {
        assert!(check_compatibility("v1.0.0", "v2.0.0", UPGRADE).is_some());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(check_compatibility("invalid", "1.0.0", UPGRADE).is_none());
        assert!(check_compatibility("1.0.0", "latest", UPGRADE).is_none());
    }
}
