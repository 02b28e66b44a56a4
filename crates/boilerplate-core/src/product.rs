//! Product configuration trait for the CLI binary
//!
//! The binary implements this trait to tell the core where its bundled
//! templates live and how to present itself. Nothing in the core derives
//! these values from the running executable on its own.

use std::path::{Path, PathBuf};

/// Configuration trait for the CLI product
///
/// Defines:
/// - Product identity (name, display name)
/// - Base installation directory holding `templates/`
/// - Upgrade and post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable overriding the base installation directory
    fn base_dir_env(&self) -> &'static str;

    /// Directory the CLI was installed into; templates live below it
    fn base_dir(&self) -> PathBuf;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_dir: &Path, skip_install: bool) -> Vec<String>;
}
