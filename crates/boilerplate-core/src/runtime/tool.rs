//! Presence checks for external CLI tools
//!
//! Commands that shell out to platform tooling (adb, xcrun, watchman, npm)
//! probe for the tool first so they can print an install hint instead of a
//! raw spawn error.

use anyhow::Result;
use std::path::PathBuf;

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "adb")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// What to install when the tool is missing
    pub install_hint: &'static str,
}

/// Checks whether a CLI tool is available
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Location of the tool on PATH, if installed
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(self.config.name).ok()
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        self.locate().is_some()
    }

    /// Fail with the install hint when the tool is missing
    pub fn require(&self) -> Result<()> {
        if !self.is_installed() {
            anyhow::bail!(
                "{} is not installed or not in PATH\n{}",
                self.config.display_name,
                self.config.install_hint
            );
        }
        Ok(())
    }
}

pub fn adb_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "adb",
        display_name: "ADB",
        install_hint: "Please install Android SDK platform tools",
    })
}

pub fn xcrun_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "xcrun",
        display_name: "xcrun",
        install_hint: "Please install Xcode Command Line Tools",
    })
}

pub fn ideviceinfo_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "ideviceinfo",
        display_name: "libimobiledevice",
        install_hint: "brew install libimobiledevice",
    })
}

pub fn watchman_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "watchman",
        display_name: "Watchman",
        install_hint: "Please install watchman: https://facebook.github.io/watchman/docs/install",
    })
}

pub fn npm_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "npm",
        display_name: "npm",
        install_hint: "Please install Node.js from https://nodejs.org",
    })
}

pub fn node_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "node",
        display_name: "Node.js",
        install_hint: "Please install Node.js from https://nodejs.org",
    })
}
