//! `refresh`: clear watchman, reinstall node modules, restart Metro with a clean cache

use crate::project;
use crate::runtime::{run_interactive, tool};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Arguments for the refresh command
#[derive(Debug, Clone, Default)]
pub struct RefreshArgs {
    /// Clear watchman watches only
    pub watchman: bool,

    /// Clean and reinstall node modules only
    pub modules: bool,

    /// Start with cache reset only
    pub start: bool,

    /// Project directory (defaults to the project containing cwd)
    pub destination: Option<PathBuf>,
}

/// Steps a refresh runs, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    Watchman,
    Modules,
    Start,
}

impl RefreshArgs {
    /// The first flag given selects a single step; no flag runs all of them
    pub fn steps(&self) -> Vec<RefreshStep> {
        if self.watchman {
            vec![RefreshStep::Watchman]
        } else if self.modules {
            vec![RefreshStep::Modules]
        } else if self.start {
            vec![RefreshStep::Start]
        } else {
            vec![RefreshStep::Watchman, RefreshStep::Modules, RefreshStep::Start]
        }
    }
}

async fn refresh_watchman() -> Result<()> {
    tool::watchman_tool().require()?;
    cliclack::log::step("Clearing watchman watches...")?;
    run_interactive("watchman", &["watch-del-all"], None)
        .await
        .context("Failed to clear watchman watches")?;
    cliclack::log::success("Watchman watches cleared")?;
    Ok(())
}

async fn refresh_modules(project_root: &Path) -> Result<()> {
    cliclack::log::step("Cleaning and reinstalling node modules...")?;

    let node_modules = project_root.join("node_modules");
    if node_modules.exists() {
        tokio::fs::remove_dir_all(&node_modules)
            .await
            .with_context(|| format!("Failed to remove {}", node_modules.display()))?;
    }

    run_interactive("npm", &["install"], Some(project_root))
        .await
        .context("Failed to refresh node modules")?;
    cliclack::log::success("Node modules refreshed")?;
    Ok(())
}

async fn refresh_start(project_root: &Path) -> Result<()> {
    cliclack::log::info("Starting React Native with cache reset...")?;
    run_interactive(
        "npm",
        &["run", "start", "--", "--reset-cache"],
        Some(project_root),
    )
    .await
    .context("Failed to start with cache reset")
}

/// Run the refresh workflow
pub async fn run(args: RefreshArgs) -> Result<()> {
    let project_root = project::resolve(args.destination.as_deref())?;
    let steps = args.steps();

    if steps.len() > 1 {
        cliclack::intro("Full refresh - this may take a while...")?;
    }

    for step in &steps {
        match step {
            RefreshStep::Watchman => refresh_watchman().await?,
            RefreshStep::Modules => refresh_modules(&project_root).await?,
            RefreshStep::Start => refresh_start(&project_root).await?,
        }
    }

    if steps != [RefreshStep::Start] {
        cliclack::outro("Refresh completed successfully!")?;
    }

    Ok(())
}
