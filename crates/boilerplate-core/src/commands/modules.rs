//! `modules`: link and unlink the optional feature modules shipped in the template

use crate::manifest;
use crate::output;
use crate::project;
use crate::runtime::run_interactive;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Arguments for the modules command
#[derive(Debug, Clone, Default)]
pub struct ModulesArgs {
    /// Show module status
    pub status: bool,

    /// Module to enable, or "all"
    pub enable: Option<String>,

    /// Module to disable, or "all"
    pub disable: Option<String>,

    /// Project directory (defaults to the project containing cwd)
    pub destination: Option<PathBuf>,
}

/// An optional module living under `<project>/modules/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpec {
    /// Package name the module is linked under
    pub name: &'static str,
    /// Folder below `modules/`
    pub dir: &'static str,
    /// Extra packages the module needs, with version specifiers
    pub dependencies: &'static [&'static str],
}

impl ModuleSpec {
    pub fn path(&self, project_root: &Path) -> PathBuf {
        project_root.join("modules").join(self.dir)
    }
}

pub const MODULES: &[ModuleSpec] = &[
    ModuleSpec {
        name: "md-chat-ai-screen",
        dir: "chat-ai-screen",
        dependencies: &["react-native-executorch@0.4.6"],
    },
    ModuleSpec {
        name: "md-redux-screen",
        dir: "redux-screen",
        dependencies: &[],
    },
    ModuleSpec {
        name: "md-skia-accelerometer-screen",
        dir: "skia-accelerometer-screen",
        dependencies: &[],
    },
];

pub fn find_module(name: &str) -> Option<&'static ModuleSpec> {
    MODULES.iter().find(|m| m.name == name)
}

/// Expand a `--enable`/`--disable` value into module names
pub fn selection(value: &str) -> Vec<String> {
    if value == "all" {
        MODULES.iter().map(|m| m.name.to_string()).collect()
    } else {
        vec![value.to_string()]
    }
}

/// Strip the version specifier from a dependency, keeping npm scopes
///
/// `react-native-executorch@0.4.6` -> `react-native-executorch`,
/// `@scope/pkg@1.0.0` -> `@scope/pkg`
pub fn package_name(dependency: &str) -> &str {
    match dependency.rfind('@') {
        Some(idx) if idx > 0 => &dependency[..idx],
        _ => dependency,
    }
}

/// A module is linked when the project's runtime dependencies name it
pub fn is_linked(module_name: &str, project_root: &Path) -> bool {
    manifest::try_read(project_root).is_some_and(|m| m.has_runtime_dependency(module_name))
}

const NPM_FLAGS: [&str; 2] = ["--save", "--legacy-peer-deps"];

async fn npm(verb: &str, target: &str, project_root: &Path) -> Result<()> {
    run_interactive("npm", &[verb, target, NPM_FLAGS[0], NPM_FLAGS[1]], Some(project_root)).await
}

async fn link_module(module: &ModuleSpec, project_root: &Path) -> Result<()> {
    cliclack::log::info(format!("Linking module: {}...", module.name))?;
    let path = module.path(project_root);
    npm("install", &path.to_string_lossy(), project_root)
        .await
        .with_context(|| format!("Error linking module {}", module.name))?;
    cliclack::log::success(format!("Module {} linked successfully.", module.name))?;
    Ok(())
}

async fn unlink_module(module: &ModuleSpec, project_root: &Path) -> Result<()> {
    cliclack::log::info(format!("Unlinking module: {}...", module.name))?;
    npm("uninstall", module.name, project_root)
        .await
        .with_context(|| format!("Error unlinking module {}", module.name))?;
    cliclack::log::success(format!("Module {} unlinked successfully.", module.name))?;
    Ok(())
}

/// Pod install failures only warn; the user can rerun it by hand
async fn run_ios_pod_install(project_root: &Path) -> Result<()> {
    cliclack::log::step("Running iOS pod install...")?;
    match run_interactive("npm", &["run", "ios:pod-install"], Some(project_root)).await {
        Ok(()) => cliclack::log::success("iOS pod install completed successfully.")?,
        Err(e) => {
            cliclack::log::warning(format!("Error running iOS pod install: {:#}", e))?;
            cliclack::log::remark("You may need to run it manually: npm run ios:pod-install")?;
        }
    }
    Ok(())
}

async fn install_dependencies(module: &ModuleSpec, project_root: &Path) -> Result<()> {
    if module.dependencies.is_empty() {
        return Ok(());
    }

    cliclack::log::info(format!("Installing dependencies for {}...", module.name))?;
    for dep in module.dependencies {
        cliclack::log::remark(format!("Installing {}...", dep))?;
        npm("install", dep, project_root)
            .await
            .with_context(|| format!("Error installing dependencies for {}", module.name))?;
    }
    cliclack::log::success(format!(
        "Dependencies for {} installed successfully.",
        module.name
    ))?;

    run_ios_pod_install(project_root).await
}

async fn uninstall_dependencies(module: &ModuleSpec, project_root: &Path) -> Result<()> {
    if module.dependencies.is_empty() {
        return Ok(());
    }

    let confirm: bool = cliclack::confirm(format!(
        "Do you want to uninstall dependencies for {}?",
        module.name
    ))
    .initial_value(false)
    .interact()?;

    if !confirm {
        return Ok(());
    }

    cliclack::log::info(format!("Uninstalling dependencies for {}...", module.name))?;
    for dep in module.dependencies {
        let name = package_name(dep);
        cliclack::log::remark(format!("Uninstalling {}...", name))?;
        npm("uninstall", name, project_root)
            .await
            .with_context(|| format!("Error uninstalling dependencies for {}", module.name))?;
    }
    cliclack::log::success(format!(
        "Dependencies for {} uninstalled successfully.",
        module.name
    ))?;

    run_ios_pod_install(project_root).await
}

pub async fn enable_modules(module_names: &[String], project_root: &Path) -> Result<()> {
    for module_name in module_names {
        let Some(module) = find_module(module_name) else {
            cliclack::log::error(format!("Unknown module: {}", module_name))?;
            continue;
        };

        if is_linked(module.name, project_root) {
            cliclack::log::warning(format!("Module {} is already linked.", module.name))?;
        } else {
            link_module(module, project_root).await?;
        }

        install_dependencies(module, project_root).await?;
    }

    cliclack::log::success("Modules enabled successfully!")?;
    Ok(())
}

pub async fn disable_modules(module_names: &[String], project_root: &Path) -> Result<()> {
    for module_name in module_names {
        let Some(module) = find_module(module_name) else {
            cliclack::log::error(format!("Unknown module: {}", module_name))?;
            continue;
        };

        if !is_linked(module.name, project_root) {
            cliclack::log::warning(format!("Module {} is already unlinked.", module.name))?;
        } else {
            unlink_module(module, project_root).await?;
        }

        uninstall_dependencies(module, project_root).await?;
    }

    cliclack::log::success("Modules disabled successfully!")?;
    Ok(())
}

pub fn show_status(project_root: &Path) {
    output::header("\nModule Status:");
    output::header("==============");

    for module in MODULES {
        let status = if is_linked(module.name, project_root) {
            "LINKED".green()
        } else {
            "UNLINKED".red()
        };
        println!("{}: {}", module.name.cyan(), status);

        if !module.dependencies.is_empty() {
            output::gray(&format!("  Dependencies: {}", module.dependencies.join(", ")));
        }
    }
    println!();
}

/// Multi-select over all modules, annotating those already in the target state
fn pick_modules(prompt: &str, project_root: &Path, linked_note: bool) -> Result<Vec<String>> {
    let mut multi = cliclack::multiselect(prompt);
    for module in MODULES {
        let hint = match (is_linked(module.name, project_root), linked_note) {
            (true, true) => "already linked",
            (false, false) => "already unlinked",
            _ => "",
        };
        multi = multi.item(module.name.to_string(), module.name, hint);
    }
    Ok(multi.required(false).interact()?)
}

async fn interactive(project_root: &Path) -> Result<()> {
    let identity = project::get_identity(project_root);
    cliclack::intro(format!("Module Setup Tool for \"{}\"", identity.display_name))?;
    show_status(project_root);

    let action: &str = cliclack::select("What would you like to do?")
        .item("enable", "Enable specific module(s)", "")
        .item("disable", "Disable specific module(s)", "")
        .item("enableAll", "Enable all modules", "")
        .item("disableAll", "Disable all modules", "")
        .item("status", "Show status", "")
        .item("exit", "Exit", "")
        .interact()?;

    match action {
        "enable" => {
            let selected = pick_modules("Select modules to enable:", project_root, true)?;
            if !selected.is_empty() {
                enable_modules(&selected, project_root).await?;
            }
        }
        "disable" => {
            let selected = pick_modules("Select modules to disable:", project_root, false)?;
            if !selected.is_empty() {
                disable_modules(&selected, project_root).await?;
            }
        }
        "enableAll" => enable_modules(&selection("all"), project_root).await?,
        "disableAll" => disable_modules(&selection("all"), project_root).await?,
        "status" => show_status(project_root),
        _ => {}
    }

    cliclack::outro("Done")?;
    Ok(())
}

/// Run the modules workflow
pub async fn run(args: ModulesArgs) -> Result<()> {
    let project_root = project::resolve(args.destination.as_deref())?;

    if args.status {
        show_status(&project_root);
        return Ok(());
    }

    if let Some(value) = &args.enable {
        return enable_modules(&selection(value), &project_root).await;
    }

    if let Some(value) = &args.disable {
        return disable_modules(&selection(value), &project_root).await;
    }

    interactive(&project_root).await
}
