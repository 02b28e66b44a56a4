//! `init`: create a new project from a bundled template

use crate::manifest;
use crate::product::ProductConfig;
use crate::project::{self, identity, name};
use crate::runtime::{display_command, run_interactive, tool};
use crate::templates::{self, LocatedTemplate};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Name of the project to create
    pub name: String,

    /// Directory the project folder is created in (defaults to cwd)
    pub destination: Option<PathBuf>,

    /// Skip `npm install`
    pub skip_install: bool,

    /// Template variant to use
    pub template: Option<String>,
}

/// Directory the new project will be created at
fn project_path(args: &InitArgs, cwd: &Path) -> PathBuf {
    let destination = match &args.destination {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    };
    destination.join(&args.name)
}

/// Validate everything that can fail before touching the filesystem
fn prepare<C: ProductConfig>(
    config: &C,
    args: &InitArgs,
    cwd: &Path,
) -> Result<(PathBuf, LocatedTemplate)> {
    name::ensure_valid(&args.name)?;

    let target = project_path(args, cwd);
    if target.exists() {
        anyhow::bail!("Project directory already exists: {}", target.display());
    }

    let template = templates::locate_template(&config.base_dir(), args.template.as_deref())?;
    Ok((target, template))
}

/// Point `package.json` at the new project name
fn update_manifest_name(project_dir: &Path, project_name: &str) -> Result<()> {
    if !manifest::exists(project_dir) {
        return Ok(());
    }
    let mut package = manifest::read(project_dir)?;
    package.set_name(name::to_manifest_safe(project_name));
    manifest::write(project_dir, &package)?;
    Ok(())
}

/// Rename native identifiers with react-native-rename, then record the name in app.json
async fn rename_app(project_dir: &Path, project_name: &str) -> Result<()> {
    let bundle_id = name::bundle_id(project_name);
    let with_bundle = [
        "react-native-rename",
        project_name,
        "--skipGitStatusCheck",
        "--bundleID",
        bundle_id.as_str(),
    ];

    if run_interactive("npx", &with_bundle, Some(project_dir))
        .await
        .is_err()
    {
        // Older react-native-rename releases reject --bundleID
        run_interactive(
            "npx",
            &["react-native-rename", project_name, "--skipGitStatusCheck"],
            Some(project_dir),
        )
        .await?;
    }

    identity::write_app_descriptor(project_dir, project_name, project_name)?;
    Ok(())
}

/// Run the init workflow
pub async fn run<C: ProductConfig>(config: &C, args: InitArgs, cli_version: &str) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let (target, template) = prepare(config, &args, &cwd)?;

    cliclack::intro(config.display_name())?;
    cliclack::log::info(format!(
        "Creating project \"{}\" at {}",
        args.name,
        target.display()
    ))?;
    cliclack::log::info(format!("Template source: {}", template.path.display()))?;

    if let Some(required) = template.variant.version.as_deref() {
        if let Some(warning) =
            templates::check_compatibility(cli_version, required, config.upgrade_command())
        {
            cliclack::log::warning(warning)?;
        }
    }

    let spinner = cliclack::spinner();
    spinner.start("Copying template files...");
    let copied = match templates::copy_template(&template.path, &target, &template.excludes) {
        Ok(count) => count,
        Err(e) => {
            spinner.error("Failed to copy template files");
            return Err(e.context("Failed to create project"));
        }
    };
    spinner.stop(format!("Copied {} template files", copied));

    update_manifest_name(&target, &args.name)?;

    let template_name = project::get_name(&target);
    if template_name != args.name {
        cliclack::log::step(format!(
            "Renaming {} to {}...",
            template_name, args.name
        ))?;
        match rename_app(&target, &args.name).await {
            Ok(()) => cliclack::log::success(format!("App renamed to {}", args.name))?,
            Err(e) => {
                cliclack::log::warning(format!("App rename failed: {:#}", e))?;
                cliclack::log::info(format!(
                    "You can rename it later with: {}",
                    display_command("npx", &["react-native-rename", &args.name])
                ))?;
            }
        }
    }

    if !args.skip_install {
        install_dependencies(&target).await?;
    }

    print_next_steps(config, &args, &target)?;
    Ok(())
}

async fn install_dependencies(project_dir: &Path) -> Result<()> {
    if let Err(e) = tool::npm_tool().require() {
        cliclack::log::warning(format!("Dependency installation skipped: {}", e))?;
        return Ok(());
    }

    cliclack::log::step("Installing dependencies...")?;
    match run_interactive("npm", &["install", "--legacy-peer-deps"], Some(project_dir)).await {
        Ok(()) => cliclack::log::success("Dependencies installed")?,
        Err(e) => cliclack::log::warning(format!("Dependency installation failed: {:#}", e))?,
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, args: &InitArgs, target: &Path) -> Result<()> {
    cliclack::log::success(format!(
        "Project \"{}\" created successfully!\nLocation: {}",
        args.name,
        target.display()
    ))?;

    let steps = config.next_steps(target, args.skip_install);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!(
        "To manage modules, use: {} modules --help",
        config.name()
    ))?;

    Ok(())
}
