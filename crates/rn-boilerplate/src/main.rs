//! rn-boilerplate CLI - Create React Native projects and manage their modules

use anyhow::Result;
use boilerplate_core::commands::{
    devices, icons, init, modules, refresh, DevicesArgs, IconsArgs, InitArgs, ModulesArgs,
    RefreshArgs,
};
use boilerplate_core::ProductConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// rn-boilerplate product configuration
#[derive(Clone)]
pub struct BoilerplateConfig;

impl ProductConfig for BoilerplateConfig {
    fn name(&self) -> &'static str {
        "rn-boilerplate"
    }

    fn display_name(&self) -> &'static str {
        "React Native Boilerplate Ultimate"
    }

    fn base_dir_env(&self) -> &'static str {
        "RN_BOILERPLATE_HOME"
    }

    fn base_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(self.base_dir_env()) {
            return PathBuf::from(dir);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        // Installed layout is <base>/bin/<exe>; a cargo build sits in <repo>/target/<profile>/
        exe_dir
            .ancestors()
            .take(3)
            .find(|dir| dir.join("templates").is_dir())
            .map(Path::to_path_buf)
            .unwrap_or(exe_dir)
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install rn-boilerplate --force"
    }

    fn next_steps(&self, project_dir: &Path, skip_install: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(project_dir) {
            steps.push(format!("cd {}", project_dir.display()));
        }
        if skip_install {
            steps.push("npm install".to_string());
        }
        steps.push("npm run ios      # Run on iOS".to_string());
        steps.push("npm run android  # Run on Android".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "rn-boilerplate")]
#[command(about = "CLI tool for React Native Boilerplate - Create projects and manage modules")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new React Native project from the template
    Init(CliInitArgs),
    /// Manage project modules (enable/disable/status)
    Modules(CliModulesArgs),
    /// Generate app icons and splash screens
    Icons(CliIconsArgs),
    /// Refresh React Native project (watchman, modules, cache)
    Refresh(CliRefreshArgs),
    /// List connected Android and iOS devices
    Devices(CliDevicesArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Name of the project to create
    pub project_name: String,

    /// Destination directory (default: current directory)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Skip npm install
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Template variant to use (default: main)
    #[arg(short, long)]
    pub template: Option<String>,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            name: args.project_name,
            destination: args.destination,
            skip_install: args.skip_install,
            template: args.template,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliModulesArgs {
    /// Show module status
    #[arg(short, long)]
    pub status: bool,

    /// Enable a specific module or "all"
    #[arg(short, long, value_name = "MODULE")]
    pub enable: Option<String>,

    /// Disable a specific module or "all"
    #[arg(short, long, value_name = "MODULE")]
    pub disable: Option<String>,

    /// Project directory path
    #[arg(long)]
    pub destination: Option<PathBuf>,
}

impl From<CliModulesArgs> for ModulesArgs {
    fn from(args: CliModulesArgs) -> Self {
        ModulesArgs {
            status: args.status,
            enable: args.enable,
            disable: args.disable,
            destination: args.destination,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliIconsArgs {
    /// Generate Android icons only
    #[arg(long)]
    pub android: bool,

    /// Generate iOS icons only
    #[arg(long)]
    pub ios: bool,

    /// Generate splash screens only
    #[arg(long)]
    pub splash: bool,

    /// Primary color
    #[arg(long, default_value = icons::DEFAULT_PRIMARY)]
    pub primary: String,

    /// Background color
    #[arg(long, default_value = icons::DEFAULT_BACKGROUND)]
    pub background: String,

    /// Project directory path
    #[arg(long)]
    pub destination: Option<PathBuf>,
}

impl From<CliIconsArgs> for IconsArgs {
    fn from(args: CliIconsArgs) -> Self {
        IconsArgs {
            android: args.android,
            ios: args.ios,
            splash: args.splash,
            primary: args.primary,
            background: args.background,
            destination: args.destination,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliRefreshArgs {
    /// Clear watchman watches only
    #[arg(short, long)]
    pub watchman: bool,

    /// Clean and reinstall node modules only
    #[arg(short, long)]
    pub modules: bool,

    /// Start with cache reset only
    #[arg(short, long)]
    pub start: bool,

    /// Project directory path
    #[arg(long)]
    pub destination: Option<PathBuf>,
}

impl From<CliRefreshArgs> for RefreshArgs {
    fn from(args: CliRefreshArgs) -> Self {
        RefreshArgs {
            watchman: args.watchman,
            modules: args.modules,
            start: args.start,
            destination: args.destination,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliDevicesArgs {
    /// Show detailed device information
    #[arg(short, long)]
    pub details: bool,

    /// Show Android devices only
    #[arg(short, long)]
    pub android: bool,

    /// Show iOS devices only
    #[arg(short, long)]
    pub ios: bool,
}

impl From<CliDevicesArgs> for DevicesArgs {
    fn from(args: CliDevicesArgs) -> Self {
        DevicesArgs {
            details: args.details,
            android: args.android,
            ios: args.ios,
        }
    }
}

async fn dispatch(command: Command, config: &BoilerplateConfig) -> Result<()> {
    match command {
        Command::Init(args) => init::run(config, args.into(), CLI_VERSION).await,
        Command::Modules(args) => modules::run(args.into()).await,
        Command::Icons(args) => icons::run(args.into()).await,
        Command::Refresh(args) => refresh::run(args.into()).await,
        Command::Devices(args) => devices::run(args.into()).await,
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = BoilerplateConfig;

    let result = dispatch(args.command, &config).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
