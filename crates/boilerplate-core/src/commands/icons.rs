//! `icons`: regenerate app icons and splash logos
//!
//! Drawing is delegated to the `canvas` npm package installed in the target
//! project. The command checks the project's declared dependencies before
//! rendering anything and fails with an install hint when it is missing.

use crate::error::ProjectError;
use crate::manifest;
use crate::output;
use crate::project::{self, ProjectIdentity};
use crate::runtime::{run_captured_bytes, tool};
use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRIMARY: &str = "#1976D2";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

const CANVAS_PACKAGE: &str = "canvas";
const CANVAS_INSTALL_HINT: &str = "npm install canvas --save-dev --legacy-peer-deps";

/// Android launcher icon densities and sizes
pub const ANDROID_ICONS: &[(&str, u32)] = &[
    ("mipmap-mdpi", 48),
    ("mipmap-hdpi", 72),
    ("mipmap-xhdpi", 96),
    ("mipmap-xxhdpi", 144),
    ("mipmap-xxxhdpi", 192),
];

/// iOS AppIcon set file names and pixel sizes
pub const IOS_ICONS: &[(&str, u32)] = &[
    ("Icon-20@2x.png", 40),
    ("Icon-20@3x.png", 60),
    ("Icon-29@2x.png", 58),
    ("Icon-29@3x.png", 87),
    ("Icon-40@2x.png", 80),
    ("Icon-40@3x.png", 120),
    ("Icon-60@2x.png", 120),
    ("Icon-60@3x.png", 180),
    ("Icon-76@2x.png", 152),
    ("Icon-83.5@2x.png", 167),
    ("Icon-1024.png", 1024),
];

/// iOS splash logo file names and pixel sizes
const IOS_SPLASH: &[(&str, u32)] = &[
    ("splash-logo.png", 100),
    ("splash-logo@2x.png", 200),
    ("splash-logo@3x.png", 300),
];

/// Arguments for the icons command
#[derive(Debug, Clone)]
pub struct IconsArgs {
    pub android: bool,
    pub ios: bool,
    pub splash: bool,
    pub primary: String,
    pub background: String,
    pub destination: Option<PathBuf>,
}

impl Default for IconsArgs {
    fn default() -> Self {
        Self {
            android: false,
            ios: false,
            splash: false,
            primary: DEFAULT_PRIMARY.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            destination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconColors {
    pub primary: String,
    pub background: String,
}

impl IconColors {
    /// Colors are handed to canvas as CSS color strings. Only values that
    /// cannot be a color at all are rejected here.
    pub fn new(primary: &str, background: &str) -> Result<Self> {
        for color in [primary, background] {
            if color.trim().is_empty() || color.starts_with('-') {
                anyhow::bail!("Invalid color '{}': expected a CSS color such as #1976D2", color);
            }
        }
        Ok(Self {
            primary: primary.to_string(),
            background: background.to_string(),
        })
    }
}

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artwork {
    /// Square icon: background fill, primary circle, "App" label
    Icon,
    /// Transparent splash logo: primary circle, "Logo" label
    SplashLogo,
}

impl Artwork {
    fn as_arg(self) -> &'static str {
        match self {
            Artwork::Icon => "icon",
            Artwork::SplashLogo => "splash",
        }
    }
}

/// Renders square PNG artwork
#[allow(async_fn_in_trait)]
pub trait IconRenderer {
    async fn render(&self, artwork: Artwork, size: u32, colors: &IconColors) -> Result<Vec<u8>>;
}

const CANVAS_SCRIPT: &str = r#"
const path = require('path');
const { createRequire } = require('module');
const projectRequire = createRequire(path.join(process.cwd(), 'package.json'));
const { createCanvas } = projectRequire('canvas');
const [kind, sizeArg, primary, background] = process.argv.slice(1);
const size = Number(sizeArg);
const icon = kind === 'icon';
const canvas = createCanvas(size, size);
const ctx = canvas.getContext('2d');
const center = size / 2;
if (icon) {
  ctx.fillStyle = background;
  ctx.fillRect(0, 0, size, size);
}
ctx.beginPath();
ctx.arc(center, center, size * (icon ? 0.3 : 0.4), 0, 2 * Math.PI);
ctx.fillStyle = primary;
ctx.fill();
ctx.fillStyle = '#FFFFFF';
ctx.font = `${size * (icon ? 0.15 : 0.2)}px Arial`;
ctx.textAlign = 'center';
ctx.textBaseline = 'middle';
ctx.fillText(icon ? 'App' : 'Logo', center, center);
process.stdout.write(canvas.toBuffer('image/png'));
"#;

/// Renders with the project's own `canvas` package through Node.js
pub struct CanvasRenderer {
    project_root: PathBuf,
}

impl CanvasRenderer {
    /// Probe the project before any rendering is attempted
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let declares_canvas =
            manifest::try_read(project_root).is_some_and(|m| m.has_dependency(CANVAS_PACKAGE));
        if !declares_canvas {
            return Err(ProjectError::OptionalDependencyMissing {
                package: CANVAS_PACKAGE,
                install_hint: CANVAS_INSTALL_HINT,
            }
            .into());
        }
        tool::node_tool().require()?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
        })
    }
}

impl IconRenderer for CanvasRenderer {
    async fn render(&self, artwork: Artwork, size: u32, colors: &IconColors) -> Result<Vec<u8>> {
        let size = size.to_string();
        run_captured_bytes(
            "node",
            &[
                "-e",
                CANVAS_SCRIPT,
                artwork.as_arg(),
                size.as_str(),
                colors.primary.as_str(),
                colors.background.as_str(),
            ],
            Some(&self.project_root),
        )
        .await
        .with_context(|| {
            format!(
                "Canvas rendering failed. Make sure it is installed: {}",
                CANVAS_INSTALL_HINT
            )
        })
    }
}

fn write_png(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn android_res_dir(project_root: &Path) -> PathBuf {
    project_root
        .join("android")
        .join("app")
        .join("src")
        .join("main")
        .join("res")
}

fn xcassets_dir(project_root: &Path, identity: &ProjectIdentity) -> PathBuf {
    identity.ios_target_dir(project_root).join("Images.xcassets")
}

pub async fn generate_android_icons<R: IconRenderer>(
    renderer: &R,
    project_root: &Path,
    colors: &IconColors,
) -> Result<Vec<PathBuf>> {
    let res = android_res_dir(project_root);
    let mut written = Vec::new();

    for (folder, size) in ANDROID_ICONS {
        let png = renderer.render(Artwork::Icon, *size, colors).await?;
        for file in ["ic_launcher.png", "ic_launcher_round.png"] {
            let path = res.join(folder).join(file);
            write_png(&path, &png)?;
            written.push(path);
        }
    }

    Ok(written)
}

pub async fn generate_ios_icons<R: IconRenderer>(
    renderer: &R,
    project_root: &Path,
    identity: &ProjectIdentity,
    colors: &IconColors,
) -> Result<Vec<PathBuf>> {
    let icon_set = xcassets_dir(project_root, identity).join("AppIcon.appiconset");
    let mut written = Vec::new();

    for (file, size) in IOS_ICONS {
        let png = renderer.render(Artwork::Icon, *size, colors).await?;
        let path = icon_set.join(file);
        write_png(&path, &png)?;
        written.push(path);
    }

    Ok(written)
}

pub async fn generate_splash_screens<R: IconRenderer>(
    renderer: &R,
    project_root: &Path,
    identity: &ProjectIdentity,
    colors: &IconColors,
) -> Result<Vec<PathBuf>> {
    let res = android_res_dir(project_root);
    let mut written = Vec::new();

    for (folder, size) in ANDROID_ICONS {
        let drawable = folder.replace("mipmap", "drawable");
        let png = renderer.render(Artwork::SplashLogo, *size, colors).await?;
        let path = res.join(drawable).join("splashscreen_logo.png");
        write_png(&path, &png)?;
        written.push(path);
    }

    let image_set = xcassets_dir(project_root, identity).join("SplashScreenLogo.imageset");
    for (file, size) in IOS_SPLASH {
        let png = renderer.render(Artwork::SplashLogo, *size, colors).await?;
        let path = image_set.join(file);
        write_png(&path, &png)?;
        written.push(path);
    }

    Ok(written)
}

/// Which asset groups to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconTarget {
    Android,
    Ios,
    Splash,
}

impl IconTarget {
    fn messages(self) -> (&'static str, &'static str, &'static str) {
        match self {
            IconTarget::Android => (
                "Generating Android icons...",
                "Android icons generated successfully",
                "Failed to generate Android icons",
            ),
            IconTarget::Ios => (
                "Generating iOS icons...",
                "iOS icons generated successfully",
                "Failed to generate iOS icons",
            ),
            IconTarget::Splash => (
                "Generating splash screens...",
                "Splash screens generated successfully",
                "Failed to generate splash screens",
            ),
        }
    }
}

/// Targets selected by the flags: `--splash`, then `--android`, then `--ios`, else all
pub fn targets(args: &IconsArgs) -> Vec<IconTarget> {
    if args.splash {
        vec![IconTarget::Splash]
    } else if args.android {
        vec![IconTarget::Android]
    } else if args.ios {
        vec![IconTarget::Ios]
    } else {
        vec![IconTarget::Android, IconTarget::Ios, IconTarget::Splash]
    }
}

/// Run a generation step behind a spinner
async fn step<T>(target: IconTarget, work: impl Future<Output = Result<T>>) -> Result<T> {
    let (start, done, failed) = target.messages();
    let spinner = cliclack::spinner();
    spinner.start(start);
    match work.await {
        Ok(value) => {
            spinner.stop(done);
            Ok(value)
        }
        Err(e) => {
            spinner.error(format!("{}: {:#}", failed, e));
            Err(e)
        }
    }
}

/// Run the icons workflow
pub async fn run(args: IconsArgs) -> Result<()> {
    let project_root = project::resolve(args.destination.as_deref())?;
    let identity = project::get_identity(&project_root);
    let colors = IconColors::new(&args.primary, &args.background)?;

    cliclack::intro(format!("Icon Generator for \"{}\"", identity.display_name))?;
    output::gray(&format!("Primary color: {}", colors.primary));
    output::gray(&format!("Background color: {}", colors.background));

    let renderer = CanvasRenderer::for_project(&project_root)?;

    for target in targets(&args) {
        match target {
            IconTarget::Android => {
                step(target, generate_android_icons(&renderer, &project_root, &colors)).await?;
            }
            IconTarget::Ios => {
                step(
                    target,
                    generate_ios_icons(&renderer, &project_root, &identity, &colors),
                )
                .await?;
            }
            IconTarget::Splash => {
                step(
                    target,
                    generate_splash_screens(&renderer, &project_root, &identity, &colors),
                )
                .await?;
            }
        }
    }

    cliclack::outro("Icon generation completed successfully!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(Artwork, u32)>>,
    }

    impl IconRenderer for RecordingRenderer {
        async fn render(
            &self,
            artwork: Artwork,
            size: u32,
            _colors: &IconColors,
        ) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push((artwork, size));
            Ok(size.to_le_bytes().to_vec())
        }
    }

    fn colors() -> IconColors {
        IconColors::new(DEFAULT_PRIMARY, DEFAULT_BACKGROUND).unwrap()
    }

    fn identity(scheme: &str) -> ProjectIdentity {
        ProjectIdentity {
            name: scheme.to_string(),
            display_name: scheme.to_string(),
            ios_scheme: scheme.to_string(),
        }
    }

    #[test]
    fn test_accepts_css_colors() {
        assert!(IconColors::new("#fff", "#000000").is_ok());
        assert!(IconColors::new("red", "white").is_ok());
        assert!(IconColors::new("rgb(25, 118, 210)", "rgba(0, 0, 0, 0.5)").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_flag_like_colors() {
        assert!(IconColors::new("", "#FFFFFF").is_err());
        assert!(IconColors::new("#1976D2", "   ").is_err());
        assert!(IconColors::new("--android", "#FFFFFF").is_err());
    }

    #[test]
    fn test_target_selection() {
        let args = |android, ios, splash| IconsArgs {
            android,
            ios,
            splash,
            ..IconsArgs::default()
        };

        assert_eq!(
            targets(&args(false, false, false)),
            vec![IconTarget::Android, IconTarget::Ios, IconTarget::Splash]
        );
        assert_eq!(targets(&args(true, true, true)), vec![IconTarget::Splash]);
        assert_eq!(targets(&args(true, true, false)), vec![IconTarget::Android]);
        assert_eq!(targets(&args(false, true, false)), vec![IconTarget::Ios]);
    }

    #[tokio::test]
    async fn test_android_icons_written_per_density() {
        let tmp = TempDir::new().unwrap();
        let renderer = RecordingRenderer::default();

        let written = generate_android_icons(&renderer, tmp.path(), &colors())
            .await
            .unwrap();

        assert_eq!(written.len(), ANDROID_ICONS.len() * 2);
        let xxxhdpi = tmp
            .path()
            .join("android/app/src/main/res/mipmap-xxxhdpi/ic_launcher_round.png");
        assert_eq!(std::fs::read(xxxhdpi).unwrap(), 192u32.to_le_bytes());
        assert!(renderer.calls.borrow().iter().all(|(a, _)| *a == Artwork::Icon));
    }

    #[tokio::test]
    async fn test_ios_icons_use_scheme_folder() {
        let tmp = TempDir::new().unwrap();
        let renderer = RecordingRenderer::default();

        let written = generate_ios_icons(&renderer, tmp.path(), &identity("MyApp"), &colors())
            .await
            .unwrap();

        assert_eq!(written.len(), IOS_ICONS.len());
        let marketing = tmp
            .path()
            .join("ios/MyApp/Images.xcassets/AppIcon.appiconset/Icon-1024.png");
        assert_eq!(std::fs::read(marketing).unwrap(), 1024u32.to_le_bytes());
    }

    #[tokio::test]
    async fn test_splash_screens() {
        let tmp = TempDir::new().unwrap();
        let renderer = RecordingRenderer::default();

        let written =
            generate_splash_screens(&renderer, tmp.path(), &identity("MyApp"), &colors())
                .await
                .unwrap();

        assert_eq!(written.len(), ANDROID_ICONS.len() + IOS_SPLASH.len());
        assert!(tmp
            .path()
            .join("android/app/src/main/res/drawable-hdpi/splashscreen_logo.png")
            .is_file());
        assert!(tmp
            .path()
            .join("ios/MyApp/Images.xcassets/SplashScreenLogo.imageset/splash-logo@3x.png")
            .is_file());
        assert!(renderer
            .calls
            .borrow()
            .iter()
            .all(|(a, _)| *a == Artwork::SplashLogo));
    }

    #[test]
    fn test_canvas_probe_requires_dependency() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{"dependencies": {"react-native": "0.76.0"}}"#,
        )
        .unwrap();

        let err = CanvasRenderer::for_project(tmp.path()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ProjectError>(),
            Some(ProjectError::OptionalDependencyMissing { package: "canvas", .. })
        ));
        assert!(err.to_string().contains(CANVAS_INSTALL_HINT));
    }
}
