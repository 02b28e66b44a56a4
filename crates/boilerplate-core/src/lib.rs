//! Boilerplate Core - Shared library for the React Native boilerplate CLI
//!
//! This library locates React Native projects on disk, derives their identity,
//! and implements the workflows behind the CLI subcommands (project creation,
//! module management, icon generation, cache refresh and device listing).
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Project model** - `package.json` access, upward root finding,
//!   `--destination` resolution, identity detection, name rules
//! - **Layer 2: Collaborators** - template lookup/copying, external command execution
//! - **Layer 3: Command workflows** - cliclack-based commands (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based command workflows
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use boilerplate_core::project;
//!
//! let root = project::resolve(None)?;
//! let identity = project::get_identity(&root);
//! println!("{} ({})", identity.display_name, identity.ios_scheme);
//! ```

pub mod error;
pub mod manifest;
pub mod output;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod commands;

// Re-export main types for convenience
pub use error::ProjectError;
pub use manifest::Manifest;
pub use product::ProductConfig;
pub use project::{get_identity, get_name, resolve, ProjectIdentity};
pub use templates::{copy_template, locate_template, RootManifest, TemplateVariant};

