//! Typed failures raised while locating and inspecting a project

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("No package.json found at: {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("Not a React Native project: {}", .0.display())]
    NotFrameworkProject(PathBuf),

    #[error("Not in a React Native project directory. Use --destination to specify project path.")]
    NotInProject,

    #[error("Failed to read {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Invalid project name: {0}\n\
         Project name should start with a letter and contain only letters, numbers, underscores, and hyphens."
    )]
    InvalidNameGrammar(String),

    #[error("{package} package not found in project dependencies. Please install it first: {install_hint}")]
    OptionalDependencyMissing {
        package: &'static str,
        install_hint: &'static str,
    },
}

impl ProjectError {
    /// Wrap a JSON parse failure as an unreadable-file error
    pub(crate) fn unreadable(path: PathBuf, err: serde_json::Error) -> Self {
        ProjectError::ManifestUnreadable {
            path,
            source: err.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;
