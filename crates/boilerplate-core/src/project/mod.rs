//! Project discovery and identity
//!
//! Everything here is synchronous and reads fresh from disk on every call:
//! - Root finding (walk upward to the closest React Native project)
//! - Path resolution (explicit `--destination` or current directory)
//! - Identity (app name, display name, iOS scheme folder)
//! - Project name validation and `package.json`-safe names

pub mod identity;
pub mod name;
pub mod resolve;
pub mod root;

pub use identity::{get_identity, get_name, AppDescriptor, ProjectIdentity, DEFAULT_APP_NAME};
pub use name::{to_manifest_safe, validate};
pub use resolve::{resolve, resolve_from};
pub use root::{find_root, find_root_from_cwd};
