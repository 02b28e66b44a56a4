//! Command workflows behind the CLI subcommands
//!
//! Each workflow resolves the project it operates on through
//! [`crate::project::resolve`] and reports progress with cliclack. Errors are
//! returned to the binary, which prints them and exits with status 1.

pub mod devices;
pub mod icons;
pub mod init;
pub mod modules;
pub mod refresh;

pub use devices::DevicesArgs;
pub use icons::IconsArgs;
pub use init::InitArgs;
pub use modules::ModulesArgs;
pub use refresh::RefreshArgs;
