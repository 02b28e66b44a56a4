//! External process execution and tool detection
//!
//! This module provides:
//! - Captured and terminal-attached command execution
//! - PATH lookups for the platform tools commands depend on

pub mod exec;
pub mod tool;

pub use exec::{display_command, run_captured, run_captured_bytes, run_interactive};
pub use tool::ToolManager;
