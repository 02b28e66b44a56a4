//! External command execution
//!
//! Commands run one at a time and are awaited to completion. There is no
//! timeout: a hung command hangs the invocation until interrupted.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Render a command line for messages
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.contains(' ') {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn command(program: &str, args: &[&str], cwd: Option<&Path>) -> TokioCommand {
    let mut cmd = TokioCommand::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd
}

/// Run a command and return its raw stdout
pub async fn run_captured_bytes(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<Vec<u8>> {
    let line = display_command(program, args);
    let output = command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .await
        .with_context(|| format!("Command failed: {}", line))?;

    if !output.status.success() {
        anyhow::bail!(
            "Command failed: {}\nexit code {}: {}",
            line,
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(output.stdout)
}

/// Run a command and return its stdout as text
pub async fn run_captured(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let stdout = run_captured_bytes(program, args, cwd).await?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Run a command attached to the terminal
pub async fn run_interactive(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let line = display_command(program, args);
    let status = command(program, args, cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Command failed: {}", line))?;

    if !status.success() {
        anyhow::bail!(
            "Command failed: {}\nexit code {}",
            line,
            status.code().unwrap_or(-1)
        );
    }

    Ok(())
}
