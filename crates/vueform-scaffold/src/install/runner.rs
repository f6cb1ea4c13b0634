//! Subprocess execution with inherited terminal I/O
//!
//! Children inherit the controlling terminal so interactive sub-tools can
//! prompt the user directly; their exit code is the only success signal
//! available. Every command is attempted exactly once.

use std::path::Path;

use tokio::process::Command;

use crate::error::SetupError;
use crate::resolve::CommandLine;

/// Run one command to completion in `dir`. Non-zero exit is fatal.
pub async fn run(command: &CommandLine, dir: &Path) -> Result<(), SetupError> {
    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(dir)
        .status()
        .await
        .map_err(|source| SetupError::CommandLaunch {
            command: command.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(SetupError::CommandFailed {
            command: command.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Spawn independent commands together and wait for every one of them before
/// returning. Used for installs that touch disjoint concerns.
pub async fn run_concurrently(commands: &[CommandLine], dir: &Path) -> Result<(), SetupError> {
    let mut children = Vec::with_capacity(commands.len());
    for command in commands {
        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(dir)
            .spawn()
            .map_err(|source| SetupError::CommandLaunch {
                command: command.to_string(),
                source,
            })?;
        children.push((command, child));
    }

    for (command, mut child) in children {
        let status = child
            .wait()
            .await
            .map_err(|source| SetupError::CommandLaunch {
                command: command.to_string(),
                source,
            })?;
        if !status.success() {
            return Err(SetupError::CommandFailed {
                command: command.to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
    }

    Ok(())
}
