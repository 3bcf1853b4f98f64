//! Thin wrapper around external processes (`git`, `gpg`).
use log::*;
use std::{path::Path, process::Command};

use crate::error::{AutoreleaseError, Result};

/// Captured output of a successful process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args`, optionally inside `cwd`, failing on a non-zero
/// exit status.
pub fn run(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput> {
    let command_line = format!("{program} {}", args.join(" "));

    debug!("running: {command_line}");

    let mut command = Command::new(program);
    command.args(args);

    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(AutoreleaseError::CommandFailed {
            command: command_line,
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
