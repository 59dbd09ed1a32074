//! External command execution
//!
//! Packaging tools are reached through shell pipelines. The runner trait lets
//! measurement logic be exercised without those tools installed.

use std::process::Command;
use tracing::debug;

use crate::error::{Result, SizeError};

/// Runs a shell command line and returns its trimmed standard output
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<String>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str) -> Result<String>,
{
    fn run(&self, command: &str) -> Result<String> {
        self(command)
    }
}

/// Runs commands through `sh -c`
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<String> {
        debug!(command, "running");
        let output = Command::new("sh").arg("-c").arg(command).output()?;

        if !output.status.success() {
            return Err(SizeError::ExternalCommand {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
