//! Command execution utilities

use crate::error::{Result, TownstatsError};
use std::process::Command;

/// Something that can run an external program and hand back its output.
///
/// The collectors only ever see this trait, so tests can feed canned
/// `who`/`uptime` output without touching the process table.
pub trait CommandRunner {
    /// Run `program` with `args` and return its trimmed stdout.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs commands on the host via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommands;

impl CommandRunner for SystemCommands {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        run_command(program, args)
    }
}

/// Execute a command and return stdout as String
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|err| TownstatsError::Command {
            program: program.to_string(),
            reason: err.to_string(),
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(TownstatsError::Command {
            program: program.to_string(),
            reason: format!("exit code: {:?}", output.status.code()),
        })
    }
}
