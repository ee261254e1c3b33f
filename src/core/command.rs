//! # Command Runner
//!
//! Boundary for the document's `commands` key: a shell command string
//! run synchronously while the UI is suspended. The core only needs to
//! know that the command returned; its exit status is logged.

use std::io;
use std::process::Command;

use log::{info, warn};

/// Executes a command string synchronously.
pub trait CommandRunner {
    fn run(&self, command: &str) -> io::Result<()>;
}

/// Runs commands through a configurable shell (`<shell> -c <command>`).
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> io::Result<()> {
        info!("running commands via {}: {command}", self.shell);
        let status = Command::new(&self.shell).arg("-c").arg(command).status()?;
        if !status.success() {
            warn!("commands exited with {status}");
        }
        Ok(())
    }
}
