//! # External Commands
//!
//! Every tool the installer drives (the interpreter, its package manager, the
//! environment tool, `git`, `reg`, `icacls`) is invoked through the
//! [`CommandRunner`] trait. The exit status is the only success signal.
//!
//! ## Design
//!
//! This mirrors a trait-based split between logic and side effects: the
//! install steps build [`CommandLine`] values and hand them to a runner. In the
//! binary that runner is [`SystemRunner`], which spawns real processes. In
//! tests a fake runner records the command lines and simulates their effects
//! on disk, so the steps can be exercised without an interpreter installed.

use std::fmt;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::path::escape;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", escape(arg))?;
        }
        Ok(())
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// Returns [`Error::Command`] if it cannot be started or exits non-zero.
    fn run(&self, command: &CommandLine) -> Result<CommandOutput>;

    /// Check whether a command succeeds, discarding its output.
    fn probe(&self, command: &CommandLine) -> bool {
        self.run(command).is_ok()
    }
}

/// Runs commands as real child processes.
///
/// Output is captured unless `verbose` is set, in which case the child
/// inherits the terminal and its output streams live.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        log::debug!("Running {}", command);
        let mut process = Command::new(&command.program);
        process.args(&command.args).stdin(Stdio::null());

        let spawn_error = |e: std::io::Error| Error::Command {
            command: command.to_string(),
            status: None,
            stderr: e.to_string(),
        };

        if self.verbose {
            let status = process.status().map_err(spawn_error)?;
            if !status.success() {
                return Err(Error::Command {
                    command: command.to_string(),
                    status: status.code(),
                    stderr: String::new(),
                });
            }
            return Ok(CommandOutput::default());
        }

        let output = process.output().map_err(spawn_error)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::Command {
                command: command.to_string(),
                status: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }

    fn probe(&self, command: &CommandLine) -> bool {
        // Probes stay quiet even in verbose mode.
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
