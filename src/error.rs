//! # Error Handling
//!
//! This module defines the error type shared by every install step. It uses
//! `thiserror` to describe each failure mode with enough context (the command
//! line that failed, the step that was running, a hint for the operator) for
//! the top-level driver to print one useful message before aborting.
//!
//! ## Taxonomy
//!
//! - **Missing prerequisites** (`MissingPrerequisite`): a tool the install
//!   depends on is absent. Raised before anything is written to disk.
//! - **External command failures** (`Command`): a spawned process could not be
//!   started or exited non-zero.
//! - **Environment failures** (`EnvironmentUnavailable`): none of the isolated
//!   environment tools could be used with the requested interpreter.
//! - **Step failures** (`Step`): wraps any of the above with the name of the
//!   install step that was running.
//!
//! Privilege reductions and idempotence short-circuits are not errors; they are
//! logged by the steps themselves and never surface here.

use thiserror::Error;

/// Main error type for construct-setup operations
#[derive(Error, Debug)]
pub enum Error {
    /// A tool required by the install is not available on this host.
    #[error("{tool} is required to install construct.{}", hint_suffix(.hint))]
    MissingPrerequisite {
        tool: String,
        /// Where the operator can get the missing tool
        hint: Option<String>,
    },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Failed to execute: {command}{}", command_details(.status, .stderr))]
    Command {
        command: String,
        /// Exit code, or `None` when the process never started or was killed
        status: Option<i32>,
        stderr: String,
    },

    /// No isolated-environment tool could be used with the interpreter.
    #[error("Failed to setup a virtualenv for construct. Install virtualenv for \"{interpreter}\"")]
    EnvironmentUnavailable { interpreter: String },

    /// The interpreter answered a query with something we could not parse.
    #[error("Unexpected interpreter version output: {output:?}")]
    InterpreterVersion { output: String },

    /// A filesystem operation could not be completed.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An install step failed; `source` holds the cause.
    #[error("Install step failed: {step}")]
    Step {
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// The confirmation prompt could not read an answer.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

fn command_details(status: &Option<i32>, stderr: &str) -> String {
    let mut details = status
        .map(|code| format!(" (exit status {})", code))
        .unwrap_or_default();
    if !stderr.trim().is_empty() {
        details.push('\n');
        details.push_str(stderr.trim_end());
    }
    details
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap this error as the cause of a failed install step.
    pub fn in_step(self, step: impl Into<String>) -> Self {
        Error::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// Build a filesystem error with a formatted message.
    pub fn filesystem(message: impl Into<String>) -> Self {
        Error::Filesystem {
            message: message.into(),
        }
    }
}
