//! # Deferred Commands
//!
//! A child process cannot change its parent shell's environment. The wrapper
//! that launches the installer works around this by exporting the path of a
//! script in `SCRIM_PATH` and sourcing that script once we exit. Commands
//! appended to it (`export PATH=...`, `set "PATH=..."`) therefore take effect
//! in the operator's current session.
//!
//! [`DeferredCommandSink`] is that capability. When no script is configured
//! the [`NullSink`] drops every command; current-session activation is then
//! best effort and new shells still pick the install up from the profile or
//! registry.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::host::HostEnv;

/// Receives shell commands for the parent shell to run after we exit.
pub trait DeferredCommandSink {
    /// Record one command.
    fn append(&self, command: &str) -> Result<()>;

    /// Whether appended commands will actually run.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Appends commands, one per line, to the wrapper's script.
#[derive(Debug, Clone)]
pub struct ScriptSink {
    path: PathBuf,
}

impl ScriptSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeferredCommandSink for ScriptSink {
    fn append(&self, command: &str) -> Result<()> {
        log::debug!("Deferring `{}` to {}", command, self.path.display());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", command)?;
        Ok(())
    }
}

/// Drops every command. Used when the wrapper did not provide a script.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DeferredCommandSink for NullSink {
    fn append(&self, command: &str) -> Result<()> {
        log::debug!("No deferred script configured, dropping `{}`", command);
        Ok(())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// The sink the wrapper asked for, or a [`NullSink`] if it asked for none.
pub fn from_host(host: &HostEnv) -> Box<dyn DeferredCommandSink> {
    match &host.deferred_script {
        Some(path) => Box::new(ScriptSink::new(path)),
        None => Box::new(NullSink),
    }
}
