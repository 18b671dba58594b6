//! Implementation of the install steps.
//!
//! ## Overview
//!
//! An install runs these steps strictly in order:
//! 1. Preflight - Check prerequisites and confirm reduced privileges
//! 2. Planning - Derive every path from the request (see [`crate::plan`])
//! 3. Provisioning - Ensure the isolated environment exists
//! 4. Package Install - Force-install the distribution into `lib`
//! 5. Layout Normalization - Move console scripts into `bin`, copy launchers
//! 6. Activation - Relink `current` and make the install reachable from shells
//!
//! Any failure aborts the whole install. Steps already completed are not rolled
//! back; every step is safe to re-run, so running the installer again is the
//! recovery path.
//!
//! All steps share one [`Context`]: the progress logger, the external command
//! runner, the deferred-command sink and the host environment snapshot.

use crate::command::{CommandLine, CommandOutput, CommandRunner};
use crate::deferred::DeferredCommandSink;
use crate::error::Result;
use crate::host::HostEnv;
use crate::output::Logger;

pub mod activation;
pub mod normalize;
pub mod orchestrator;
pub mod packages;
pub mod preflight;
pub mod provision;

/// Collaborators shared by every install step.
pub struct Context<'a> {
    pub logger: &'a Logger,
    pub runner: &'a dyn CommandRunner,
    pub sink: &'a dyn DeferredCommandSink,
    pub host: &'a HostEnv,
}

impl<'a> Context<'a> {
    pub fn new(
        logger: &'a Logger,
        runner: &'a dyn CommandRunner,
        sink: &'a dyn DeferredCommandSink,
        host: &'a HostEnv,
    ) -> Self {
        Self {
            logger,
            runner,
            sink,
            host,
        }
    }

    /// Echo a command to the progress log, then run it.
    pub fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        self.logger.line(command);
        self.runner.run(command)
    }

    /// Schedule a command for the parent shell and echo it.
    pub fn defer(&self, command: &str) -> Result<()> {
        if self.sink.is_configured() {
            self.logger.line(format!("Deferred: {}", command));
        }
        self.sink.append(command)
    }
}
