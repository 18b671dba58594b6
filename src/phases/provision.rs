//! Environment provisioning
//!
//! Creates the isolated runtime the distribution is installed into. An
//! environment directory that already exists is trusted as-is and reused.

use std::path::{Path, PathBuf};

use log::warn;

use super::Context;
use crate::command::CommandLine;
use crate::error::{Error, Result};
use crate::plan::display;

/// The environment an install runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentHandle {
    pub env_dir: PathBuf,
    /// Interpreter inside the environment.
    pub interpreter: PathBuf,
    /// Whether this call created the environment.
    pub created: bool,
}

/// Make sure an isolated environment exists at `env_dir`.
///
/// Tries, in order: the `virtualenv` module, the built-in `venv` module, and
/// finally installing `virtualenv` with the interpreter's package manager and
/// retrying. A freshly created environment gets its package manager upgraded.
pub fn ensure_environment(
    ctx: &Context,
    interpreter: &str,
    env_dir: &Path,
    env_interpreter: &Path,
) -> Result<EnvironmentHandle> {
    let env_display = display(env_dir);
    let handle = |created| EnvironmentHandle {
        env_dir: env_dir.to_path_buf(),
        interpreter: env_interpreter.to_path_buf(),
        created,
    };

    if env_dir.exists() {
        warn!("Virtualenv already exists {}", env_display);
        ctx.logger.line(format!("Virtualenv already exists {}.", env_display));
        return Ok(handle(false));
    }

    ctx.logger.line(format!("Creating virtualenv {}.", env_display));

    let has_module = |module: &str| {
        ctx.runner.probe(
            &CommandLine::new(interpreter).args(["-c".to_string(), format!("import {}", module)]),
        )
    };
    let create_with = |module: &str| {
        ctx.run(&CommandLine::new(interpreter).args(["-m", module, env_display.as_str()]))
    };

    if has_module("virtualenv") {
        create_with("virtualenv")?;
    } else if has_module("venv") {
        create_with("venv")?;
    } else {
        let bootstrap = CommandLine::new(interpreter).args(["-m", "pip", "install", "virtualenv"]);
        if ctx.run(&bootstrap).is_err() {
            return Err(Error::EnvironmentUnavailable {
                interpreter: interpreter.to_string(),
            });
        }
        create_with("virtualenv")?;
    }

    ctx.logger.line("Upgrading pip...");
    ctx.run(&pip_install(env_interpreter, ["-U", "pip"]))?;

    Ok(handle(true))
}

/// `<interpreter> -m pip install <args...>`
pub fn pip_install<I, S>(interpreter: &Path, args: I) -> CommandLine
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandLine::new(display(interpreter))
        .args(["-m", "pip", "install"])
        .args(args)
}
