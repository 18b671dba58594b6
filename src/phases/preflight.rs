//! Preflight checks
//!
//! Runs before anything is written: the tools the install needs must be
//! present, and an unelevated Windows operator must agree to a reduced
//! install.

use super::Context;
use crate::command::CommandLine;
use crate::error::{Error, Result};
use crate::plan::{InstallRequest, InterpreterVersion};
use crate::platform::Platform;
use crate::prompt::{is_decline, Prompter};

/// Verify the version-control tool (for remote sources) and the package
/// manager are available.
pub fn check_prerequisites(ctx: &Context, request: &InstallRequest) -> Result<()> {
    if request.source.needs_vcs() && !ctx.runner.probe(&CommandLine::new("git").arg("--version"))
    {
        return Err(Error::MissingPrerequisite {
            tool: "Git".to_string(),
            hint: Some("Download it from https://git-scm.com/.".to_string()),
        });
    }

    let import_pip = CommandLine::new(&request.interpreter).args(["-c", "import pip"]);
    if !ctx.runner.probe(&import_pip) {
        return Err(Error::MissingPrerequisite {
            tool: "pip".to_string(),
            hint: Some("Get it from https://pip.pypa.io/en/stable/installing/.".to_string()),
        });
    }

    Ok(())
}

/// Ask the interpreter for its `major.minor` version.
pub fn interpreter_version(ctx: &Context, interpreter: &str) -> Result<InterpreterVersion> {
    let query = CommandLine::new(interpreter).args([
        "-c",
        "import sys; print('%d.%d' % sys.version_info[:2])",
    ]);
    let output = ctx.runner.run(&query)?;
    InterpreterVersion::parse(&output.stdout)
}

/// Warn an unelevated Windows operator about the features that will be
/// skipped and ask whether to continue. Returns `false` if they decline.
///
/// Never prompts on other platforms, when elevated, or when prompts are
/// suppressed.
pub fn confirm_reduced_privileges(
    ctx: &Context,
    platform: Platform,
    request: &InstallRequest,
    prompter: &dyn Prompter,
) -> Result<bool> {
    if !platform.is_windows() || ctx.host.elevated {
        return Ok(true);
    }

    ctx.logger.line(
        "To fully install Construct you need Admin privileges. The \
         following features will be disabled.\n",
    );
    ctx.logger.with_indent(|| {
        ctx.logger.line("- Setting system environment variables");
        ctx.logger.line("- Setting folder permissions");
    });
    ctx.logger.blank();

    if request.non_interactive {
        return Ok(true);
    }

    let answer = prompter.ask("Would you like to install anyway? [y] or n")?;
    Ok(!is_decline(&answer))
}
