//! Install command implementation
//!
//! Builds an install request from the command line and runs every install
//! step against the real host:
//! 1. Preflight checks and privilege confirmation
//! 2. Environment provisioning
//! 3. Package installation
//! 4. Layout normalization
//! 5. Activation
//!
//! A failed install is reported and ends with `Install Aborted.`; the process
//! still exits successfully so the calling wrapper goes on to source whatever
//! deferred commands were already written.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use log::error;

use construct_setup::command::SystemRunner;
use construct_setup::defaults::{DEFAULT_PYTHON, DEFAULT_VERSION};
use construct_setup::deferred;
use construct_setup::error::Error;
use construct_setup::host::HostEnv;
use construct_setup::output::{Logger, OutputConfig};
use construct_setup::phases::activation::strategy_for;
use construct_setup::phases::orchestrator::{execute_install, Outcome};
use construct_setup::phases::Context;
use construct_setup::plan::{InstallRequest, PackageSource};
use construct_setup::platform::Platform;
use construct_setup::prompt::TerminalPrompter;

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Release of construct to install
    #[arg(long = "version", value_name = "VERSION", default_value = DEFAULT_VERSION)]
    pub release: String,

    /// Python interpreter the isolated environment is created from
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Install root (defaults to C:/construct on Windows, /opt/construct elsewhere)
    #[arg(long = "where", value_name = "PATH")]
    pub install_root: Option<PathBuf>,

    /// Config file exported as CONSTRUCT_CONFIG
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Install the checkout in the current directory instead of the release
    #[arg(long)]
    pub local: bool,

    /// Directory name of the install under the root (defaults to the release)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Answer every confirmation prompt with yes
    #[arg(long)]
    pub ignore_prompts: bool,

    /// Show debug output and stream command output
    #[arg(long)]
    pub debug: bool,
}

/// Execute the install command
pub fn execute(args: InstallArgs, output: OutputConfig) -> Result<()> {
    let platform = Platform::current();
    let host = HostEnv::from_process();
    let verbose = args.debug;
    let request = build_request(args, platform)?;

    let logger = Logger::stdout(output);
    let runner = SystemRunner::new(verbose);
    let sink = deferred::from_host(&host);
    let ctx = Context::new(&logger, &runner, sink.as_ref(), &host);
    let strategy = strategy_for(platform, &host);

    match execute_install(&request, platform, &ctx, &TerminalPrompter, strategy.as_ref()) {
        Ok(Outcome::Installed(_)) => {}
        Ok(Outcome::Declined) => {
            logger.reset_indent();
            logger.line("Abort.");
        }
        Err(e) => report_failure(&logger, &e),
    }

    Ok(())
}

/// Resolve relative paths against the working directory and build the
/// request.
fn build_request(args: InstallArgs, platform: Platform) -> Result<InstallRequest> {
    let install_root = match args.install_root.filter(|p| !p.as_os_str().is_empty()) {
        Some(root) => std::path::absolute(root)?,
        None => PathBuf::from(platform.default_install_root()),
    };
    let config = args
        .config
        .filter(|p| !p.as_os_str().is_empty())
        .map(std::path::absolute)
        .transpose()?;
    let source = if args.local {
        PackageSource::Local(std::env::current_dir()?)
    } else {
        PackageSource::remote(&args.release)
    };

    let config = config.as_deref().map(Path::to_string_lossy);
    Ok(InstallRequest::new(
        args.release,
        args.name,
        args.python,
        &install_root.to_string_lossy(),
        config.as_deref(),
        source,
        args.ignore_prompts,
    ))
}

/// Log the failure with its causes and print the abort banner.
fn report_failure(logger: &Logger, failure: &Error) {
    error!("{}", failure);
    let mut cause = failure.source();
    while let Some(inner) = cause {
        error!("  caused by: {}", inner);
        cause = inner.source();
    }

    logger.reset_indent();
    logger.blank();
    logger.line("Install Aborted.");
}
