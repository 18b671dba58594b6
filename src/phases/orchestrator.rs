//! Orchestrator for the complete install
//!
//! Runs every step in order against one [`Context`]. The first failure stops
//! the install; nothing already done is rolled back.

use log::{debug, info};

use super::activation::{relink, ActivationStrategy};
use super::normalize::{ensure_exists, install_shims, relocate};
use super::packages::{install_package, write_path_extension};
use super::preflight::{check_prerequisites, confirm_reduced_privileges, interpreter_version};
use super::provision::ensure_environment;
use super::Context;
use crate::defaults::PATH_EXTENSION_FILE;
use crate::error::Result;
use crate::path;
use crate::plan::{display, InstallLayout, InstallRequest};
use crate::platform::Platform;
use crate::prompt::Prompter;

/// How an install ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed(InstallLayout),
    /// The operator declined a reduced-privilege install. Nothing was changed.
    Declined,
}

/// Execute the complete install.
///
/// 1. Check prerequisites, confirm a reduced-privilege install
/// 2. Query the interpreter and plan the layout
/// 3. Create the install directories and the isolated environment
/// 4. Write the path-extension marker, install the distribution into `lib`
/// 5. Move console scripts into `bin`, copy the launchers into the root
/// 6. Relink `current` and activate through `strategy`
pub fn execute_install(
    request: &InstallRequest,
    platform: Platform,
    ctx: &Context,
    prompter: &dyn Prompter,
    strategy: &dyn ActivationStrategy,
) -> Result<Outcome> {
    check_prerequisites(ctx, request)?;
    if !confirm_reduced_privileges(ctx, platform, request, prompter)? {
        return Ok(Outcome::Declined);
    }

    ctx.logger.line(format!(
        "Installing Construct-{} to \"{}\".",
        request.release,
        path::join(&request.install_root, &[&request.install_name])
    ));
    ctx.logger.line(format!("Using \"{}\".", request.interpreter));

    let version = interpreter_version(ctx, &request.interpreter)?;
    let layout = InstallLayout::plan(request, platform, version);
    info!(
        "Installing {} for Python {} on {}",
        display(&layout.install_path),
        version,
        platform
    );

    ctx.logger.step("Ensure install directories exist...", || {
        ensure_exists(ctx, &layout.install_root)?;
        ensure_exists(ctx, &layout.install_path)
    })?;

    ctx.logger.step("Create virtualenv...", || {
        ensure_environment(
            ctx,
            &request.interpreter,
            &layout.env_dir,
            &layout.env_interpreter,
        )
    })?;

    ctx.logger
        .step(format!("Write {}...", PATH_EXTENSION_FILE), || {
            write_path_extension(ctx, &layout)
        })?;

    ctx.logger.step("Install construct to virtualenv...", || {
        install_package(ctx, &layout.env_interpreter, &request.source, &layout.lib_dir)
    })?;

    ctx.logger.step(
        format!("Move console scripts to {}...", display(&layout.bin_dir)),
        || relocate(ctx, &layout.lib_bin_dir, &layout.bin_dir),
    )?;

    ctx.logger.step(
        format!("Copy launchers to {}...", display(&layout.install_root)),
        || install_shims(ctx, &layout.install_root),
    )?;

    ctx.logger.step(
        format!("Update symlink {}...", display(&layout.current_link)),
        || relink(ctx, &layout.install_path, &layout.current_link),
    )?;

    debug!("Activating with the {} strategy", strategy.name());
    strategy.activate(ctx, request, &layout)?;

    ctx.logger.blank();
    ctx.logger.line("Install complete!");
    ctx.logger.line("Open a new shell and run cons -h to get started.");

    Ok(Outcome::Installed(layout))
}
