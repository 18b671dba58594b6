//! Activation
//!
//! Makes a finished install the active one: the `current` link is pointed at
//! it, and the install root is put on `PATH` for new shells (profile or
//! registry) and for the operator's current shell (deferred commands).
//!
//! The persistence half differs per platform and is expressed as an
//! [`ActivationStrategy`], chosen once from the detected platform.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(windows)]
use log::debug;
use log::warn;

use super::Context;
use crate::command::CommandLine;
use crate::error::Result;
use crate::host::HostEnv;
use crate::plan::{display, InstallLayout, InstallRequest};
use crate::platform::Platform;

pub mod posix;
pub mod windows;

pub use posix::{update_profile, PosixActivation};
pub use windows::WindowsActivation;

/// Platform-specific persistence of an install's activation.
pub trait ActivationStrategy {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Make `layout.install_root` reachable from new and current shells,
    /// and export `request.config` if one was given.
    fn activate(&self, ctx: &Context, request: &InstallRequest, layout: &InstallLayout)
        -> Result<()>;
}

/// The strategy for `platform`.
pub fn strategy_for(platform: Platform, host: &HostEnv) -> Box<dyn ActivationStrategy> {
    match platform {
        Platform::Windows => Box::new(WindowsActivation),
        Platform::Linux | Platform::Mac => Box::new(PosixActivation::new(host.profile_path())),
    }
}

/// Point `link` at `target`, replacing whatever is at `link` now.
pub fn relink(ctx: &Context, target: &Path, link: &Path) -> Result<()> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => {
            ctx.logger.line(format!("Removing link {}", display(link)));
            remove_link(link)?;
        }
        Ok(meta) if meta.is_dir() => {
            warn!("Replacing directory {} with a link", display(link));
            fs::remove_dir_all(link)?;
        }
        Ok(_) => fs::remove_file(link)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    ctx.logger
        .line(format!("{} -> {}", display(link), display(target)));
    create_dir_link(ctx, target, link)
}

#[cfg(unix)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_link(link: &Path) -> io::Result<()> {
    // Directory links and junctions are removed as directories.
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))
}

#[cfg(unix)]
fn create_dir_link(_ctx: &Context, target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(windows)]
fn create_dir_link(ctx: &Context, target: &Path, link: &Path) -> Result<()> {
    let native = |p: &Path| std::path::PathBuf::from(crate::path::to_windows(&display(p)));
    if let Err(e) = std::os::windows::fs::symlink_dir(native(target), native(link)) {
        debug!("Could not symlink {}: {}", display(link), e);
        ctx.run(&junction_command(target, link))?;
    }
    Ok(())
}

/// `mklink /J` making `link` a directory junction to `target`. Unlike a
/// directory symlink, a junction needs no extra privilege.
pub fn junction_command(target: &Path, link: &Path) -> CommandLine {
    let native = |p: &Path| crate::path::to_windows(&display(p));
    CommandLine::new("cmd").args([
        "/C".to_string(),
        "mklink".to_string(),
        "/J".to_string(),
        native(link),
        native(target),
    ])
}
