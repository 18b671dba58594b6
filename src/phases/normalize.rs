//! Layout normalization
//!
//! The package manager writes console scripts to `lib/bin`; the install keeps
//! them in `bin`. This module moves them across and drops the launcher shims
//! into the install root.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use walkdir::WalkDir;

use super::Context;
use crate::error::{Error, Result};
use crate::plan::display;
use crate::shims::LAUNCHERS;

/// Create `dir` (and its parents) unless it already exists.
pub fn ensure_exists(ctx: &Context, dir: &Path) -> Result<()> {
    if dir.exists() {
        ctx.logger.line(format!("{} already exists.", display(dir)));
    } else {
        ctx.logger.line(format!("Create {}", display(dir)));
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Move every file under `src` to the same relative path under `dest`,
/// replacing files already there, then remove `src`.
///
/// A missing `src` is not an error: a distribution without console scripts
/// leaves nothing to move.
pub fn relocate(ctx: &Context, src: &Path, dest: &Path) -> Result<()> {
    if !src.exists() {
        warn!("Nothing to move, {} does not exist", display(src));
        return Ok(());
    }

    if !dest.is_dir() {
        ctx.logger.line(format!("Creating {}", display(dest)));
        fs::create_dir_all(dest)?;
    }

    // Collected up front so the walk does not observe its own moves.
    let entries = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::filesystem(e.to_string()))?;

    for entry in entries {
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::filesystem(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                ctx.logger.line(format!("Creating {}", display(&target)));
                fs::create_dir_all(&target)?;
            }
            continue;
        }

        ctx.logger
            .line(format!("{} > {}", display(entry.path()), display(&target)));
        if fs::symlink_metadata(&target).is_ok() {
            fs::remove_file(&target)?;
        }
        move_file(entry.path(), &target)?;
    }

    fs::remove_dir_all(src)?;
    Ok(())
}

/// Rename, falling back to copy-and-delete across filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

/// Write every launcher (and its aliases) into `dest`, overwriting existing
/// files.
pub fn install_shims(ctx: &Context, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for launcher in LAUNCHERS {
        for filename in launcher.filenames() {
            let target = dest.join(filename);
            ctx.logger.line(format!("{} -> {}", launcher.name, display(&target)));
            fs::write(&target, launcher.contents)?;
            if launcher.executable {
                make_executable(&target)?;
            }
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
