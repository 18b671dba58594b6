//! Package installation
//!
//! Installs the distribution and its dependencies into the install's `lib`
//! directory instead of the environment's own site directory, which keeps the
//! payload relocatable. A path-extension marker in the environment's site
//! directory makes `lib` and `bin` importable from the isolated interpreter.

use std::fs;
use std::path::Path;

use super::provision::pip_install;
use super::Context;
use crate::defaults::PATH_EXTENSION_FILE;
use crate::error::Result;
use crate::plan::{display, InstallLayout, PackageSource};

/// Force-install `source` into `target_dir` with the environment's package
/// manager. Any non-zero exit is fatal.
pub fn install_package(
    ctx: &Context,
    env_interpreter: &Path,
    source: &PackageSource,
    target_dir: &Path,
) -> Result<()> {
    let command = pip_install(
        env_interpreter,
        [
            "-I".to_string(), // ignore installed
            "-U".to_string(), // force upgrade
            source.spec(),
            format!("--target={}", display(target_dir)),
        ],
    );
    ctx.run(&command)?;
    Ok(())
}

/// Contents of the path-extension marker: the two entries joined by a newline.
pub fn path_extension_contents(layout: &InstallLayout) -> String {
    layout.path_extension_entries().join("\n")
}

/// Write the path-extension marker into the environment's site directory.
pub fn write_path_extension(ctx: &Context, layout: &InstallLayout) -> Result<()> {
    let marker = layout.env_site_packages.join(PATH_EXTENSION_FILE);
    ctx.logger.line(format!("Writing {}.", display(&marker)));
    ctx.logger.with_indent(|| {
        for entry in layout.path_extension_entries() {
            ctx.logger.line(entry);
        }
    });

    fs::create_dir_all(&layout.env_site_packages)?;
    fs::write(&marker, path_extension_contents(layout))?;
    Ok(())
}
