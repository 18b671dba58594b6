//! POSIX activation: shell profile edits plus deferred commands.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use regex::Regex;

use super::ActivationStrategy;
use crate::defaults::CONFIG_ENV_VAR;
use crate::error::Result;
use crate::path::escape;
use crate::phases::Context;
use crate::plan::{display, InstallLayout, InstallRequest};
use crate::shims::SHELL_INTEGRATION;

/// Activates through a shell profile file.
#[derive(Debug, Clone)]
pub struct PosixActivation {
    profile: PathBuf,
}

impl PosixActivation {
    pub fn new(profile: impl Into<PathBuf>) -> Self {
        Self {
            profile: profile.into(),
        }
    }
}

impl ActivationStrategy for PosixActivation {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn activate(
        &self,
        ctx: &Context,
        request: &InstallRequest,
        layout: &InstallLayout,
    ) -> Result<()> {
        let root = display(&layout.install_root);
        let export_cmd = format!("export PATH={}:$PATH", escape(&root));
        let source_cmd = format!(". {}", escape(&format!("{}/{}", root, SHELL_INTEGRATION)));
        let config_cmd = request
            .config
            .as_ref()
            .map(|config| format!("export {}={}", CONFIG_ENV_VAR, escape(config)));

        ctx.logger.step(
            format!("Add construct to shell profile {}...", display(&self.profile)),
            || {
                let changed =
                    update_profile(&self.profile, &export_cmd, &source_cmd, config_cmd.as_deref())?;
                if !changed {
                    ctx.logger.line("Profile already up to date.");
                }
                Ok(())
            },
        )?;

        ctx.logger
            .step(format!("Adding {} to PATH...", root), || ctx.defer(&export_cmd))?;

        ctx.logger
            .step(format!("Sourcing {}...", SHELL_INTEGRATION), || ctx.defer(&source_cmd))?;

        if let (Some(config), Some(config_cmd)) = (&request.config, &config_cmd) {
            ctx.logger.step(
                format!("Setting {} to {}...", CONFIG_ENV_VAR, config),
                || ctx.defer(config_cmd),
            )?;
        }

        Ok(())
    }
}

fn config_line_pattern() -> Result<Regex> {
    let pattern = format!(r"(?m)^[ \t]*export {}=.*$", regex::escape(CONFIG_ENV_VAR));
    Ok(Regex::new(&pattern)?)
}

/// Idempotently add the activation lines to `profile`.
///
/// `export_cmd` and `source_cmd` are appended only if not already present.
/// An existing config export is replaced in place; otherwise `config_cmd` is
/// appended. When anything changes the previous file is saved as
/// `<profile>.bak` before being rewritten. Returns whether the file changed.
pub fn update_profile(
    profile: &Path,
    export_cmd: &str,
    source_cmd: &str,
    config_cmd: Option<&str>,
) -> Result<bool> {
    // Touch, so a missing profile is created rather than failing the read.
    OpenOptions::new().create(true).append(true).open(profile)?;
    let original = fs::read_to_string(profile)?;
    let mut content = original.clone();

    let mut additions: Vec<&str> = Vec::new();
    if !content.contains(export_cmd) {
        additions.push(export_cmd);
    }
    if !content.contains(source_cmd) {
        additions.push(source_cmd);
    }
    if let Some(config_cmd) = config_cmd {
        let pattern = config_line_pattern()?;
        match pattern.find(&content).map(|m| m.range()) {
            Some(range) => content.replace_range(range, config_cmd),
            None => additions.push(config_cmd),
        }
    }

    if !additions.is_empty() {
        if !content.is_empty() {
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push('\n');
        }
        for line in additions {
            content.push_str(line);
            content.push('\n');
        }
    }

    if content == original {
        return Ok(false);
    }

    let backup = backup_path(profile);
    log::debug!("Creating backup profile {}", backup.display());
    fs::copy(profile, &backup)?;
    log::debug!("Writing {}", profile.display());
    fs::write(profile, content)?;
    Ok(true)
}

fn backup_path(profile: &Path) -> PathBuf {
    let mut name = profile.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
