//! Windows activation: folder permissions, machine environment variables and
//! deferred `set` commands for the calling shell.
//!
//! Machine-wide changes are only attempted with administrative rights, and
//! they are written through the deferred batch script so they take effect
//! from the same shell that launched the installer.

use std::path::Path;

use log::{debug, error, warn};

use super::ActivationStrategy;
use crate::command::CommandLine;
use crate::defaults::CONFIG_ENV_VAR;
use crate::error::Result;
use crate::path;
use crate::phases::Context;
use crate::plan::{display, InstallLayout, InstallRequest};

/// Registry key holding the machine environment.
pub const ENVIRONMENT_KEY: &str =
    r"HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Value type for a machine environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryValueType {
    String,
    /// Expanded on read, e.g. `%SystemRoot%\system32`.
    ExpandString,
}

impl RegistryValueType {
    /// `ExpandString` when `value` references another variable.
    pub fn for_value(value: &str) -> Self {
        if value.contains('%') {
            RegistryValueType::ExpandString
        } else {
            RegistryValueType::String
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegistryValueType::String => "REG_SZ",
            RegistryValueType::ExpandString => "REG_EXPAND_SZ",
        }
    }
}

/// Activates through the machine registry and the deferred batch script.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsActivation;

impl ActivationStrategy for WindowsActivation {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn activate(
        &self,
        ctx: &Context,
        request: &InstallRequest,
        layout: &InstallLayout,
    ) -> Result<()> {
        let elevated = ctx.host.elevated;
        let root = display(&layout.install_root);
        let native_root = path::to_windows(&root);

        if elevated {
            ctx.logger.step("Setting windows acls...", || {
                grant_user_access(ctx, &layout.install_path);
                Ok(())
            })?;
        }

        ctx.logger.step(format!("Adding {} to system PATH...", root), || {
            match query_machine_value(ctx, "PATH") {
                Some(system_path)
                    if system_path
                        .split(';')
                        .any(|entry| path::same_entry(entry, &native_root, true)) =>
                {
                    ctx.logger.line(format!("{} already on system PATH.", root));
                }
                Some(system_path) if elevated => {
                    let value = if system_path.is_empty() {
                        native_root.clone()
                    } else {
                        format!("{};{}", native_root, system_path)
                    };
                    ctx.defer(&reg_add_command("PATH", &value))?;
                }
                None if elevated => {
                    warn!(
                        "Could not read the machine PATH, leaving it unchanged. Add {} to it manually.",
                        native_root
                    );
                }
                _ => {}
            }

            ctx.defer(&format!("set \"PATH={};%PATH%\"", native_root))
        })?;

        if let Some(config) = &request.config {
            let native_config = path::to_windows(config);
            ctx.logger.step(
                format!("Setting {} to {}...", CONFIG_ENV_VAR, config),
                || {
                    if elevated {
                        ctx.defer(&reg_add_command(CONFIG_ENV_VAR, &native_config))?;
                    }
                    ctx.defer(&format!("set \"{}={}\"", CONFIG_ENV_VAR, native_config))
                },
            )?;
        }

        Ok(())
    }
}

/// Grant the local `Users` group full control of `install_path`.
/// Failure is logged and ignored.
fn grant_user_access(ctx: &Context, install_path: &Path) {
    let target = format!("{}\\*", path::to_windows(&display(install_path)));
    let command = CommandLine::new("icacls").args([
        target.as_str(),
        "/grant",
        "Users:(F)",
        "/inheritance:e",
        "/T",
    ]);
    if let Err(e) = ctx.run(&command) {
        error!("Failed to set permissions on {}: {}", display(install_path), e);
    }
}

/// Current machine value of `name`, or `None` if it cannot be read.
pub fn query_machine_value(ctx: &Context, name: &str) -> Option<String> {
    let command = CommandLine::new("reg").args(["query", ENVIRONMENT_KEY, "/v", name]);
    match ctx.run(&command) {
        Ok(output) => parse_reg_query(&output.stdout, name),
        Err(e) => {
            debug!("Could not read machine {}: {}", name, e);
            None
        }
    }
}

/// Extract the data of value `name` from `reg query` output.
///
/// Lines look like `    PATH    REG_EXPAND_SZ    C:\Windows;...`; the data
/// may itself contain spaces.
pub fn parse_reg_query(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (value_name, rest) = split_token(line.trim())?;
        if !value_name.eq_ignore_ascii_case(name) {
            return None;
        }
        let (kind, data) = split_token(rest).unwrap_or((rest, ""));
        kind.starts_with("REG_").then(|| data.to_string())
    })
}

fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], s[end..].trim())),
        None => Some((s, "")),
    }
}

/// `reg add` command persisting `name=value` machine-wide.
pub fn reg_add_command(name: &str, value: &str) -> String {
    format!(
        "reg add {} /v {} /t {} /d {} /f",
        quote_argument(ENVIRONMENT_KEY),
        name,
        RegistryValueType::for_value(value).as_str(),
        quote_argument(value)
    )
}

/// Quote `value` as a single `reg.exe` argument in a batch script.
///
/// `reg.exe` splits its command line with the C runtime rules, where
/// backslashes are literal unless they precede a quote: those runs are
/// doubled, so a value ending in `\` keeps its closing quote. `%` is doubled
/// so the script leaves variable references unexpanded.
fn quote_argument(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for c in value.chars() {
        match c {
            '\\' => {
                backslashes += 1;
                continue;
            }
            '"' => quoted.push_str(&"\\".repeat(backslashes * 2 + 1)),
            _ => quoted.push_str(&"\\".repeat(backslashes)),
        }
        backslashes = 0;
        if c == '%' {
            quoted.push_str("%%");
        } else {
            quoted.push(c);
        }
    }
    quoted.push_str(&"\\".repeat(backslashes * 2));
    quoted.push('"');
    quoted
}
