//! Snapshot of the process environment the installer depends on.
//!
//! The invoking wrapper communicates with us through environment variables:
//! whether we run elevated, and where to write commands it should source after
//! we exit. Reading them once into [`HostEnv`] keeps the install steps free of
//! process-global lookups and lets tests describe a host explicitly.

use std::env;
use std::path::PathBuf;

use crate::defaults::{ADMIN_ENV_VAR, DEFERRED_SCRIPT_ENV_VAR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    /// Whether the process may write system-wide state.
    pub elevated: bool,
    /// Script the parent shell sources after we exit, if any.
    pub deferred_script: Option<PathBuf>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
}

impl HostEnv {
    /// Read the current process environment.
    pub fn from_process() -> Self {
        Self {
            elevated: parse_flag(env::var(ADMIN_ENV_VAR).ok().as_deref()),
            deferred_script: env::var_os(DEFERRED_SCRIPT_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    /// Profile file the POSIX activation edits.
    ///
    /// Elevated installs go to `/etc/profile` so every user picks them up.
    pub fn profile_path(&self) -> PathBuf {
        if self.elevated {
            PathBuf::from("/etc/profile")
        } else {
            self.home
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".profile")
        }
    }
}

/// Interpret the elevation flag. Unset means elevated; the wrapper only sets
/// it when it knows we are not.
fn parse_flag(value: Option<&str>) -> bool {
    let Some(value) = value.map(str::trim) else {
        return true;
    };
    match value.to_ascii_lowercase().as_str() {
        "" => true,
        "false" | "no" | "off" => false,
        "true" | "yes" | "on" => true,
        other => other.parse::<i64>().map(|n| n != 0).unwrap_or(true),
    }
}
