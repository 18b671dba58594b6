//! Default values for construct-setup.
//!
//! This module centralizes the constants shared by the CLI and the install
//! steps: the baked-in release, the remote package source, and the names of
//! the environment variables the invoking wrapper communicates through.

/// Release installed when `--version` is not given.
pub const DEFAULT_VERSION: &str = "0.1.40";

/// Interpreter used when `--python` is not given. Resolved through `PATH`.
#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
/// Interpreter used when `--python` is not given. Resolved through `PATH`.
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Versioned remote source; `{version}` is replaced by the release identifier.
pub const REMOTE_PACKAGE: &str =
    "git+https://github.com/construct-org/construct_setup@{version}#egg=construct_setup";

/// Name of the link under the install root that points at the active install.
pub const CURRENT_LINK_NAME: &str = "current";

/// Name of the path-extension marker written into the environment's site dir.
pub const PATH_EXTENSION_FILE: &str = "construct.pth";

/// Environment variable holding the elevation flag set by the invoking wrapper.
pub const ADMIN_ENV_VAR: &str = "SCRIM_ADMIN";

/// Environment variable naming the script the wrapper sources after we exit.
pub const DEFERRED_SCRIPT_ENV_VAR: &str = "SCRIM_PATH";

/// Environment variable that points the construct CLI at its config file.
pub const CONFIG_ENV_VAR: &str = "CONSTRUCT_CONFIG";

/// Build the remote package source for a release.
pub fn remote_package(version: &str) -> String {
    REMOTE_PACKAGE.replace("{version}", version)
}
