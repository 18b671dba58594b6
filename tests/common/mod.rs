//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_fake_python();
//!     fixture.install_command().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A stand-in interpreter for POSIX hosts.
///
/// Answers the import probes and the version query, creates an environment
/// (copying itself in as the environment's interpreter), and populates any
/// `--target=` directory the way the package manager would. Package installs
/// fail when `FAKE_PIP_FAIL` is set.
pub const FAKE_PYTHON: &str = r#"#!/bin/sh
case "$1" in
  -c)
    case "$2" in
      *version_info*) echo 3.11 ;;
    esac
    exit 0
    ;;
  -m)
    if [ "$2" = virtualenv ] || [ "$2" = venv ]; then
      mkdir -p "$3/bin"
      cp "$0" "$3/bin/python"
      exit 0
    fi
    for arg in "$@"; do
      case "$arg" in
        --target=*)
          if [ -n "$FAKE_PIP_FAIL" ]; then
            echo "ERROR: Could not install packages" >&2
            exit 1
          fi
          target="${arg#--target=}"
          mkdir -p "$target/construct" "$target/bin"
          : > "$target/construct/__init__.py"
          printf '#!/bin/sh\n' > "$target/bin/construct"
          ;;
      esac
    done
    exit 0
    ;;
esac
exit 1
"#;

/// A temporary home, install root and deferred script for one install run.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write [`FAKE_PYTHON`] as an executable `python` in the fixture.
    #[cfg(unix)]
    pub fn with_fake_python(self) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let python = self.temp_dir.child("python");
        python
            .write_str(FAKE_PYTHON)
            .expect("Failed to write fake python");
        std::fs::set_permissions(python.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake python executable");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Install root passed with `--where`.
    pub fn install_root(&self) -> PathBuf {
        self.path().join("construct")
    }

    /// Home directory of the installing user.
    pub fn home(&self) -> PathBuf {
        self.path().join("home")
    }

    /// Script the installer writes deferred commands to.
    pub fn deferred_script(&self) -> PathBuf {
        self.path().join("deferred.sh")
    }

    /// Contents of the deferred script, empty if it was never written.
    #[allow(dead_code)]
    pub fn deferred_commands(&self) -> String {
        std::fs::read_to_string(self.deferred_script()).unwrap_or_default()
    }

    /// Create a command configured to run in this fixture's directory, as
    /// an unelevated user whose home is inside the fixture.
    pub fn command(&self) -> assert_cmd::Command {
        std::fs::create_dir_all(self.home()).expect("Failed to create home directory");
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("construct-setup");
        cmd.current_dir(self.path())
            .env("HOME", self.home())
            .env("SCRIM_ADMIN", "0")
            .env("SCRIM_PATH", self.deferred_script())
            .env_remove("RUST_LOG")
            .env_remove("FAKE_PIP_FAIL")
            .arg("--color=never");
        cmd
    }

    /// A local install of release `1.2.3` into [`Self::install_root`] using
    /// the fixture's `python`.
    pub fn install_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--version")
            .arg("1.2.3")
            .arg("--local")
            .arg("--ignore-prompts")
            .arg("--python")
            .arg(self.path().join("python"))
            .arg("--where")
            .arg(self.install_root());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
        assert!(!fixture.install_root().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_fixture_with_fake_python() {
        let fixture = TestFixture::new().with_fake_python();
        assert!(fixture.path().join("python").is_file());
    }
}
