//! # Install Planning
//!
//! Everything the install steps touch on disk is derived here from the
//! operator's request. Planning is a pure computation: the same
//! [`InstallRequest`], platform and interpreter version always produce the
//! same [`InstallLayout`], byte for byte.
//!
//! Paths are kept in normalized forward-slash form (see [`crate::path`]) so
//! they can be embedded in profiles, deferred commands and the path-extension
//! marker without platform-specific escaping.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::defaults::{self, CURRENT_LINK_NAME};
use crate::error::{Error, Result};
use crate::path;
use crate::platform::Platform;

/// Where the distribution is installed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A local checkout, installed as a directory.
    Local(PathBuf),
    /// A versioned remote reference understood by the package manager.
    Remote(String),
}

impl PackageSource {
    /// The remote source for a release.
    pub fn remote(version: &str) -> Self {
        PackageSource::Remote(defaults::remote_package(version))
    }

    /// The argument handed to the package manager.
    pub fn spec(&self) -> String {
        match self {
            PackageSource::Local(dir) => path::normalize(&dir.to_string_lossy()),
            PackageSource::Remote(spec) => spec.clone(),
        }
    }

    /// Remote sources are fetched with the version-control tool.
    pub fn needs_vcs(&self) -> bool {
        matches!(self, PackageSource::Remote(_))
    }
}

/// The operator's request, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Release identifier, e.g. `0.1.40`.
    pub release: String,
    /// Directory name of this install under the root.
    pub install_name: String,
    /// Interpreter the isolated environment is provisioned from.
    pub interpreter: String,
    /// Top-level directory holding every install and the `current` link.
    pub install_root: String,
    /// Config file exported as `CONSTRUCT_CONFIG`, if any.
    pub config: Option<String>,
    pub source: PackageSource,
    /// Skip the reduced-privilege confirmation prompt.
    pub non_interactive: bool,
}

impl InstallRequest {
    /// Build a request. `name` defaults to the release identifier.
    ///
    /// `install_root` and `config` are normalized; callers resolve them to
    /// absolute paths first.
    pub fn new(
        release: impl Into<String>,
        name: Option<String>,
        interpreter: impl Into<String>,
        install_root: &str,
        config: Option<&str>,
        source: PackageSource,
        non_interactive: bool,
    ) -> Self {
        let release = release.into();
        let install_name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| release.clone());
        Self {
            release,
            install_name,
            interpreter: interpreter.into(),
            install_root: path::normalize(install_root),
            config: config.filter(|c| !c.is_empty()).map(path::normalize),
            source,
            non_interactive,
        }
    }
}

/// `major.minor` of an interpreter, e.g. `3.11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
}

impl InterpreterVersion {
    /// Parse `3.11`, `3.11.4` or `3.11.4+` style output.
    pub fn parse(output: &str) -> Result<Self> {
        let trimmed = output.trim();
        let mut parts = trimmed.split('.');
        let parsed = match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => major.parse().ok().zip(
                minor
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .ok(),
            ),
            _ => None,
        };
        parsed
            .map(|(major, minor)| Self { major, minor })
            .ok_or_else(|| Error::InterpreterVersion {
                output: trimmed.to_string(),
            })
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Every path the install touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// `install_root`
    pub install_root: PathBuf,
    /// `install_root/install_name`
    pub install_path: PathBuf,
    /// `install_root/current`
    pub current_link: PathBuf,
    /// Package-manager target directory: `install_path/lib`
    pub lib_dir: PathBuf,
    /// Console scripts as generated by the package manager: `lib/bin`
    pub lib_bin_dir: PathBuf,
    /// Canonical console-script directory: `install_path/bin`
    pub bin_dir: PathBuf,
    /// Isolated environment: `install_path/python`
    pub env_dir: PathBuf,
    /// Interpreter inside the environment.
    pub env_interpreter: PathBuf,
    /// Package-discovery directory inside the environment.
    pub env_site_packages: PathBuf,
}

impl InstallLayout {
    /// Derive the layout for `request` on `platform`.
    ///
    /// On POSIX the environment's site directory embeds the interpreter's
    /// `major.minor`; Windows ignores `version`.
    pub fn plan(request: &InstallRequest, platform: Platform, version: InterpreterVersion) -> Self {
        let root = path::normalize(&request.install_root);
        let install_path = path::join(&root, &[&request.install_name]);
        let lib_dir = path::join(&install_path, &["lib"]);
        let env_dir = path::join(&install_path, &["python"]);

        let (env_interpreter, env_site_packages) = match platform {
            Platform::Windows => (
                path::join(&env_dir, &["Scripts", "python.exe"]),
                path::join(&env_dir, &["Lib", "site-packages"]),
            ),
            Platform::Linux | Platform::Mac => (
                path::join(&env_dir, &["bin", "python"]),
                path::join(
                    &env_dir,
                    &["lib", &format!("python{}", version), "site-packages"],
                ),
            ),
        };

        Self {
            current_link: PathBuf::from(path::join(&root, &[CURRENT_LINK_NAME])),
            lib_bin_dir: PathBuf::from(path::join(&lib_dir, &["bin"])),
            bin_dir: PathBuf::from(path::join(&install_path, &["bin"])),
            install_root: PathBuf::from(root),
            install_path: PathBuf::from(install_path),
            lib_dir: PathBuf::from(lib_dir),
            env_dir: PathBuf::from(env_dir),
            env_interpreter: PathBuf::from(env_interpreter),
            env_site_packages: PathBuf::from(env_site_packages),
        }
    }

    /// `lib_dir` and `bin_dir` relative to the environment's site directory,
    /// as written to the path-extension marker.
    pub fn path_extension_entries(&self) -> [String; 2] {
        let site = display(&self.env_site_packages);
        [
            path::relative(&site, &display(&self.lib_dir)),
            path::relative(&site, &display(&self.bin_dir)),
        ]
    }
}

/// Forward-slash rendering of a planned path.
pub fn display(p: &Path) -> String {
    path::normalize(&p.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>) -> InstallRequest {
        InstallRequest::new(
            "1.2.3",
            name.map(str::to_string),
            "/usr/bin/python3",
            "/opt/construct",
            None,
            PackageSource::remote("1.2.3"),
            false,
        )
    }

    const PY311: InterpreterVersion = InterpreterVersion { major: 3, minor: 11 };

    #[test]
    fn test_plan_posix_layout() {
        let layout = InstallLayout::plan(&request(None), Platform::Linux, PY311);

        assert_eq!(layout.install_root, PathBuf::from("/opt/construct"));
        assert_eq!(layout.install_path, PathBuf::from("/opt/construct/1.2.3"));
        assert_eq!(layout.current_link, PathBuf::from("/opt/construct/current"));
        assert_eq!(layout.lib_dir, PathBuf::from("/opt/construct/1.2.3/lib"));
        assert_eq!(layout.lib_bin_dir, PathBuf::from("/opt/construct/1.2.3/lib/bin"));
        assert_eq!(layout.bin_dir, PathBuf::from("/opt/construct/1.2.3/bin"));
        assert_eq!(layout.env_dir, PathBuf::from("/opt/construct/1.2.3/python"));
        assert_eq!(
            layout.env_interpreter,
            PathBuf::from("/opt/construct/1.2.3/python/bin/python")
        );
        assert_eq!(
            layout.env_site_packages,
            PathBuf::from("/opt/construct/1.2.3/python/lib/python3.11/site-packages")
        );
    }

    #[test]
    fn test_plan_windows_layout() {
        let mut req = request(None);
        req.install_root = path::normalize("C:\\construct\\");
        let layout = InstallLayout::plan(&req, Platform::Windows, PY311);

        assert_eq!(layout.install_path, PathBuf::from("C:/construct/1.2.3"));
        assert_eq!(
            layout.env_interpreter,
            PathBuf::from("C:/construct/1.2.3/python/Scripts/python.exe")
        );
        assert_eq!(
            layout.env_site_packages,
            PathBuf::from("C:/construct/1.2.3/python/Lib/site-packages")
        );
    }

    #[test]
    fn test_plan_uses_install_name() {
        let layout = InstallLayout::plan(&request(Some("studio")), Platform::Mac, PY311);
        assert_eq!(layout.install_path, PathBuf::from("/opt/construct/studio"));
        assert_eq!(layout.current_link, PathBuf::from("/opt/construct/current"));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let req = request(None);
        let first = InstallLayout::plan(&req, Platform::Linux, PY311);
        let second = InstallLayout::plan(&req, Platform::Linux, PY311);
        assert_eq!(first, second);
        assert_eq!(
            first.env_site_packages.as_os_str().as_encoded_bytes(),
            second.env_site_packages.as_os_str().as_encoded_bytes()
        );
    }

    #[test]
    fn test_path_extension_entries() {
        let layout = InstallLayout::plan(&request(None), Platform::Linux, PY311);
        assert_eq!(
            layout.path_extension_entries(),
            ["../../../../lib".to_string(), "../../../../bin".to_string()]
        );

        let layout = InstallLayout::plan(&request(None), Platform::Windows, PY311);
        assert_eq!(
            layout.path_extension_entries(),
            ["../../../lib".to_string(), "../../../bin".to_string()]
        );
    }

    #[test]
    fn test_request_defaults_name_to_release() {
        let req = request(None);
        assert_eq!(req.install_name, "1.2.3");
        let req = request(Some(""));
        assert_eq!(req.install_name, "1.2.3");
    }

    #[test]
    fn test_request_normalizes_paths() {
        let req = InstallRequest::new(
            "1.2.3",
            None,
            "python3",
            "/opt/./construct/",
            Some("/studio/../etc/construct.yaml"),
            PackageSource::Local(PathBuf::from("/src/construct_setup")),
            true,
        );
        assert_eq!(req.install_root, "/opt/construct");
        assert_eq!(req.config.as_deref(), Some("/etc/construct.yaml"));
    }

    #[test]
    fn test_empty_config_is_none() {
        let req = InstallRequest::new(
            "1.2.3",
            None,
            "python3",
            "/opt/construct",
            Some(""),
            PackageSource::remote("1.2.3"),
            false,
        );
        assert_eq!(req.config, None);
    }

    #[test]
    fn test_package_source() {
        let remote = PackageSource::remote("0.1.40");
        assert!(remote.needs_vcs());
        assert!(remote.spec().ends_with("@0.1.40#egg=construct_setup"));

        let local = PackageSource::Local(PathBuf::from("/src/construct_setup/"));
        assert!(!local.needs_vcs());
        assert_eq!(local.spec(), "/src/construct_setup");
    }

    #[test]
    fn test_interpreter_version_parse() {
        assert_eq!(InterpreterVersion::parse("3.11\n").unwrap(), PY311);
        assert_eq!(
            InterpreterVersion::parse("2.7.18").unwrap(),
            InterpreterVersion { major: 2, minor: 7 }
        );
        assert_eq!(InterpreterVersion::parse("3.13t").unwrap().minor, 13);
        assert!(InterpreterVersion::parse("").is_err());
        assert!(InterpreterVersion::parse("three.eleven").is_err());
    }
}
