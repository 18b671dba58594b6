//! Host platform detection.

use std::fmt;

/// Operating-system family the installer runs on.
///
/// Fixed at process start; selects the activation strategy and the default
/// install root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Mac,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }

    /// Install root used when `--where` is not given.
    pub fn default_install_root(self) -> &'static str {
        match self {
            Platform::Windows => "C:/construct",
            Platform::Linux | Platform::Mac => "/opt/construct",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Mac => "Mac",
        };
        f.write_str(name)
    }
}
