//! Launcher shim scripts shipped with the installer.
//!
//! The scripts are compiled in from `resources/bin`, so the installer binary
//! is self-contained. Each launcher may be materialized under extra names so
//! the same entry point answers to both `construct` and `cons`.

/// A launcher script and every filename it is installed under.
#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    /// Primary filename.
    pub name: &'static str,
    /// Additional filenames receiving the same contents.
    pub aliases: &'static [&'static str],
    pub contents: &'static str,
    /// Whether the file should be marked executable on POSIX hosts.
    pub executable: bool,
}

impl Launcher {
    /// Primary name followed by aliases.
    pub fn filenames(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Batch, PowerShell and POSIX shell launchers.
pub const LAUNCHERS: &[Launcher] = &[
    Launcher {
        name: "construct.bat",
        aliases: &["cons.bat"],
        contents: include_str!("../resources/bin/construct.bat"),
        executable: false,
    },
    Launcher {
        name: "construct.ps1",
        aliases: &["cons.ps1"],
        contents: include_str!("../resources/bin/construct.ps1"),
        executable: false,
    },
    Launcher {
        name: "construct.sh",
        aliases: &[],
        contents: include_str!("../resources/bin/construct.sh"),
        executable: true,
    },
];

/// Name of the shell-integration script the POSIX profile sources.
pub const SHELL_INTEGRATION: &str = "construct.sh";
