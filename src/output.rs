//! # Output Configuration
//!
//! This module provides the user-facing progress output of the installer:
//! numbered steps, indented detail lines, and the `OK!` marker printed when a
//! step completes. Diagnostics (warnings, debug traces, the critical failure
//! line) go through the `log` facade instead; this is the narrative the
//! operator reads.
//!
//! ## Respecting User Preferences
//!
//! Colour follows the usual conventions:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Indentation
//!
//! Indentation is owned by a [`Logger`] value rather than a process-wide
//! variable. [`Logger::indent`] returns a guard that restores the previous
//! level when dropped, so a step that fails with `?` still leaves the logger
//! where it found it.

use std::cell::{Cell, RefCell};
use std::env;
use std::fmt::Display;

use console::style;

use crate::error::Result;

const INDENT: &str = "    ";

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[derive(Debug)]
enum Target {
    Stdout,
    Memory(RefCell<Vec<String>>),
}

/// Progress reporter with scoped indentation and a step counter.
#[derive(Debug)]
pub struct Logger {
    config: OutputConfig,
    depth: Cell<usize>,
    step: Cell<usize>,
    target: Target,
}

impl Logger {
    /// A logger that prints to standard output.
    pub fn stdout(config: OutputConfig) -> Self {
        Self::with_target(config, Target::Stdout)
    }

    /// A logger that keeps every line in memory; see [`Logger::lines`].
    pub fn in_memory() -> Self {
        Self::with_target(OutputConfig::without_color(), Target::Memory(RefCell::default()))
    }

    fn with_target(config: OutputConfig, target: Target) -> Self {
        Self {
            config,
            depth: Cell::new(0),
            step: Cell::new(1),
            target,
        }
    }

    /// Print a line at the current indentation. Embedded newlines are
    /// indented too.
    pub fn line(&self, message: impl Display) {
        let prefix = INDENT.repeat(self.depth.get());
        let text = message.to_string();
        for line in text.split('\n') {
            if line.is_empty() {
                self.emit(String::new());
            } else {
                self.emit(format!("{}{}", prefix, line));
            }
        }
    }

    /// Print an empty line.
    pub fn blank(&self) {
        self.emit(String::new());
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Indent by one level until the returned guard is dropped.
    pub fn indent(&self) -> IndentGuard<'_> {
        let previous = self.depth.get();
        self.depth.set(previous + 1);
        IndentGuard {
            logger: self,
            previous,
        }
    }

    /// Run `body` one level deeper.
    pub fn with_indent<T>(&self, body: impl FnOnce() -> T) -> T {
        let _guard = self.indent();
        body()
    }

    /// Drop back to column zero, e.g. before printing a final abort banner.
    pub fn reset_indent(&self) {
        self.depth.set(0);
    }

    /// Run a numbered install step.
    ///
    /// Prints `N. title`, runs `body` indented, and prints `OK!` on success.
    /// A failure is wrapped as [`crate::error::Error::Step`] naming the title.
    /// The counter advances either way.
    pub fn step<T>(&self, title: impl Display, body: impl FnOnce() -> Result<T>) -> Result<T> {
        let title = title.to_string();
        let number = self.step.get();
        self.step.set(number + 1);

        self.blank();
        let header = format!("{}. {}", number, title);
        if self.config.use_color {
            self.line(style(header).bold());
        } else {
            self.line(header);
        }

        let result = self.with_indent(body);
        match result {
            Ok(value) => {
                self.with_indent(|| {
                    if self.config.use_color {
                        self.line(style("OK!").green());
                    } else {
                        self.line("OK!");
                    }
                });
                Ok(value)
            }
            Err(error) => Err(error.in_step(title)),
        }
    }

    /// Lines captured by an in-memory logger. Empty for a stdout logger.
    pub fn lines(&self) -> Vec<String> {
        match &self.target {
            Target::Stdout => Vec::new(),
            Target::Memory(lines) => lines.borrow().clone(),
        }
    }

    fn emit(&self, line: String) {
        match &self.target {
            Target::Stdout => println!("{}", line),
            Target::Memory(lines) => lines.borrow_mut().push(line),
        }
    }
}

/// Restores the logger's previous indentation when dropped.
#[must_use = "indentation is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct IndentGuard<'a> {
    logger: &'a Logger,
    previous: usize,
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.logger.depth.set(self.previous);
    }
}
