//! CLI argument parsing and logging setup

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use construct_setup::output::OutputConfig;

use crate::commands;

/// Construct Setup - Install construct into an isolated, versioned directory
#[derive(Parser, Debug)]
#[command(name = "construct-setup")]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    #[command(flatten)]
    install: commands::install::InstallArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,
}

impl Cli {
    /// Execute the install
    pub fn execute(self) -> Result<()> {
        init_logging(self.install.debug);
        let output = OutputConfig::from_env_and_flag(&self.color);
        commands::install::execute(self.install, output)
    }
}

/// Diagnostics go to stderr as `LEVEL    | message`. `RUST_LOG` takes
/// precedence over `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "{:<8} | {}", record.level(), record.args()))
        .init();
}
