//! Fakes shared by the unit tests.
//!
//! [`FakeRunner`] records every command line and, unless told otherwise,
//! simulates what the real tools would leave on disk: the environment tool
//! creates the environment directory, the package manager populates its
//! `--target` directory with a package and a console script.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;

use crate::command::{CommandLine, CommandOutput, CommandRunner};
use crate::deferred::DeferredCommandSink;
use crate::error::{Error, Result};
use crate::host::HostEnv;
use crate::output::Logger;
use crate::phases::Context;
use crate::prompt::Prompter;

type Predicate = Box<dyn Fn(&CommandLine) -> bool>;

pub(crate) struct FakeRunner {
    calls: RefCell<Vec<CommandLine>>,
    failures: Vec<Predicate>,
    registry_path: Option<String>,
}

impl FakeRunner {
    /// Every command succeeds.
    pub fn succeeding() -> Self {
        Self {
            calls: RefCell::default(),
            failures: Vec::new(),
            registry_path: None,
        }
    }

    /// Commands matching `predicate` exit with status 1.
    pub fn failing_when(mut self, predicate: impl Fn(&CommandLine) -> bool + 'static) -> Self {
        self.failures.push(Box::new(predicate));
        self
    }

    /// Value `reg query` reports for the machine `PATH`.
    pub fn with_registry_path(mut self, value: &str) -> Self {
        self.registry_path = Some(value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.borrow().clone()
    }

    pub fn command_strings(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    fn simulate(&self, command: &CommandLine) -> std::io::Result<CommandOutput> {
        let args: Vec<&str> = command.args.iter().map(String::as_str).collect();
        let mut output = CommandOutput::default();

        match args.as_slice() {
            ["-c", code] if code.contains("sys.version_info") => {
                output.stdout = "3.11\n".to_string();
            }
            ["-m", "virtualenv" | "venv", env_dir] => {
                fs::create_dir_all(Path::new(env_dir).join("bin"))?;
            }
            ["query", ..] if command.program == "reg" => {
                if let Some(value) = &self.registry_path {
                    output.stdout = format!(
                        "\r\nHKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Session Manager\\Environment\r\n    PATH    REG_EXPAND_SZ    {}\r\n\r\n",
                        value
                    );
                }
            }
            _ => {
                if let Some(target) = args.iter().find_map(|a| a.strip_prefix("--target=")) {
                    let target = Path::new(target);
                    fs::create_dir_all(target.join("construct"))?;
                    fs::write(target.join("construct").join("__init__.py"), "")?;
                    fs::create_dir_all(target.join("bin"))?;
                    fs::write(target.join("bin").join("construct"), "#!python\n")?;
                }
            }
        }
        Ok(output)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());

        if self.failures.iter().any(|fails| fails(command)) {
            return Err(Error::Command {
                command: command.to_string(),
                status: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }

        self.simulate(command).map_err(Error::from)
    }
}

/// Keeps deferred commands in memory, in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    commands: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl DeferredCommandSink for RecordingSink {
    fn append(&self, command: &str) -> Result<()> {
        self.commands.borrow_mut().push(command.to_string());
        Ok(())
    }
}

/// Replies with a fixed answer and counts how often it was asked.
#[derive(Debug)]
pub(crate) struct ScriptedPrompter {
    answer: String,
    asked: Cell<usize>,
}

impl ScriptedPrompter {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            asked: Cell::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, _question: &str) -> Result<String> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer.clone())
    }
}

pub(crate) fn host(elevated: bool) -> HostEnv {
    HostEnv {
        elevated,
        deferred_script: None,
        home: None,
    }
}

/// Owns the collaborators a [`Context`] borrows.
pub(crate) struct Harness {
    pub logger: Logger,
    pub runner: FakeRunner,
    pub sink: RecordingSink,
    pub host: HostEnv,
}

impl Harness {
    pub fn new(runner: FakeRunner, host: HostEnv) -> Self {
        Self {
            logger: Logger::in_memory(),
            runner,
            sink: RecordingSink::default(),
            host,
        }
    }

    pub fn context(&self) -> Context<'_> {
        Context::new(&self.logger, &self.runner, &self.sink, &self.host)
    }
}
