use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::error::ToolError;

/// A command line for an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Launch a .NET executable, through `clr_host` when one is given.
    pub fn dotnet(exe: &Path, clr_host: Option<&str>) -> Self {
        match clr_host {
            Some(host) => Self::new(host).arg(exe),
            None => Self::new(exe),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external processes to completion.
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ToolError>;
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ToolError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: command.program.to_string_lossy().into_owned(),
                source,
            })?;
        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `command`, log what it printed and turn a non-zero exit into an error.
pub fn run_checked(runner: &dyn CommandRunner, command: &ToolCommand) -> Result<ToolOutput, ToolError> {
    info!("running {command}");
    let output = runner.run(command)?;

    for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
        info!("  {line}");
    }
    for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
        warn!("  {line}");
    }

    if !output.success {
        return Err(ToolError::ProcessFailed {
            command: command.to_string(),
            code: output.code,
        });
    }
    Ok(output)
}
