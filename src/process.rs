//! External command model.
//!
//! Every tool invocation is described by a [`ToolCommand`] first, logged in a shell-like
//! form, and only then executed. Execution never returns an error: a tool that cannot be
//! launched or exits non-zero yields a [`ToolOutcome`] that callers record and move on.

use log::{debug, info, warn};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A fully assembled external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Absolute path to the executable
    pub program: PathBuf,
    /// Arguments, passed to the program without shell interpretation
    pub args: Vec<OsString>,
    /// Working directory, if different from the current one
    pub cwd: Option<PathBuf>,
}

/// What happened when a [`ToolCommand`] ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool exited with status 0
    Success { stdout: String, stderr: String },
    /// The tool ran but exited with a non-zero (or no) status code
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The tool could not be started
    LaunchError(String),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success { .. })
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutcome::Success { .. } => write!(f, "success"),
            ToolOutcome::Failed { code: Some(code), .. } => write!(f, "exit code {}", code),
            ToolOutcome::Failed { code: None, .. } => write!(f, "terminated by signal"),
            ToolOutcome::LaunchError(message) => write!(f, "failed to launch: {}", message),
        }
    }
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Name used in log lines, i.e. the executable's file name.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Runs the command with stdout and stderr forwarded to this process.
    pub fn run_inherited(&self) -> ToolOutcome {
        info!("executing: {}", self);
        match self.command().status() {
            Ok(status) if status.success() => ToolOutcome::Success {
                stdout: String::new(),
                stderr: String::new(),
            },
            Ok(status) => ToolOutcome::Failed {
                code: status.code(),
                stdout: String::new(),
                stderr: String::new(),
            },
            Err(e) => ToolOutcome::LaunchError(e.to_string()),
        }
    }

    /// Runs the command, capturing stdout and stderr and logging both once it exits.
    pub fn run_captured(&self) -> ToolOutcome {
        info!("executing: {}", self);
        let mut command = self.command();
        command.stdin(Stdio::null());

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => return ToolOutcome::LaunchError(e.to_string()),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let name = self.tool_name();
        if !stdout.trim().is_empty() {
            info!("{} output:\n{}", name, stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            info!("{} error:\n{}", name, stderr.trim_end());
        }

        if output.status.success() {
            ToolOutcome::Success { stdout, stderr }
        } else {
            ToolOutcome::Failed {
                code: output.status.code(),
                stdout,
                stderr,
            }
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            debug!("in directory {}", dir.display());
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|word| word.to_string_lossy().to_string())
            .collect();
        write!(f, "{}", shell_words::join(&words))
    }
}

/// Runs `command` and, if it did not succeed, logs a warning and returns a failure line.
pub fn run_best_effort(command: &ToolCommand, capture: bool) -> Option<String> {
    let outcome = if capture {
        command.run_captured()
    } else {
        command.run_inherited()
    };

    if outcome.is_success() {
        None
    } else {
        let failure = format!("{}: {}", command.tool_name(), outcome);
        warn!("Fail to call {} ({})", command.program.display(), outcome);
        Some(failure)
    }
}
