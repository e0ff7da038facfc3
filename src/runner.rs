//! # Command Runner
//!
//! The only boundary between gh-repo-init and the outside world. Every `gh`,
//! `git` and `mv` invocation is described as a [`CommandSpec`] and handed to a
//! [`CommandRunner`].
//!
//! ## Implementations
//!
//! - [`SystemRunner`]: spawns the real process with `std::process::Command`,
//!   capturing stdout/stderr and piping an optional stdin payload.
//! - [`DryRunRunner`]: prints what would run through the
//!   [`Reporter`](crate::output::Reporter) and reports success.
//! - [`RecordingRunner`]: records every spec and fails the ones it was told
//!   to fail. Used to check call sequences without touching the system.
//!
//! Runners only report what happened. Turning a non-zero exit into an error
//! is done by [`execute`], which is what the workflow uses: it needs the
//! failure itself to wrap it with the step that failed.
//!
//! [`succeeds`] is the entry point for callers that only want a yes/no
//! answer. It prints the same diagnostic the workflow prints (command,
//! error, stderr, stdout) and returns `false` on any failure.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::output::Reporter;

/// One external command: program, arguments, working directory and stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Directory to run in; the process cwd when `None`
    pub cwd: Option<PathBuf>,
    /// Payload written to the child's stdin
    pub stdin: Option<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            stdin: None,
        }
    }

    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Program and arguments joined with spaces, for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero-exit output carrying `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands.
///
/// `run` returns `Err` only when the process could not be started; a process
/// that ran and failed is an `Ok` output with a non-zero code.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Run `spec`, treating a non-zero exit as [`Error::CommandFailed`].
pub fn execute(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<CommandOutput> {
    let output = runner.run(spec)?;
    if output.success() {
        Ok(output)
    } else {
        Err(Error::CommandFailed {
            command: spec.command_line(),
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Run `spec` and report only whether it exited with code 0.
///
/// Failures are not swallowed silently: the command, the error and any
/// captured stderr/stdout are written to stderr before returning `false`.
pub fn succeeds(runner: &dyn CommandRunner, spec: &CommandSpec) -> bool {
    match execute(runner, spec) {
        Ok(_) => true,
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            false
        }
    }
}

/// Multi-line description of a failed command: the command line, the error
/// and any captured stderr/stdout.
pub fn diagnostic(err: &Error) -> String {
    let mut lines = Vec::new();
    match err {
        Error::CommandFailed {
            command,
            stdout,
            stderr,
            ..
        } => {
            lines.push(format!("Failed to run command: {}", command));
            lines.push(format!("Error: {}", err));
            if !stderr.trim().is_empty() {
                lines.push(format!("STDERR: {}", stderr.trim_end()));
            }
            if !stdout.trim().is_empty() {
                lines.push(format!("STDOUT: {}", stdout.trim_end()));
            }
        }
        Error::CommandLaunch { command, .. } => {
            lines.push(format!("Unexpected error while running command: {}", command));
            lines.push(format!("Error: {}", err));
        }
        other => lines.push(format!("Error: {}", other)),
    }
    lines.join("\n")
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!(
            "running `{}` in {}",
            spec.command_line(),
            spec.cwd
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );

        let launch_error = |source: std::io::Error| Error::CommandLaunch {
            command: spec.command_line(),
            source,
        };

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(launch_error)?;

        if let Some(input) = &spec.stdin {
            // Dropping the handle closes the pipe so the child sees EOF.
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input.as_bytes()).map_err(launch_error)?;
            }
        }

        let output = child.wait_with_output().map_err(launch_error)?;
        debug!("`{}` exited with {:?}", spec.command_line(), output.status.code());

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Prints commands instead of running them.
///
/// Output goes through the [`Reporter`], so `--quiet` silences it too.
#[derive(Debug, Clone)]
pub struct DryRunRunner {
    reporter: Reporter,
}

impl DryRunRunner {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    fn describe(spec: &CommandSpec) -> String {
        match &spec.cwd {
            Some(dir) => format!("   would run: {} (in {})", spec, dir.display()),
            None => format!("   would run: {}", spec),
        }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.reporter.info(&Self::describe(spec));
        // Later steps parse the owner/name lookup, so give them a placeholder.
        if spec.program == "gh" && spec.args.starts_with(&["repo".to_string(), "view".to_string()]) {
            return Ok(CommandOutput::ok("OWNER/REPO\n"));
        }
        Ok(CommandOutput::ok(String::new()))
    }
}

/// Records every command and answers from a script.
///
/// Commands succeed with empty output unless a response was registered for
/// a command line starting with a given prefix; the first matching prefix
/// wins.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    responses: Vec<(String, CommandOutput)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands whose command line starts with `prefix` with `output`.
    pub fn respond(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.responses.push((prefix.to_string(), output));
        self
    }

    /// Make commands starting with `prefix` exit with code 1.
    pub fn fail_on(self, prefix: &str) -> Self {
        self.respond(prefix, CommandOutput::failed(1, format!("{} failed", prefix)))
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Command lines of every recorded call, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::command_line).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.command_line();
        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::ok(String::new()));
        Ok(output)
    }
}
