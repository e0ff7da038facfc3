//! # Error Handling
//!
//! This module defines the centralized error type for `gh-repo-init`. It uses
//! `thiserror` to describe every failure the library can report, from bad
//! invocation parameters to external commands exiting non-zero.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. Variants carry the context
//!   needed to print a useful diagnostic (the folder name that failed to
//!   parse, the command line that failed, captured stderr/stdout).
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Command failures are deliberately split in two:
//!
//! - `CommandLaunch` when the process could not be started at all (binary
//!   missing from `PATH`, permission denied).
//! - `CommandFailed` when the process ran and exited with a non-zero status.
//!
//! The orchestrator wraps whichever error stopped the pipeline in
//! `Error::Step`, so the final message names the stage that failed.

use thiserror::Error;

use crate::workflow::Step;

/// Main error type for gh-repo-init operations
#[derive(Error, Debug)]
pub enum Error {
    /// The folder name does not have the `<group>.<name>` shape the repo name
    /// is derived from.
    #[error("Invalid folder name '{folder}': {message}")]
    InvalidFolderName { folder: String, message: String },

    /// The derived repository name contains characters GitHub rejects.
    #[error("Invalid repository name '{name}': {message}")]
    InvalidRepoName { name: String, message: String },

    /// The visibility flag is not one `gh repo create` understands.
    #[error("Invalid repository visibility '{value}' (expected public, private or internal)")]
    InvalidVisibility { value: String },

    /// An error occurred while parsing the YAML configuration file.
    #[error("Configuration parsing error in {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// An external command could not be started.
    #[error("Failed to launch `{command}`: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command ran and exited with a non-zero status.
    #[error("Command `{command}` failed ({}){}", describe_exit(.code), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// An external command succeeded but printed something we cannot use.
    #[error("Unexpected output from `{command}`: {message}")]
    UnexpectedOutput { command: String, message: String },

    /// `gh auth status` exited non-zero. The source keeps its output, which
    /// tells an expired token apart from a network failure.
    #[error("Not logged into the GitHub CLI; run `gh auth login` first")]
    NotAuthenticated {
        #[source]
        source: Box<Error>,
    },

    /// A pipeline step failed; later steps were not run.
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<Error>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The pipeline step this error was raised in, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Error::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The error wrapped by [`Error::Step`], if this is one.
    pub fn step_source(&self) -> Option<&Error> {
        match self {
            Error::Step { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
