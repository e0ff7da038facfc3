//! # gh-repo-init Library
//!
//! Creates a GitHub repository and bootstraps its local checkout by driving
//! the `gh` and `git` command-line tools. The binary is a thin wrapper; all
//! behavior lives here so it can be exercised without spawning processes.
//!
//! ## Quick Example
//!
//! ```
//! use gh_repo_init::output::Reporter;
//! use gh_repo_init::params::RepoParams;
//! use gh_repo_init::runner::RecordingRunner;
//! use gh_repo_init::workflow::{Options, Workflow};
//!
//! let params = RepoParams::resolve(
//!     Some("sandbox.two-sum"),
//!     Some("two sum problem"),
//!     Some("private"),
//!     "python-challenge-",
//! )
//! .unwrap();
//! assert_eq!(params.repo_name, "python-challenge-two-sum");
//! assert_eq!(params.description, "Two sum problem");
//!
//! // Record the commands instead of running them; the README write is skipped.
//! let runner = RecordingRunner::new();
//! let reporter = Reporter::silent();
//! let options = Options { dry_run: true, ..Options::default() };
//! Workflow::new(&runner, &reporter, options).run(&params).unwrap();
//! assert_eq!(
//!     runner.command_lines().last().unwrap(),
//!     "mv python-challenge-two-sum sandbox.two-sum"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Parameters (`params`)**: normalizes folder name, repository name,
//!   description and visibility from the raw flags.
//! - **Command Runner (`runner`)**: the single boundary to external
//!   processes, with real, dry-run and recording implementations.
//! - **GitHub and Git (`github`, `git`)**: argument lists for the `gh` and
//!   `git` invocations, plus the README write.
//! - **Workflow (`workflow`)**: the fail-fast sequence of steps.
//! - **Configuration (`config`, `defaults`)**: optional YAML defaults and
//!   built-in values.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod params;
pub mod runner;
pub mod workflow;

#[cfg(test)]
mod params_proptest;
