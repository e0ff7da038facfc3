//! # CLI Command Implementations
//!
//! - `create`: the default action. Resolves the parameters, loads the
//!   configuration file and runs the repository workflow.
//! - `completions`: prints a shell completion script for `--completions`.
//!
//! Each module exposes an `execute` function that takes the parsed arguments
//! and calls into the `gh_repo_init` library.

pub mod completions;
pub mod create;
