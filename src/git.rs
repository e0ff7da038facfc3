use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::runner::{execute, CommandRunner, CommandSpec};

/// Append the description to the README of a fresh clone
///
/// The file is created when the clone has none. The description is written
/// followed by a newline, without touching existing content.
pub fn append_readme(repo_dir: &Path, readme: &str, description: &str) -> Result<PathBuf, Error> {
    let path = repo_dir.join(readme);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{}", description)?;
    Ok(path)
}

pub fn add_command(repo_dir: &Path, file: &str) -> CommandSpec {
    CommandSpec::new("git", ["add", file]).in_dir(repo_dir)
}

pub fn commit_command(repo_dir: &Path, message: &str) -> CommandSpec {
    CommandSpec::new("git", ["commit", "-m", message]).in_dir(repo_dir)
}

/// Force-rename the current branch (`git branch -M`)
pub fn rename_branch_command(repo_dir: &Path, branch: &str) -> CommandSpec {
    CommandSpec::new("git", ["branch", "-M", branch]).in_dir(repo_dir)
}

pub fn push_command(repo_dir: &Path, branch: &str) -> CommandSpec {
    CommandSpec::new("git", ["push", "origin", branch]).in_dir(repo_dir)
}

/// Stage a file in the local repository
pub fn add(runner: &dyn CommandRunner, repo_dir: &Path, file: &str) -> Result<(), Error> {
    execute(runner, &add_command(repo_dir, file)).map(|_| ())
}

/// Record the staged changes as a commit
pub fn commit(runner: &dyn CommandRunner, repo_dir: &Path, message: &str) -> Result<(), Error> {
    execute(runner, &commit_command(repo_dir, message)).map(|_| ())
}

pub fn rename_branch(runner: &dyn CommandRunner, repo_dir: &Path, branch: &str) -> Result<(), Error> {
    execute(runner, &rename_branch_command(repo_dir, branch)).map(|_| ())
}

/// Push `branch` to `origin`
///
/// This uses the system git command, so whatever credentials gh configured
/// for the clone (credential helper or SSH) are picked up automatically.
pub fn push(runner: &dyn CommandRunner, repo_dir: &Path, branch: &str) -> Result<(), Error> {
    execute(runner, &push_command(repo_dir, branch)).map(|_| ())
}
