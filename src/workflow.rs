//! Orchestrator for creating and bootstrapping a repository
//!
//! Runs the steps in a fixed order and stops at the first failure:
//!
//! 1. Check that the GitHub CLI is authenticated
//! 2. Create the remote repository and clone it
//! 3. Configure repository settings
//! 4. Initialize the local repository (README, add, commit, branch, push)
//! 5. Optionally protect the default branch
//! 6. Rename the clone to the requested folder name
//!
//! Nothing is rolled back: when a step after creation fails, the remote
//! repository stays on GitHub.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::defaults;
use crate::error::{Error, Result};
use crate::git;
use crate::github::{self, BranchProtection};
use crate::output::Reporter;
use crate::params::RepoParams;
use crate::runner::{diagnostic, execute, CommandRunner, CommandSpec};

/// A stage of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CheckAuth,
    CreateRemoteRepo,
    ConfigureSettings,
    WriteReadme,
    StageReadme,
    Commit,
    RenameBranch,
    Push,
    ProtectBranch,
    RenameFolder,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CheckAuth => "Check GitHub CLI authentication",
            Step::CreateRemoteRepo => "Create remote repository",
            Step::ConfigureSettings => "Configure repository settings",
            Step::WriteReadme => "Write README",
            Step::StageReadme => "Stage README",
            Step::Commit => "Initial commit",
            Step::RenameBranch => "Rename branch",
            Step::Push => "Push to remote",
            Step::ProtectBranch => "Set branch protection",
            Step::RenameFolder => "Rename folder",
        };
        f.write_str(name)
    }
}

/// Knobs that are not part of the repository parameters.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory the repository is cloned into
    pub base_dir: PathBuf,
    pub branch: String,
    pub readme: String,
    pub commit_message: String,
    pub protect_branch: bool,
    /// Skip filesystem writes; commands still go to the runner
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            branch: defaults::BRANCH.to_string(),
            readme: defaults::README_FILE.to_string(),
            commit_message: defaults::COMMIT_MESSAGE.to_string(),
            protect_branch: false,
            dry_run: false,
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Steps that completed, in order
    pub completed: Vec<Step>,
    /// Final location of the local repository
    pub folder: PathBuf,
    /// Non-fatal problems (branch protection)
    pub warnings: Vec<String>,
}

/// `mv <repo_name> <folder_name>`, run from the base directory.
pub fn rename_folder_command(base_dir: &Path, from: &str, to: &str) -> CommandSpec {
    CommandSpec::new("mv", [from, to]).in_dir(base_dir)
}

pub struct Workflow<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a Reporter,
    options: Options,
}

impl<'a> Workflow<'a> {
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a Reporter, options: Options) -> Self {
        Self {
            runner,
            reporter,
            options,
        }
    }

    /// Run every step for `params`, stopping at the first failure.
    pub fn run(&self, params: &RepoParams) -> Result<RunReport> {
        let repo_dir = self.options.base_dir.join(&params.repo_name);
        let mut report = RunReport {
            completed: Vec::new(),
            folder: repo_dir.clone(),
            warnings: Vec::new(),
        };
        info!(
            "creating {} ({}) in {}",
            params.repo_name,
            params.visibility,
            self.options.base_dir.display()
        );

        self.reporter
            .start("Checking if user is logged to GitHub cli tool...");
        self.step(&mut report, Step::CheckAuth, || github::check_auth(self.runner))
            .inspect_err(|err| {
                if matches!(err.step_source(), Some(Error::NotAuthenticated { .. })) {
                    self.reporter.failure(
                        "You are NOT logged into GitHub CLI. Log via gh first and try again",
                    );
                }
            })?;
        self.reporter
            .success("You are logged into GitHub CLI. Continuing...");

        self.reporter.start(&format!(
            "Creating GitHub Repo for {} with visibility as {} and description as '{}'",
            params.repo_name, params.visibility, params.description
        ));
        self.step(&mut report, Step::CreateRemoteRepo, || {
            github::create_repo(self.runner, params, &self.options.base_dir)
        })?;

        self.reporter.start(&format!(
            "Configuring basic repo settings for {}",
            params.repo_name
        ));
        self.step(&mut report, Step::ConfigureSettings, || {
            github::configure_settings(self.runner, &repo_dir)
        })?;
        self.reporter.success("Repository updated successfully");

        self.init_local_repo(&mut report, &repo_dir, &params.description)?;

        if self.options.protect_branch {
            self.protect_branch(&mut report, &repo_dir, &params.repo_name);
        }

        self.reporter.start(&format!(
            "Renaming folder from {} to {}",
            params.repo_name, params.folder_name
        ));
        self.step(&mut report, Step::RenameFolder, || {
            execute(
                self.runner,
                &rename_folder_command(
                    &self.options.base_dir,
                    &params.repo_name,
                    &params.folder_name,
                ),
            )
            .map(|_| ())
        })?;
        report.folder = self.options.base_dir.join(&params.folder_name);

        self.reporter.success("Done");
        Ok(report)
    }

    fn init_local_repo(&self, report: &mut RunReport, repo_dir: &Path, description: &str) -> Result<()> {
        let readme = self.options.readme.as_str();
        let branch = self.options.branch.as_str();

        self.step(report, Step::WriteReadme, || {
            if self.options.dry_run {
                self.reporter.info(&format!(
                    "   would append description to {}",
                    repo_dir.join(readme).display()
                ));
                Ok(())
            } else {
                git::append_readme(repo_dir, readme, description).map(|_| ())
            }
        })?;
        self.reporter
            .success(&format!("{} has been initialized", readme));

        self.step(report, Step::StageReadme, || {
            git::add(self.runner, repo_dir, readme)
        })?;
        self.reporter
            .success(&format!("{} has been added to the repo", readme));

        self.step(report, Step::Commit, || {
            git::commit(self.runner, repo_dir, &self.options.commit_message)
        })?;
        self.reporter.success("Initial commit has been completed");

        self.step(report, Step::RenameBranch, || {
            git::rename_branch(self.runner, repo_dir, branch)
        })?;
        self.reporter
            .success(&format!("Branch has been set to {}", branch));

        self.step(report, Step::Push, || git::push(self.runner, repo_dir, branch))?;
        self.reporter.success("Commit has been pushed to remote");

        Ok(())
    }

    /// Failures here are warnings: the repository is usable without it.
    fn protect_branch(&self, report: &mut RunReport, repo_dir: &Path, repo_name: &str) {
        self.reporter
            .start(&format!("Setting branch protection for {}", repo_name));
        match github::set_branch_protection(
            self.runner,
            repo_dir,
            &self.options.branch,
            &BranchProtection::default(),
        ) {
            Ok(full_name) => {
                report.completed.push(Step::ProtectBranch);
                self.reporter.success(&format!(
                    "Branch protection updated successfully for {}",
                    full_name
                ));
            }
            Err(err) => {
                warn!("branch protection for {} failed: {}", repo_name, err);
                self.reporter
                    .warn(&format!("Failed to update branch protection: {}", err));
                report.warnings.push(err.to_string());
            }
        }
    }

    fn step<F>(&self, report: &mut RunReport, step: Step, action: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        match action() {
            Ok(()) => {
                report.completed.push(step);
                Ok(())
            }
            Err(source) => {
                if let Some(command_error) = failed_command(&source) {
                    eprintln!("{}", diagnostic(command_error));
                }
                if !matches!(source, Error::NotAuthenticated { .. }) {
                    self.reporter.failure(&format!("{} failed", step));
                }
                Err(Error::Step {
                    step,
                    source: Box::new(source),
                })
            }
        }
    }
}

/// The external command failure behind `err`, if there is one.
fn failed_command(err: &Error) -> Option<&Error> {
    match err {
        Error::CommandFailed { .. } | Error::CommandLaunch { .. } => Some(err),
        Error::NotAuthenticated { source } => Some(source.as_ref()),
        _ => None,
    }
}
