//! # GitHub CLI Operations
//!
//! Everything that talks to GitHub goes through the `gh` binary, which owns
//! authentication, API access and repository creation. This module only
//! builds the argument lists and interprets exit codes and output.
//!
//! Each operation comes as a pair: a `*_command` function building the
//! [`CommandSpec`], and a function running it through a [`CommandRunner`].

use std::fmt;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::params::RepoParams;
use crate::runner::{execute, CommandRunner, CommandSpec};

/// jq filter printing `owner/name` for `gh repo view`.
const FULL_NAME_FILTER: &str = r#".owner.login + "/" + .name"#;

pub fn auth_status_command() -> CommandSpec {
    CommandSpec::new("gh", ["auth", "status"])
}

/// Check that the GitHub CLI has a logged-in account.
///
/// A non-zero exit from `gh auth status` becomes [`Error::NotAuthenticated`]
/// wrapping the failed command; a missing `gh` binary stays a launch error.
pub fn check_auth(runner: &dyn CommandRunner) -> Result<()> {
    match execute(runner, &auth_status_command()) {
        Ok(_) => Ok(()),
        Err(err @ Error::CommandFailed { .. }) => {
            debug!("gh auth status failed: {}", err);
            Err(Error::NotAuthenticated {
                source: Box::new(err),
            })
        }
        Err(err) => Err(err),
    }
}

/// `gh repo create` for the resolved parameters.
///
/// `--clone` makes gh clone the new repository into `<base>/<repo_name>`.
pub fn create_repo_command(params: &RepoParams, base_dir: &Path) -> CommandSpec {
    CommandSpec::new(
        "gh",
        [
            "repo".to_string(),
            "create".to_string(),
            params.repo_name.clone(),
            params.visibility.as_flag(),
            "--description".to_string(),
            params.description.clone(),
            "--clone".to_string(),
            "--disable-wiki".to_string(),
        ],
    )
    .in_dir(base_dir)
}

pub fn create_repo(runner: &dyn CommandRunner, params: &RepoParams, base_dir: &Path) -> Result<()> {
    execute(runner, &create_repo_command(params, base_dir)).map(|_| ())
}

/// Turn off projects and delete head branches after merge.
pub fn edit_settings_command(repo_dir: &Path) -> CommandSpec {
    CommandSpec::new(
        "gh",
        ["repo", "edit", "--enable-projects=false", "--delete-branch-on-merge"],
    )
    .in_dir(repo_dir)
}

pub fn configure_settings(runner: &dyn CommandRunner, repo_dir: &Path) -> Result<()> {
    execute(runner, &edit_settings_command(repo_dir)).map(|_| ())
}

/// `owner/name` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFullName {
    pub owner: String,
    pub name: String,
}

impl RepoFullName {
    /// Parse `gh repo view` output of the form `owner/name`.
    pub fn parse(text: &str) -> Option<Self> {
        let (owner, name) = text.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

pub fn view_full_name_command(repo_dir: &Path) -> CommandSpec {
    CommandSpec::new(
        "gh",
        ["repo", "view", "--json", "owner,name", "-q", FULL_NAME_FILTER],
    )
    .in_dir(repo_dir)
}

/// Look up the owner and name of the repository checked out in `repo_dir`.
pub fn view_full_name(runner: &dyn CommandRunner, repo_dir: &Path) -> Result<RepoFullName> {
    let spec = view_full_name_command(repo_dir);
    let output = execute(runner, &spec)?;
    RepoFullName::parse(&output.stdout).ok_or_else(|| Error::UnexpectedOutput {
        command: spec.command_line(),
        message: format!("expected 'owner/name', got '{}'", output.stdout.trim()),
    })
}

/// Review requirements of a protected branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestReviews {
    pub required_approving_review_count: u32,
}

/// Body of `PUT repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// `None` fields serialize as `null`, which the API reads as "disabled".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchProtection {
    pub required_status_checks: Option<serde_json::Value>,
    pub enforce_admins: bool,
    pub required_pull_request_reviews: Option<PullRequestReviews>,
    pub restrictions: Option<serde_json::Value>,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
}

impl Default for BranchProtection {
    /// One approving review, no force pushes or deletions, admins included.
    fn default() -> Self {
        Self {
            required_status_checks: None,
            enforce_admins: false,
            required_pull_request_reviews: Some(PullRequestReviews {
                required_approving_review_count: 1,
            }),
            restrictions: None,
            allow_force_pushes: false,
            allow_deletions: false,
        }
    }
}

impl BranchProtection {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `gh api ... --method PUT --input -` with the payload on stdin.
pub fn branch_protection_command(
    repo_dir: &Path,
    repo: &RepoFullName,
    branch: &str,
    payload: String,
) -> CommandSpec {
    CommandSpec::new(
        "gh",
        [
            "api".to_string(),
            format!(
                "repos/{}/{}/branches/{}/protection",
                repo.owner, repo.name, branch
            ),
            "--method".to_string(),
            "PUT".to_string(),
            "--input".to_string(),
            "-".to_string(),
        ],
    )
    .in_dir(repo_dir)
    .with_stdin(payload)
}

/// Protect `branch` of the repository checked out in `repo_dir`.
///
/// Returns the repository the protection was applied to.
pub fn set_branch_protection(
    runner: &dyn CommandRunner,
    repo_dir: &Path,
    branch: &str,
    protection: &BranchProtection,
) -> Result<RepoFullName> {
    let repo = view_full_name(runner, repo_dir)?;
    let payload = protection.to_json()?;
    execute(
        runner,
        &branch_protection_command(repo_dir, &repo, branch, payload),
    )?;
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Visibility;
    use crate::runner::{CommandOutput, RecordingRunner};
    use std::path::PathBuf;

    fn two_sum() -> RepoParams {
        RepoParams {
            folder_name: "sandbox.two-sum".to_string(),
            repo_name: "python-challenge-two-sum".to_string(),
            description: "Two sum problem".to_string(),
            visibility: Visibility::Private,
        }
    }

    #[test]
    fn test_create_repo_command_arguments() {
        let spec = create_repo_command(&two_sum(), Path::new("/work"));
        assert_eq!(spec.program, "gh");
        assert_eq!(
            spec.args,
            vec![
                "repo",
                "create",
                "python-challenge-two-sum",
                "--private",
                "--description",
                "Two sum problem",
                "--clone",
                "--disable-wiki"
            ]
        );
        assert_eq!(spec.cwd, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_edit_settings_runs_inside_repo() {
        let spec = edit_settings_command(Path::new("/work/demo"));
        assert_eq!(
            spec.command_line(),
            "gh repo edit --enable-projects=false --delete-branch-on-merge"
        );
        assert_eq!(spec.cwd, Some(PathBuf::from("/work/demo")));
    }

    #[test]
    fn test_check_auth_maps_failure_to_not_authenticated() {
        let runner = RecordingRunner::new().respond(
            "gh auth status",
            CommandOutput::failed(1, "You are not logged into any GitHub hosts"),
        );
        let err = check_auth(&runner).unwrap_err();
        match err {
            Error::NotAuthenticated { source } => match *source {
                Error::CommandFailed { command, stderr, .. } => {
                    assert_eq!(command, "gh auth status");
                    assert_eq!(stderr, "You are not logged into any GitHub hosts");
                }
                other => panic!("unexpected source: {other}"),
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_auth_success() {
        let runner = RecordingRunner::new();
        assert!(check_auth(&runner).is_ok());
        assert_eq!(runner.command_lines(), vec!["gh auth status"]);
    }

    #[test]
    fn test_parse_full_name() {
        assert_eq!(
            RepoFullName::parse("octocat/python-challenge-two-sum\n"),
            Some(RepoFullName {
                owner: "octocat".to_string(),
                name: "python-challenge-two-sum".to_string(),
            })
        );
        assert_eq!(RepoFullName::parse(""), None);
        assert_eq!(RepoFullName::parse("octocat"), None);
        assert_eq!(RepoFullName::parse("/name"), None);
        assert_eq!(RepoFullName::parse("a/b/c"), None);
    }

    #[test]
    fn test_view_full_name_rejects_garbage() {
        let runner = RecordingRunner::new().respond("gh repo view", CommandOutput::ok("nonsense"));
        let err = view_full_name(&runner, Path::new("demo")).unwrap_err();
        assert!(matches!(err, Error::UnexpectedOutput { .. }));
    }

    #[test]
    fn test_default_protection_payload() {
        let json = BranchProtection::default().to_json().unwrap();
        insta::assert_snapshot!(json, @r#"{"required_status_checks":null,"enforce_admins":false,"required_pull_request_reviews":{"required_approving_review_count":1},"restrictions":null,"allow_force_pushes":false,"allow_deletions":false}"#);
    }

    #[test]
    fn test_set_branch_protection_sends_payload_on_stdin() {
        let runner = RecordingRunner::new()
            .respond("gh repo view", CommandOutput::ok("octocat/demo\n"));
        let repo = set_branch_protection(
            &runner,
            Path::new("/work/demo"),
            "main",
            &BranchProtection::default(),
        )
        .unwrap();
        assert_eq!(repo.to_string(), "octocat/demo");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].command_line(),
            r#"gh repo view --json owner,name -q .owner.login + "/" + .name"#
        );
        assert_eq!(
            calls[1].command_line(),
            "gh api repos/octocat/demo/branches/main/protection --method PUT --input -"
        );
        let payload: serde_json::Value =
            serde_json::from_str(calls[1].stdin.as_deref().unwrap()).unwrap();
        assert_eq!(
            payload["required_pull_request_reviews"]["required_approving_review_count"],
            1
        );
        assert!(payload["restrictions"].is_null());
    }

    #[test]
    fn test_set_branch_protection_stops_when_lookup_fails() {
        let runner = RecordingRunner::new().fail_on("gh repo view");
        assert!(set_branch_protection(
            &runner,
            Path::new("demo"),
            "main",
            &BranchProtection::default()
        )
        .is_err());
        assert_eq!(runner.calls().len(), 1);
    }
}
