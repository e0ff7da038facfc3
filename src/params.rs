//! # Invocation Parameters
//!
//! Turns the raw command-line values into the normalized parameters the
//! pipeline runs with. Everything here is pure string handling; no external
//! command is ever started before these values resolve successfully.
//!
//! ## Derivation Rules
//!
//! - **Folder name**: lowercased.
//! - **Repo name**: the configured prefix followed by the second
//!   `.`-separated segment of the folder name (`sandbox.two-sum` becomes
//!   `python-challenge-two-sum`). Further segments are ignored.
//! - **Description**: the first character is upper-cased, the rest is kept
//!   as typed.
//! - **Visibility**: lowercased, `public` when absent.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::defaults;
use crate::error::{Error, Result};

/// Characters GitHub keeps verbatim in repository names.
const REPO_NAME_PATTERN: &str = r"^[a-z0-9._-]+$";

static REPO_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REPO_NAME_PATTERN).expect("repo name pattern is a valid regex"));

/// Who can see the remote repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    /// Visible to members of the owning enterprise.
    Internal,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        }
    }

    /// The `gh repo create` flag selecting this visibility.
    pub fn as_flag(&self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "internal" => Ok(Visibility::Internal),
            _ => Err(Error::InvalidVisibility {
                value: value.to_string(),
            }),
        }
    }
}

/// Normalized parameters for one run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoParams {
    /// Local folder the clone ends up in
    pub folder_name: String,
    /// Name of the GitHub repository (and of the initial clone directory)
    pub repo_name: String,
    pub description: String,
    pub visibility: Visibility,
}

impl RepoParams {
    /// Resolve raw flag values into run parameters.
    ///
    /// A missing folder name is treated like an empty one and therefore
    /// rejected, since no repository name can be derived from it.
    pub fn resolve(
        folder_name: Option<&str>,
        description: Option<&str>,
        visibility: Option<&str>,
        prefix: &str,
    ) -> Result<Self> {
        let folder_name = folder_name.unwrap_or_default().to_lowercase();
        let repo_name = derive_repo_name(&folder_name, prefix)?;
        let description = capitalize_first(description.unwrap_or_default());
        let visibility = visibility
            .unwrap_or(defaults::VISIBILITY)
            .parse::<Visibility>()?;

        Ok(Self {
            folder_name,
            repo_name,
            description,
            visibility,
        })
    }
}

/// Derive the repository name from a `<group>.<name>` folder name.
///
/// The result must pass [`validate_repo_name`]. `gh` silently rewrites other
/// characters (`two sum` becomes `two-sum`), after which the clone would not
/// be found under the derived name, so such folder names are rejected here
/// instead of failing halfway through the run.
pub fn derive_repo_name(folder_name: &str, prefix: &str) -> Result<String> {
    let segment = folder_name
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::InvalidFolderName {
            folder: folder_name.to_string(),
            message: "expected the form '<group>.<name>' (no '.' found)".to_string(),
        })?;

    if segment.is_empty() {
        return Err(Error::InvalidFolderName {
            folder: folder_name.to_string(),
            message: "the segment after the first '.' is empty".to_string(),
        });
    }

    let repo_name = format!("{}{}", prefix, segment.to_lowercase());
    validate_repo_name(&repo_name)?;
    Ok(repo_name)
}

/// Check that a repository name only uses characters GitHub keeps as-is.
pub fn validate_repo_name(name: &str) -> Result<()> {
    if REPO_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidRepoName {
            name: name.to_string(),
            message: "only lowercase letters, digits, '.', '_' and '-' are allowed".to_string(),
        })
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
