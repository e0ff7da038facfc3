//! Default values for gh-repo-init configuration.
//!
//! This module provides centralized default values used across the resolver,
//! the orchestrator and the configuration layer.

use std::path::PathBuf;

/// Prefix prepended to every derived repository name.
pub const REPO_PREFIX: &str = "python-challenge-";

/// Branch the initial commit is pushed to.
pub const BRANCH: &str = "main";

/// File the description is appended to before the initial commit.
pub const README_FILE: &str = "README.md";

/// Message of the initial commit.
pub const COMMIT_MESSAGE: &str = "Initial commit";

/// Visibility used when none is given.
pub const VISIBILITY: &str = "public";

/// Returns the default configuration file path.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/gh-repo-init/config.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/gh-repo-init/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\gh-repo-init\config.yaml`
///
/// Returns `None` when the platform config directory cannot be determined.
/// Overridden by the `--config` flag or the `GH_REPO_INIT_CONFIG`
/// environment variable.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gh-repo-init").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("gh-repo-init/config.yaml"));
        }
    }

    #[test]
    fn test_prefix_ends_with_separator() {
        assert!(REPO_PREFIX.ends_with('-'));
    }
}
