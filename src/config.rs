//! # Configuration File
//!
//! Optional YAML file with defaults for values that rarely change between
//! runs. Every key is optional; command-line flags and environment variables
//! take precedence over anything set here.
//!
//! ```yaml
//! prefix: python-challenge-
//! visibility: private
//! branch: main
//! commit_message: Initial commit
//! protect_branch: false
//! ```
//!
//! The file is looked up at the path given by `--config` (or
//! `GH_REPO_INIT_CONFIG`). Without one, the platform default from
//! [`crate::defaults::default_config_path`] is read when it exists.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// Values read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Prefix for derived repository names
    pub prefix: Option<String>,
    /// Visibility used when `--repo_visibility` is not given
    pub visibility: Option<String>,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
    pub protect_branch: Option<bool>,
}

/// Parse configuration YAML. `origin` is only used in error messages.
pub fn parse(yaml_content: &str, origin: &str) -> Result<FileConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse(&content, &path.display().to_string())
}

/// Load the configuration in effect.
///
/// An explicit path must exist. The default path is optional, and a missing
/// file there yields an empty configuration.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => defaults::default_config_path().filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            from_file(&path)
        }
        None => Ok(FileConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
prefix: kata-
visibility: private
branch: trunk
commit_message: Bootstrap
protect_branch: true
"#;
        let config = parse(yaml, "test").unwrap();
        assert_eq!(
            config,
            FileConfig {
                prefix: Some("kata-".to_string()),
                visibility: Some("private".to_string()),
                branch: Some("trunk".to_string()),
                commit_message: Some("Bootstrap".to_string()),
                protect_branch: Some(true),
            }
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse("branch: develop\n", "test").unwrap();
        assert_eq!(config.branch.as_deref(), Some("develop"));
        assert_eq!(config.prefix, None);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse("  \n", "test").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = parse("prefx: oops\n", "config.yaml").unwrap_err();
        match err {
            Error::ConfigParse { path, message } => {
                assert_eq!(path, "config.yaml");
                assert!(message.contains("prefx"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(parse("protect_branch: maybe\n", "test").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "prefix: kata-\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("kata-"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = load(Some(&temp_dir.path().join("nope.yaml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
