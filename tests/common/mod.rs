//! Shared test utilities for the CLI end-to-end tests.
//!
//! The binary is run against fake `gh` and `git` executables placed first on
//! `PATH`. The fakes append every invocation to a log file so tests can
//! assert on the exact command sequence, and fail on demand through the
//! `FAKE_GH_FAIL` / `FAKE_GIT_FAIL` environment variables.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new();
//!     fixture.command().args(["-f", "a.b"]).assert().success();
//!     assert_eq!(fixture.calls()[0], "gh auth status");
//! }
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Fake `gh`: logs, optionally fails, and imitates the side effects the
/// workflow relies on (the clone directory, the owner/name lookup).
const FAKE_GH: &str = r#"#!/bin/sh
printf 'gh %s\n' "$*" >> "$CALL_LOG"
case "$1 $2" in
  "$FAKE_GH_FAIL") echo "gh: simulated failure" >&2; exit 1 ;;
esac
case "$1 $2" in
  "auth status") echo "Logged in to github.com account octocat" >&2 ;;
  "repo create") mkdir -p "$3" ;;
  "repo view") printf 'octocat/%s\n' "$(basename "$PWD")" ;;
  "api "*) cat > "$FAKE_API_INPUT" ;;
esac
exit 0
"#;

/// Fake `git`: logs and fails when its subcommand equals `FAKE_GIT_FAIL`.
const FAKE_GIT: &str = r#"#!/bin/sh
printf 'git %s\n' "$*" >> "$CALL_LOG"
if [ -n "$FAKE_GIT_FAIL" ] && [ "$1" = "$FAKE_GIT_FAIL" ]; then
  echo "fatal: simulated failure" >&2
  exit 128
fi
exit 0
"#;

/// A temporary directory holding the working directory the binary runs in,
/// the fake executables and the call log.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with fake `gh`, `git` and a logging `mv`.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");
        temp_dir
            .child("config")
            .create_dir_all()
            .expect("Failed to create config directory");

        let fixture = Self { temp_dir };
        fixture.install("gh", FAKE_GH);
        fixture.install("git", FAKE_GIT);
        let real_mv = which::which("mv").expect("mv not found on PATH");
        fixture.install(
            "mv",
            &format!(
                "#!/bin/sh\nprintf 'mv %s\\n' \"$*\" >> \"$CALL_LOG\"\nexec {} \"$@\"\n",
                real_mv.display()
            ),
        );
        fixture
    }

    fn install(&self, name: &str, script: &str) {
        let path = self.bin_dir().join(name);
        fs::create_dir_all(self.bin_dir()).expect("Failed to create bin directory");
        fs::write(&path, script).expect("Failed to write fake executable");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake executable runnable");
    }

    /// Directory the binary runs in.
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.temp_dir.path().join("bin")
    }

    /// Stand-in for the platform config directory.
    pub fn config_home(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp_dir.path().join("calls.log")
    }

    /// Where the fake `gh api` stores the stdin it received.
    pub fn api_input_path(&self) -> PathBuf {
        self.temp_dir.path().join("api-input.json")
    }

    /// Write a file relative to the fixture root.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Every external command the binary ran, in order.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The binary, wired to the fakes and isolated from the user's
    /// configuration and environment.
    pub fn command(&self) -> Command {
        let path = env::var_os("PATH").unwrap_or_default();
        let mut dirs = vec![self.bin_dir()];
        dirs.extend(env::split_paths(&path));

        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gh-repo-init");
        cmd.current_dir(self.work_dir())
            .env("PATH", env::join_paths(dirs).expect("Invalid PATH"))
            .env("CALL_LOG", self.log_path())
            .env("FAKE_API_INPUT", self.api_input_path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("FAKE_GH_FAIL")
            .env_remove("FAKE_GIT_FAIL")
            .env_remove("GH_REPO_INIT_PREFIX")
            .env_remove("GH_REPO_INIT_BRANCH")
            .env_remove("GH_REPO_INIT_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
