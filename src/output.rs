//! # Output Configuration
//!
//! Controls how progress messages look: emoji and color when the terminal
//! supports them, plain bracketed tags otherwise.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_repo_init::output::{OutputConfig, Reporter};
//!
//! let reporter = Reporter::new(OutputConfig::from_env_and_flag("auto"), false);
//! reporter.start("Creating GitHub repo");
//! reporter.success("Repository created");
//! ```

use std::env;

use console::style;

use crate::params::RepoParams;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` forces colors on (overriding `NO_COLOR`), `never` forces them
    /// off, anything else detects support from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Prints progress lines for the pipeline.
///
/// With `quiet` set only failures and warnings are printed.
#[derive(Debug, Clone)]
pub struct Reporter {
    config: OutputConfig,
    quiet: bool,
}

impl Reporter {
    pub fn new(config: OutputConfig, quiet: bool) -> Self {
        Self { config, quiet }
    }

    /// A reporter that prints nothing but failures and warnings, uncolored.
    pub fn silent() -> Self {
        Self::new(OutputConfig::without_color(), true)
    }

    pub fn start(&self, message: &str) {
        self.line(&self.start_line(message));
    }

    pub fn success(&self, message: &str) {
        self.line(&self.success_line(message));
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        let tag = emoji(&self.config, "⚠️ ", "[WARN]");
        let text = if self.config.use_color {
            style(message).yellow().to_string()
        } else {
            message.to_string()
        };
        println!("{} {}", tag, text);
        println!();
    }

    pub fn failure(&self, message: &str) {
        println!("{}", self.failure_line(message));
        println!();
    }

    /// Summary of the resolved parameters, printed before anything runs.
    pub fn parameters(&self, params: &RepoParams) {
        if self.quiet {
            return;
        }
        println!("Data to be used to configure repos locally and remotely:");
        println!("   Folder name: {}", params.folder_name);
        println!("   Repo name: {}", params.repo_name);
        println!("   Repo desc: {}", params.description);
        println!("   Repo visibility: {}", params.visibility);
        println!();
    }

    fn line(&self, text: &str) {
        if !self.quiet {
            println!("{}", text);
            println!();
        }
    }

    fn start_line(&self, message: &str) -> String {
        format!("{} {}", emoji(&self.config, "▶️ ", "[RUN]"), message)
    }

    fn success_line(&self, message: &str) -> String {
        let text = if self.config.use_color {
            style(message).green().to_string()
        } else {
            message.to_string()
        };
        format!("{} {}", emoji(&self.config, "✅", "[OK]"), text)
    }

    fn failure_line(&self, message: &str) -> String {
        let text = if self.config.use_color {
            style(message).red().bold().to_string()
        } else {
            message.to_string()
        };
        format!("{} {}", emoji(&self.config, "❌", "[FAIL]"), text)
    }
}
