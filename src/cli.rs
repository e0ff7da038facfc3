//! CLI argument parsing and dispatch

use std::ffi::OsString;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::commands::completions::CompletionShell;
use gh_repo_init::output::{OutputConfig, Reporter};

/// Two-letter single-dash flags clap cannot express as shorts.
const LEGACY_FLAGS: [(&str, &str); 2] = [("-rd", "--repo_desc"), ("-rv", "--repo_visibility")];

/// Create a GitHub repository and initialize its local checkout
///
/// Creates the remote repository with gh, clones it, commits the
/// description to README.md, pushes the main branch and renames the clone
/// to the requested folder.
#[derive(Parser, Debug)]
#[command(name = "gh-repo-init")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    create: commands::create::CreateArgs,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<CompletionShell>,

    /// Clear the terminal before starting
    #[arg(long)]
    clear: bool,

    /// Suppress progress output; failures are still printed
    #[arg(short, long)]
    quiet: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        if let Some(shell) = self.completions {
            return commands::completions::execute(shell);
        }

        if self.clear {
            let term = console::Term::stdout();
            if term.is_term() {
                term.clear_screen()?;
            }
        }

        let reporter = Reporter::new(OutputConfig::from_env_and_flag(&self.color), self.quiet);
        commands::create::execute(self.create, &reporter)
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Rewrite `-rd`/`-rv` (and their `=value` forms) to the long flags.
///
/// Everything after a bare `--` is passed through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            for (legacy, long) in LEGACY_FLAGS {
                if text == legacy {
                    return OsString::from(long);
                }
                if let Some(value) = text
                    .strip_prefix(legacy)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
