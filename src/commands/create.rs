//! Create command implementation
//!
//! Merges flags, environment and the configuration file into run parameters,
//! then runs the repository workflow in the current directory.

use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use gh_repo_init::config::{self, FileConfig};
use gh_repo_init::defaults;
use gh_repo_init::output::Reporter;
use gh_repo_init::params::RepoParams;
use gh_repo_init::runner::{CommandRunner, DryRunRunner, SystemRunner};
use gh_repo_init::workflow::{Options, Workflow};

/// Arguments for creating a repository
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Folder the local repo ends up in, as '<group>.<name>'
    #[arg(short = 'f', long = "folder_name", visible_alias = "folder-name", value_name = "FOLDER")]
    pub folder_name: Option<String>,

    /// Description for both local and remote repo (also -rd)
    #[arg(long = "repo_desc", visible_alias = "repo-desc", value_name = "TEXT")]
    pub repo_desc: Option<String>,

    /// Repo visibility: public, private or internal; defaults to public (also -rv)
    #[arg(long = "repo_visibility", visible_alias = "repo-visibility", value_name = "VISIBILITY")]
    pub repo_visibility: Option<String>,

    /// Prefix for the derived repository name
    #[arg(long, value_name = "PREFIX", env = "GH_REPO_INIT_PREFIX")]
    pub prefix: Option<String>,

    /// Branch the initial commit is pushed to
    #[arg(long, value_name = "BRANCH", env = "GH_REPO_INIT_BRANCH")]
    pub branch: Option<String>,

    /// Protect the pushed branch (one approving review, no force pushes)
    #[arg(long)]
    pub protect_branch: bool,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH", env = "GH_REPO_INIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Parameters and options after applying flag > env > file > default.
fn resolve(args: CreateArgs, file: FileConfig) -> Result<(RepoParams, Options)> {
    let prefix = args
        .prefix
        .or(file.prefix)
        .unwrap_or_else(|| defaults::REPO_PREFIX.to_string());
    let visibility = args.repo_visibility.or(file.visibility);

    let params = RepoParams::resolve(
        args.folder_name.as_deref(),
        args.repo_desc.as_deref(),
        visibility.as_deref(),
        &prefix,
    )?;

    let options = Options {
        base_dir: std::env::current_dir()?,
        branch: args
            .branch
            .or(file.branch)
            .unwrap_or_else(|| defaults::BRANCH.to_string()),
        commit_message: file
            .commit_message
            .unwrap_or_else(|| defaults::COMMIT_MESSAGE.to_string()),
        protect_branch: args.protect_branch || file.protect_branch.unwrap_or(false),
        dry_run: args.dry_run,
        ..Options::default()
    };

    Ok((params, options))
}

/// Execute the create command
pub fn execute(args: CreateArgs, reporter: &Reporter) -> Result<()> {
    let file_config = config::load(args.config.as_deref())?;
    let (params, options) = resolve(args, file_config)?;
    info!("resolved parameters: {:?}", params);

    reporter.parameters(&params);
    if options.dry_run {
        reporter.info("DRY RUN MODE - No changes will be made");
        reporter.info("");
    }

    let runner: Box<dyn CommandRunner> = if options.dry_run {
        Box::new(DryRunRunner::new(reporter.clone()))
    } else {
        Box::new(SystemRunner)
    };

    Workflow::new(runner.as_ref(), reporter, options).run(&params)?;
    Ok(())
}
