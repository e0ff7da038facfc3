//! # gh-repo-init CLI
//!
//! Binary entry point. Parses the command line with `clap`, sets up logging
//! and hands off to the library. Running without any argument prints the
//! help text and exits with code 1.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};

fn main() -> Result<()> {
    let args: Vec<_> = std::env::args_os().collect();
    if args.len() <= 1 {
        cli::Cli::command().print_help()?;
        println!();
        std::process::exit(1);
    }

    let cli = cli::Cli::parse_from(cli::normalize_args(args));
    cli.execute()
}
