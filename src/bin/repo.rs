//! # repo
//!
//! The minimal repository-synchronization tool: inspect and resolve
//! manifest entries and sync one repository at a time. Its bigger sibling
//! `repoman` adds bulk updates and chef client.rb generation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use repoman::commands;
use repoman::config::DEFAULT_CONFIG_PATH;

/// Sync declared source-control repositories from a YAML manifest
#[derive(Parser, Debug)]
#[command(name = "repo")]
#[command(version, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the repos manifest
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Commands {
    /// Resolve a declared repository and print it as YAML
    GetRepo(commands::get_repo::GetRepoArgs),
    /// Resolve a declared key and print it as YAML
    GetKey(commands::get_key::GetKeyArgs),
    /// List declared repository names
    ListRepos,
    /// List declared key names
    ListKeys,
    /// Clone or update a single repository
    UpdateRepo(commands::update_repo::UpdateRepoArgs),
}

impl Cli {
    /// Execute the CLI command
    fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::GetRepo(args) => commands::get_repo::execute(&self.config, args, false)?,
            Commands::GetKey(args) => commands::get_key::execute(&self.config, args)?,
            Commands::ListRepos => commands::list::execute_repos(&self.config)?,
            Commands::ListKeys => commands::list::execute_keys(&self.config)?,
            Commands::UpdateRepo(args) => commands::update_repo::execute(&self.config, args)?,
        }
        Ok(())
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    // Bad usage (missing or unknown subcommand) exits 1, not clap's
    // default 2; --help and --version are not failures.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    cli.execute()
}
