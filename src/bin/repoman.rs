//! # repoman
//!
//! The full repository-management tool: everything `repo` does, plus bulk
//! updates across the manifest and chef `client.rb` generation from the
//! synced repositories.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use repoman::commands;
use repoman::config::DEFAULT_CONFIG_PATH;

/// Sync chef repositories and generate client configuration from a YAML
/// manifest
#[derive(Parser, Debug)]
#[command(name = "repoman")]
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
    /// Generate <chefdir>/client.rb from the synced chef repositories
    GenClientRb,
    /// Resolve a declared repository and print it as YAML
    GetRepo(commands::get_repo::GetRepoArgs),
    /// Resolve a declared key and print it as YAML
    GetKey(commands::get_key::GetKeyArgs),
    /// List declared repository names
    ListRepos,
    /// List declared key names
    ListKeys,
    /// Clone or update every chef-flagged repository
    UpdateChef,
    /// Clone or update a single repository
    UpdateRepo(commands::update_repo::UpdateRepoArgs),
    /// Clone or update every declared repository
    Update,
}

impl Cli {
    /// Execute the CLI command
    fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::GenClientRb => commands::gen_client_rb::execute(&self.config)?,
            Commands::GetRepo(args) => commands::get_repo::execute(&self.config, args, true)?,
            Commands::GetKey(args) => commands::get_key::execute(&self.config, args)?,
            Commands::ListRepos => commands::list::execute_repos(&self.config)?,
            Commands::ListKeys => commands::list::execute_keys(&self.config)?,
            Commands::UpdateChef => commands::update::execute(&self.config, true)?,
            Commands::UpdateRepo(args) => commands::update_repo::execute(&self.config, args)?,
            Commands::Update => commands::update::execute(&self.config, false)?,
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
