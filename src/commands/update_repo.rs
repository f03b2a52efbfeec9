//! The `update_repo` subcommand: clone or update a single repository.

use std::path::Path;

use clap::Args;

use crate::error::Result;
use crate::resolver::Resolver;
use crate::sync;

/// Clone or update a single declared repository
#[derive(Args, Debug)]
pub struct UpdateRepoArgs {
    /// Name of the declared repository
    pub name: String,
}

/// Execute the `update_repo` command.
pub fn execute(config_path: &Path, args: UpdateRepoArgs) -> Result<()> {
    let mut resolver = Resolver::from_file(config_path)?;
    let repo = resolver.resolve_repo(&args.name)?;
    println!("Updating {}", args.name);
    sync::sync_repo(&repo)
}
