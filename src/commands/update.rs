//! The `update` and `update_chef` subcommands: bulk synchronization.
//!
//! Repositories are synced strictly sequentially in lexicographic name
//! order, one fully finished before the next starts. The first failure
//! aborts the remainder of the batch; repositories already synced stay
//! synced, there is no rollback.

use std::path::Path;

use crate::error::Result;
use crate::resolver::Resolver;
use crate::sync;

/// Execute the `update` (all repos) or `update_chef` (chef repos only)
/// command.
///
/// `update_chef` still resolves every repository — the chef flag is only
/// known after resolution — but skips the sync for non-chef ones.
pub fn execute(config_path: &Path, chef_only: bool) -> Result<()> {
    let mut resolver = Resolver::from_file(config_path)?;
    for name in resolver.repo_names() {
        let repo = resolver.resolve_repo(&name)?;
        if chef_only && !repo.is_chef_repo {
            continue;
        }
        println!("Updating {}", name);
        sync::sync_repo(&repo)?;
    }
    Ok(())
}
