//! The `list_repos` and `list_keys` subcommands.
//!
//! Both print declared names one per line, in lexicographic order, without
//! resolving anything — listing must work even when resolution would fail.

use std::path::Path;

use crate::error::Result;
use crate::resolver::Resolver;

/// Execute the `list_repos` command.
pub fn execute_repos(config_path: &Path) -> Result<()> {
    let resolver = Resolver::from_file(config_path)?;
    for name in resolver.repo_names() {
        println!("{}", name);
    }
    Ok(())
}

/// Execute the `list_keys` command.
pub fn execute_keys(config_path: &Path) -> Result<()> {
    let resolver = Resolver::from_file(config_path)?;
    for name in resolver.key_names() {
        println!("{}", name);
    }
    Ok(())
}
