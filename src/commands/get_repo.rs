//! The `get_repo` subcommand: resolve one repository and print it.

use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::error::Result;
use crate::resolver::{ResolvedRepo, Resolver, VcsKind};

/// Resolve a declared repository and print the result as YAML
#[derive(Args, Debug)]
pub struct GetRepoArgs {
    /// Name of the declared repository
    pub name: String,
}

/// The fields shown by the simple `repo` tool.
///
/// The `is_primary_repo`/`is_chef_repo` flags only mean something to
/// `repoman`, so the simple tool leaves them out of its output.
#[derive(Serialize)]
struct PlainRepoView<'a> {
    name: &'a str,
    url: &'a str,
    #[serde(rename = "type")]
    vcs: VcsKind,
    path: &'a Path,
    key_path: Option<&'a Path>,
}

fn plain_view(repo: &ResolvedRepo) -> PlainRepoView<'_> {
    PlainRepoView {
        name: &repo.name,
        url: &repo.url,
        vcs: repo.vcs,
        path: &repo.path,
        key_path: repo.key_path.as_deref(),
    }
}

/// Execute the `get_repo` command.
///
/// Resolution fills in every defaultable field, so the printed record shows
/// exactly what `update_repo` would act on — including the materialized key
/// path, since resolving a key writes it to disk. `chef_flags` selects the
/// repoman view with the client-config flags included.
pub fn execute(config_path: &Path, args: GetRepoArgs, chef_flags: bool) -> Result<()> {
    let mut resolver = Resolver::from_file(config_path)?;
    let repo = resolver.resolve_repo(&args.name)?;
    if chef_flags {
        print!("{}", serde_yaml::to_string(&repo)?);
    } else {
        print!("{}", serde_yaml::to_string(&plain_view(&repo))?);
    }
    Ok(())
}
