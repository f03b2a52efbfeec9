//! The `get_key` subcommand: resolve one deploy key and print it.

use std::path::Path;

use clap::Args;

use crate::error::Result;
use crate::resolver::Resolver;

/// Resolve a declared key and print the result as YAML
#[derive(Args, Debug)]
pub struct GetKeyArgs {
    /// Name of the declared key
    pub name: String,
}

/// Execute the `get_key` command.
///
/// An undeclared key is not an error — repositories probe for keys by name
/// during resolution, so absence is a normal state. A notice goes to stderr
/// and the command still succeeds.
pub fn execute(config_path: &Path, args: GetKeyArgs) -> Result<()> {
    let mut resolver = Resolver::from_file(config_path)?;
    match resolver.resolve_key(&args.name)? {
        Some(key) => print!("{}", serde_yaml::to_string(&key)?),
        None => eprintln!("Key '{}' is not declared", args.name),
    }
    Ok(())
}
