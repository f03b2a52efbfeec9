//! The `gen_client_rb` subcommand: write the chef client configuration.

use std::path::Path;

use crate::client_rb;
use crate::error::Result;
use crate::resolver::Resolver;

/// Execute the `gen_client_rb` command.
pub fn execute(config_path: &Path) -> Result<()> {
    let mut resolver = Resolver::from_file(config_path)?;
    let path = client_rb::generate(&mut resolver)?;
    println!("Wrote {}", path.display());
    Ok(())
}
