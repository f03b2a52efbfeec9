//! # CLI Command Implementations
//!
//! One module per subcommand, shared between the `repo` and `repoman`
//! binaries. Each module follows the same shape: an `Args` struct for the
//! command-specific arguments (derived with `clap`) and an `execute`
//! function taking the manifest path from the binary's global `--config`
//! flag. Results are printed to stdout; diagnostics go through `log`.

pub mod gen_client_rb;
pub mod get_key;
pub mod get_repo;
pub mod list;
pub mod update;
pub mod update_repo;
