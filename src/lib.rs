//! # repoman
//!
//! Library behind the `repo` and `repoman` command-line tools: keep a fleet
//! of source-control repositories (and the deploy keys that guard them) in
//! sync from a single declarative YAML manifest, and assemble a chef
//! `client.rb` from the cookbook and role directories they provide.
//!
//! ## Core Concepts
//!
//! - **Manifest (`config`)**: the parsed `repos.yml` — global directory
//!   settings plus raw repository and key declarations with optional
//!   fields.
//! - **Resolution (`resolver`)**: fills in every defaultable field of a
//!   declaration (VCS type from the URL, path under `repodir`, key lookup
//!   and on-disk materialization) lazily, once per name, memoized for the
//!   run.
//! - **Synchronization (`sync`)**: clone-or-update through the system
//!   `git`/`hg` clients, injecting an `ssh -i <key>` transport override for
//!   keyed repositories. The clients are black boxes judged only by exit
//!   status.
//! - **Generation (`client_rb`)**: one-shot assembly of `client.rb` from
//!   discovered cookbook/role directories, refusing to overwrite.
//!
//! Everything is single-threaded and synchronous: one subcommand runs end
//! to end, each step blocking until its file I/O or subprocess returns.
//!
//! ## Quick Example
//!
//! ```
//! use repoman::config;
//! use repoman::resolver::{classify_repo_type, VcsKind};
//!
//! let manifest = config::parse(
//!     r#"
//! repos:
//!   infra:
//!     url: git@example.com:infra.git
//! "#,
//! )
//! .unwrap();
//! assert!(manifest.repos.contains_key("infra"));
//! assert_eq!(classify_repo_type("git@example.com:infra.git"), VcsKind::Git);
//! ```

pub mod client_rb;
pub mod commands;
pub mod config;
pub mod error;
pub mod resolver;
pub mod sync;
