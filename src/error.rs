//! # Error Handling
//!
//! Centralized error type for the `repoman` library, built with `thiserror`.
//! Every failure mode is terminal for the current command: binaries bubble
//! these up through `anyhow`, print a single human-readable line, and exit
//! with a non-zero status. There is no retry and no partial-failure
//! continuation; a bulk update stops at the first failing repository.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repoman operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file given on the command line does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key declaration pointed at a file on disk that could not be read.
    #[error("Failed to read key file {} for key '{name}': {message}", path.display())]
    KeyRead {
        name: String,
        path: PathBuf,
        message: String,
    },

    /// A key declaration carries neither inline material nor a path.
    ///
    /// There is nothing to materialize in this case, so it is rejected
    /// explicitly rather than writing an empty key file.
    #[error("Key '{name}' has neither inline material nor a path")]
    KeyMaterialMissing { name: String },

    /// A repository name was requested that the manifest does not declare.
    #[error("Unknown repo: {name}")]
    UnknownRepo { name: String },

    /// A repository declared a `type` that is neither `git` nor `hg`.
    #[error("Unsupported repo type: {kind}")]
    UnsupportedRepoType { kind: String },

    /// A version-control client invocation failed.
    ///
    /// Only the exit status is inspected; the client's own output goes
    /// straight to the terminal.
    #[error("VCS command failed: {command}: {reason}")]
    Vcs { command: String, reason: String },

    /// The generated client configuration already exists on disk.
    #[error("Refusing to clobber {} as it already exists", path.display())]
    ClientConfigExists { path: PathBuf },

    /// No cookbook or role paths were discoverable across the chef repos.
    #[error("Not enough data to write client.rb")]
    InsufficientData,
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
