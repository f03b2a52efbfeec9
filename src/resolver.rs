//! # Lazy Repository and Key Resolution
//!
//! The manifest keeps declarations raw; this module turns them into fully
//! resolved records, exactly once per name per run. The [`Resolver`] owns
//! the parsed [`Config`] together with memoization caches of immutable
//! [`ResolvedRepo`] and [`ResolvedKey`] values, keeping input state (the
//! declarations) cleanly separated from derived state (the resolutions).
//!
//! Resolution has deliberate side effects:
//!
//! - `repodir` is created (mode 0755) the first time a repo needs a default
//!   path under it.
//! - `keysdir` is created (mode 0700) and inline key material is written to
//!   `keysdir/<name>` (mode 0600) the first time such a key resolves. An
//!   existing key file is never overwritten, and nothing is ever deleted.
//!
//! Because results are memoized, those side effects happen at most once per
//! run no matter how many repositories share a key.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::config::{self, Config, GlobalSettings, KeyDecl};
use crate::error::{Error, Result};

/// Version-control client backing a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Hg,
}

impl VcsKind {
    /// The client binary name.
    pub fn as_str(self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Hg => "hg",
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a repository URL as git or mercurial.
///
/// This is a case-sensitive substring match — any URL containing `git`
/// (scheme, host, user, or path) is git, everything else is hg. There is
/// deliberately no scheme parsing or validation; an explicit `type` in the
/// manifest wins over classification.
pub fn classify_repo_type(url: &str) -> VcsKind {
    if url.contains("git") {
        VcsKind::Git
    } else {
        VcsKind::Hg
    }
}

/// A deploy key with its material present on disk.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedKey {
    pub name: String,
    /// Location of the key file, declared or materialized.
    pub path: PathBuf,
    /// The secret material the file contains.
    pub material: String,
}

/// A repository with every defaultable field filled in.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRepo {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub vcs: VcsKind,
    /// Local working-copy location.
    pub path: PathBuf,
    /// Deploy key file guarding this repo, if any.
    pub key_path: Option<PathBuf>,
    pub is_primary_repo: bool,
    pub is_chef_repo: bool,
}

/// Resolves raw declarations into immutable records, memoizing per name.
pub struct Resolver {
    config: Config,
    repos: HashMap<String, ResolvedRepo>,
    keys: HashMap<String, ResolvedKey>,
}

impl Resolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            repos: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    /// Load the manifest at `path` and wrap it in a fresh resolver.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(config::from_file(path)?))
    }

    pub fn globals(&self) -> &GlobalSettings {
        &self.config.globals
    }

    /// Declared repository names, in lexicographic order.
    pub fn repo_names(&self) -> Vec<String> {
        self.config.repos.keys().cloned().collect()
    }

    /// Declared key names, in lexicographic order.
    pub fn key_names(&self) -> Vec<String> {
        self.config.keys.keys().cloned().collect()
    }

    /// Resolve a declared key, materializing inline material on first use.
    ///
    /// An undeclared name is `Ok(None)`: repositories need not be
    /// key-protected, so callers probe for keys without treating absence as
    /// failure. Declared keys that cannot be read or materialized are hard
    /// errors.
    pub fn resolve_key(&mut self, name: &str) -> Result<Option<ResolvedKey>> {
        if let Some(key) = self.keys.get(name) {
            return Ok(Some(key.clone()));
        }
        let Some(decl) = self.config.keys.get(name).cloned() else {
            return Ok(None);
        };

        let resolved = self.materialize_key(name, &decl)?;
        self.keys.insert(name.to_string(), resolved.clone());
        Ok(Some(resolved))
    }

    fn materialize_key(&self, name: &str, decl: &KeyDecl) -> Result<ResolvedKey> {
        if let Some(path) = &decl.path {
            // Reference form: the file is the source of truth for material.
            let material = fs::read_to_string(path).map_err(|e| Error::KeyRead {
                name: name.to_string(),
                path: path.clone(),
                message: e.to_string(),
            })?;
            return Ok(ResolvedKey {
                name: name.to_string(),
                path: path.clone(),
                material,
            });
        }

        // Inline form: write the material under keysdir exactly once.
        let material = decl
            .material
            .clone()
            .ok_or_else(|| Error::KeyMaterialMissing {
                name: name.to_string(),
            })?;
        let keysdir = &self.config.globals.keysdir;
        ensure_dir(keysdir, 0o700)?;
        let path = keysdir.join(name);
        if !path.exists() {
            debug!("materializing key '{}' at {}", name, path.display());
            write_private_file(&path, &material)?;
        }
        Ok(ResolvedKey {
            name: name.to_string(),
            path,
            material,
        })
    }

    /// Resolve a declared repository, filling type, path, flags, and key.
    ///
    /// Unlike keys, an undeclared repo name is a fatal [`Error::UnknownRepo`].
    pub fn resolve_repo(&mut self, name: &str) -> Result<ResolvedRepo> {
        if let Some(repo) = self.repos.get(name) {
            return Ok(repo.clone());
        }
        let decl = self
            .config
            .repos
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownRepo {
                name: name.to_string(),
            })?;

        let vcs = match decl.vcs.as_deref() {
            None => classify_repo_type(&decl.url),
            Some("git") => VcsKind::Git,
            Some("hg") => VcsKind::Hg,
            Some(other) => {
                return Err(Error::UnsupportedRepoType {
                    kind: other.to_string(),
                })
            }
        };

        let path = match decl.path {
            Some(path) => path,
            None => {
                let repodir = self.config.globals.repodir.clone();
                ensure_dir(&repodir, 0o755)?;
                repodir.join(name)
            }
        };

        // An explicit key name, else a key sharing the repo's name. Neither
        // resolving is fine; the repo is simply unkeyed.
        let key = match &decl.key_name {
            Some(key_name) => self.resolve_key(key_name)?,
            None => self.resolve_key(name)?,
        };

        let resolved = ResolvedRepo {
            name: name.to_string(),
            url: decl.url,
            vcs,
            path,
            key_path: key.map(|k| k.path),
            is_primary_repo: decl.is_primary_repo.unwrap_or(false),
            is_chef_repo: decl.is_chef_repo.unwrap_or(true),
        };
        debug!(
            "resolved repo '{}': type={} path={}",
            name,
            resolved.vcs,
            resolved.path.display()
        );
        self.repos.insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }
}

/// Create `path` as a directory with `mode` if it does not exist yet.
pub(crate) fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)?;
    Ok(())
}

/// Write `material` to a new file readable only by the owner.
fn write_private_file(path: &Path, material: &str) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(material.as_bytes())?;
    Ok(())
}
