//! Shared scaffolding for the CLI end-to-end tests.
//!
//! Real `git`/`hg` clients are replaced with stub shell scripts on a
//! prepended `PATH`. Each stub appends its invocation (arguments plus the
//! `GIT_SSH_COMMAND` it saw) to a log file and exits 0, except when any
//! argument contains the token `fail-me`, which makes it exit 1. That is
//! enough to observe clone-vs-update decisions, transport overrides, and
//! sequential-abort semantics without touching the network.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_fs::TempDir;

/// Write stub `git` and `hg` executables under `<temp>/bin`.
///
/// Returns the bin directory (to prepend to `PATH`) and the invocation log.
pub fn stub_vcs(temp: &TempDir) -> (PathBuf, PathBuf) {
    let bin_dir = temp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let log = temp.path().join("vcs.log");

    for tool in ["git", "hg"] {
        let script = format!(
            "#!/bin/sh\n\
             printf '%s %s\\n' {tool} \"$*\" >> '{log}'\n\
             printf 'GIT_SSH_COMMAND=%s\\n' \"${{GIT_SSH_COMMAND-}}\" >> '{log}'\n\
             case \"$*\" in\n\
               *fail-me*) exit 1 ;;\n\
             esac\n\
             exit 0\n",
            tool = tool,
            log = log.display()
        );
        let path = bin_dir.join(tool);
        fs::write(&path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    (bin_dir, log)
}

/// `PATH` value with `bin_dir` in front of the current one.
pub fn path_with(bin_dir: &Path) -> String {
    format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    )
}

/// The accumulated stub invocation log, empty if nothing ran.
pub fn read_log(log: &Path) -> String {
    fs::read_to_string(log).unwrap_or_default()
}

/// Write a manifest whose global directories all live under `temp`.
///
/// `body` supplies the `repos:`/`keys:` sections verbatim.
pub fn write_manifest(temp: &TempDir, body: &str) -> PathBuf {
    let manifest = temp.path().join("repos.yml");
    let globals = format!(
        "globals:\n  chefdir: {root}/chef\n  repodir: {root}/repos\n  keysdir: {root}/keys\n",
        root = temp.path().display()
    );
    fs::write(&manifest, format!("{}{}", globals, body)).unwrap();
    manifest
}
