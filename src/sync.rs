//! # Repository Synchronization
//!
//! Brings a local working copy in line with its remote by shelling out to
//! the system `git` or `hg` client. The clients are black boxes: they
//! inherit our stdout/stderr, and only their exit status is inspected. A
//! non-zero exit (or a failure to spawn at all) is a fatal [`Error::Vcs`].
//!
//! The clone-or-update decision is purely "does the working copy directory
//! exist": present means update, absent means clone. When the repository
//! resolved a deploy key, the transport override `ssh -i <key>` is injected
//! as `GIT_SSH_COMMAND` for git and via the `-e` flag for hg.

use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::resolver::{ResolvedRepo, VcsKind};

/// Action selected for a repository based on local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Clone,
    Update,
}

/// Decide whether `repo` needs a fresh clone or an update of an existing
/// working copy.
pub fn plan_sync(repo: &ResolvedRepo) -> SyncAction {
    if repo.path.is_dir() {
        SyncAction::Update
    } else {
        SyncAction::Clone
    }
}

/// The `ssh -i <key>` override for a keyed repository.
fn ssh_override(repo: &ResolvedRepo) -> Option<String> {
    repo.key_path
        .as_ref()
        .map(|path| format!("ssh -i {}", path.display()))
}

/// Assemble the client invocation for `repo` and `action`.
///
/// Separated from execution so the exact program, arguments, working
/// directory, and environment are unit-testable without spawning anything.
pub fn vcs_command(repo: &ResolvedRepo, action: SyncAction) -> Command {
    let ssh = ssh_override(repo);
    let mut cmd = Command::new(repo.vcs.as_str());
    match (repo.vcs, action) {
        (VcsKind::Git, SyncAction::Update) => {
            cmd.arg("pull").current_dir(&repo.path);
        }
        (VcsKind::Git, SyncAction::Clone) => {
            cmd.arg("clone").arg(&repo.url).arg(&repo.path);
        }
        (VcsKind::Hg, SyncAction::Update) => {
            cmd.arg("pull");
            if let Some(ssh) = &ssh {
                cmd.arg("-e").arg(ssh);
            }
            cmd.arg("-u").current_dir(&repo.path);
        }
        (VcsKind::Hg, SyncAction::Clone) => {
            cmd.arg("clone");
            if let Some(ssh) = &ssh {
                cmd.arg("-e").arg(ssh);
            }
            cmd.arg(&repo.url).arg(&repo.path);
        }
    }
    if repo.vcs == VcsKind::Git {
        if let Some(ssh) = &ssh {
            cmd.env("GIT_SSH_COMMAND", ssh);
        }
    }
    cmd
}

/// Render an invocation for error messages, program plus arguments.
fn render_command(cmd: &Command) -> String {
    let mut rendered = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

/// Clone or update a resolved repository, blocking until the client exits.
pub fn sync_repo(repo: &ResolvedRepo) -> Result<()> {
    let action = plan_sync(repo);
    let cmd = vcs_command(repo, action);
    info!("syncing '{}': {}", repo.name, render_command(&cmd));
    run_command(cmd)
}

/// Run an assembled invocation, mapping spawn failures and non-zero exits
/// to [`Error::Vcs`].
fn run_command(mut cmd: Command) -> Result<()> {
    let rendered = render_command(&cmd);
    let status = cmd.status().map_err(|e| Error::Vcs {
        command: rendered.clone(),
        reason: e.to_string(),
    })?;
    debug!("'{}' exited with {}", rendered, status);

    if !status.success() {
        let reason = match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(Error::Vcs {
            command: rendered,
            reason,
        });
    }
    Ok(())
}
