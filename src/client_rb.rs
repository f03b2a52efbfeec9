//! # Chef client.rb Generation
//!
//! Assembles `<chefdir>/client.rb` from the cookbook and role directories
//! discovered across the synced chef repositories. Generation is a one-shot
//! operation: an existing `client.rb` is never overwritten, running again
//! is a refusal with a non-zero exit.
//!
//! Repositories are walked in lexicographic name order. Every chef repo
//! contributes its `cookbooks` directory when present; the role path comes
//! from primary repos with a `roles` directory, the last such repo in name
//! order winning.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::resolver::{ensure_dir, Resolver};

/// File name written under chefdir.
const CLIENT_RB: &str = "client.rb";

/// Generate `client.rb`, returning the path written.
pub fn generate(resolver: &mut Resolver) -> Result<PathBuf> {
    let chefdir = resolver.globals().chefdir.clone();
    let client_rb_path = chefdir.join(CLIENT_RB);
    if client_rb_path.exists() {
        return Err(Error::ClientConfigExists {
            path: client_rb_path,
        });
    }

    let mut cookbook_paths: Vec<PathBuf> = Vec::new();
    let mut role_path: Option<PathBuf> = None;
    for name in resolver.repo_names() {
        let repo = resolver.resolve_repo(&name)?;
        if !repo.is_chef_repo {
            continue;
        }
        let cookbooks = repo.path.join("cookbooks");
        if cookbooks.is_dir() {
            debug!("found cookbooks in '{}'", name);
            cookbook_paths.push(cookbooks);
        }
        if repo.is_primary_repo {
            let roles = repo.path.join("roles");
            if roles.is_dir() {
                debug!("taking roles from '{}'", name);
                role_path = Some(roles);
            }
        }
    }

    let role_path = role_path.ok_or(Error::InsufficientData)?;
    if cookbook_paths.is_empty() {
        return Err(Error::InsufficientData);
    }

    ensure_dir(&chefdir, 0o755)?;
    fs::write(&client_rb_path, render(&cookbook_paths, &role_path))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&client_rb_path, fs::Permissions::from_mode(0o644))?;
    }
    Ok(client_rb_path)
}

/// Render the two-line client.rb body.
fn render(cookbook_paths: &[PathBuf], role_path: &Path) -> String {
    let cookbooks = cookbook_paths
        .iter()
        .map(|p| format!("\"{}\"", p.display()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "cookbook_path [{}]\nrole_path '{}'",
        cookbooks,
        role_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse;
    use tempfile::TempDir;

    fn resolver_with(yaml: &str, dir: &TempDir) -> Resolver {
        let mut config = parse(yaml).unwrap();
        config.globals.chefdir = dir.path().join("chef");
        config.globals.repodir = dir.path().join("repos");
        config.globals.keysdir = dir.path().join("keys");
        Resolver::new(config)
    }

    fn make_repo_dirs(dir: &TempDir, name: &str, cookbooks: bool, roles: bool) {
        let repo = dir.path().join("repos").join(name);
        fs::create_dir_all(&repo).unwrap();
        if cookbooks {
            fs::create_dir_all(repo.join("cookbooks")).unwrap();
        }
        if roles {
            fs::create_dir_all(repo.join("roles")).unwrap();
        }
    }

    #[test]
    fn test_generate_writes_cookbooks_and_roles() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  infra: { url: "git@host:infra.git", is_primary_repo: true }
  site: { url: "git@host:site.git" }
"#,
            &dir,
        );
        make_repo_dirs(&dir, "infra", true, true);
        make_repo_dirs(&dir, "site", true, false);

        let path = generate(&mut resolver).unwrap();
        assert_eq!(path, dir.path().join("chef").join("client.rb"));

        let content = fs::read_to_string(&path).unwrap();
        let infra = dir.path().join("repos/infra");
        let site = dir.path().join("repos/site");
        assert_eq!(
            content,
            format!(
                "cookbook_path [\"{}/cookbooks\", \"{}/cookbooks\"]\nrole_path '{}/roles'",
                infra.display(),
                site.display(),
                infra.display()
            )
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644);
        }
    }

    #[test]
    fn test_generate_skips_non_chef_repos() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  infra: { url: "git@host:infra.git", is_primary_repo: true }
  tools: { url: "git@host:tools.git", is_chef_repo: false }
"#,
            &dir,
        );
        make_repo_dirs(&dir, "infra", true, true);
        make_repo_dirs(&dir, "tools", true, true);

        let path = generate(&mut resolver).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("repos/infra/cookbooks"));
        assert!(!content.contains("repos/tools"));
    }

    #[test]
    fn test_generate_last_primary_in_name_order_wins() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  alpha: { url: "git@host:a.git", is_primary_repo: true }
  omega: { url: "git@host:o.git", is_primary_repo: true }
"#,
            &dir,
        );
        make_repo_dirs(&dir, "alpha", true, true);
        make_repo_dirs(&dir, "omega", true, true);

        let path = generate(&mut resolver).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains(&format!(
            "role_path '{}/roles'",
            dir.path().join("repos/omega").display()
        )));
    }

    #[test]
    fn test_generate_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with("{}", &dir);
        fs::create_dir_all(dir.path().join("chef")).unwrap();
        fs::write(dir.path().join("chef").join("client.rb"), "existing").unwrap();

        let err = generate(&mut resolver).unwrap_err();
        assert!(matches!(err, Error::ClientConfigExists { .. }));
        // Untouched.
        assert_eq!(
            fs::read_to_string(dir.path().join("chef").join("client.rb")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_generate_without_roles_is_insufficient() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  infra: { url: "git@host:infra.git" }
"#,
            &dir,
        );
        make_repo_dirs(&dir, "infra", true, false);

        let err = generate(&mut resolver).unwrap_err();
        assert!(matches!(err, Error::InsufficientData));
        assert!(!dir.path().join("chef").join("client.rb").exists());
    }

    #[test]
    fn test_generate_without_cookbooks_is_insufficient() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  infra: { url: "git@host:infra.git", is_primary_repo: true }
"#,
            &dir,
        );
        make_repo_dirs(&dir, "infra", false, true);

        let err = generate(&mut resolver).unwrap_err();
        assert!(matches!(err, Error::InsufficientData));
    }

    #[test]
    fn test_generate_roles_only_from_primary_repos() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver_with(
            r#"
repos:
  infra: { url: "git@host:infra.git" }
"#,
            &dir,
        );
        // Roles exist but the repo is not primary, so they do not count.
        make_repo_dirs(&dir, "infra", true, true);

        let err = generate(&mut resolver).unwrap_err();
        assert!(matches!(err, Error::InsufficientData));
    }
}
