//! `gh secret set|delete|list` wrappers.

use serde::Deserialize;

use super::{CommandRunner, OutputMode};
use crate::errors::{ClaspSecretsError, Result};

/// How the repository is passed to `gh secret`. Each encoding strategy
/// has its own invocation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoFlag {
    /// `-R <repo>`
    Short,
    /// `--repo <repo> --app actions`
    ActionsApp,
}

impl RepoFlag {
    fn args<'a>(self, repo: &'a str) -> Vec<&'a str> {
        match self {
            Self::Short => vec!["-R", repo],
            Self::ActionsApp => vec!["--repo", repo, "--app", "actions"],
        }
    }
}

/// One entry of `gh secret list --json name`.
#[derive(Debug, Deserialize)]
struct SecretEntry {
    name: String,
}

/// Set secret `name` in `repo`, piping `value` through stdin.
///
/// gh's own output goes straight to the terminal.
pub fn set_secret(
    runner: &dyn CommandRunner,
    repo: &str,
    name: &str,
    value: &str,
    flag: RepoFlag,
) -> Result<()> {
    let mut args = vec!["secret", "set", name];
    args.extend(flag.args(repo));

    let out = runner.run(&args, Some(value), OutputMode::Inherit)?;
    if !out.success() {
        return Err(ClaspSecretsError::ExternalCommandFailure(format!(
            "gh secret set {name}: {}",
            out.failure_message()
        )));
    }
    Ok(())
}

/// Delete secret `name` from `repo`.
pub fn delete_secret(
    runner: &dyn CommandRunner,
    repo: &str,
    name: &str,
    flag: RepoFlag,
) -> Result<()> {
    let mut args = vec!["secret", "delete", name];
    args.extend(flag.args(repo));

    let out = runner.run(&args, None, OutputMode::Inherit)?;
    if !out.success() {
        return Err(ClaspSecretsError::ExternalCommandFailure(format!(
            "gh secret delete {name}: {}",
            out.failure_message()
        )));
    }
    Ok(())
}

/// Names of all secrets currently set on `repo`.
pub fn list_secret_names(runner: &dyn CommandRunner, repo: &str) -> Result<Vec<String>> {
    let out = runner.run(
        &["secret", "list", "-R", repo, "--json", "name"],
        None,
        OutputMode::Capture,
    )?;
    if !out.success() {
        return Err(ClaspSecretsError::ExternalCommandFailure(format!(
            "gh secret list: {}",
            out.failure_message()
        )));
    }

    let entries: Vec<SecretEntry> = serde_json::from_str(&out.stdout).map_err(|e| {
        ClaspSecretsError::ExternalCommandFailure(format!(
            "unexpected `gh secret list` output: {e}"
        ))
    })?;

    Ok(entries.into_iter().map(|e| e.name).collect())
}
