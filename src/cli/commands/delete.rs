//! `clasp-secrets delete` — remove the clasp secrets from a repository.

use crate::cli::output;
use crate::cli::{confirm, load_settings, validate_repo, Cli};
use crate::errors::Result;
use crate::gh::SystemRunner;
use crate::transfer::SecretTransfer;

/// Execute the `delete` command.
///
/// Secrets that fail to delete only produce a warning.
pub fn execute(cli: &Cli, repo: &str, yes: bool) -> Result<()> {
    validate_repo(repo)?;
    let settings = load_settings(cli)?;
    let runner = SystemRunner::new(&settings.gh_path);
    let mut transfer = SecretTransfer::new(&runner, settings.encoding, repo);

    transfer.check_access()?;

    let approved = yes || confirm(&format!("Delete clasp secrets from \"{repo}\"?"))?;
    if !transfer.confirm(approved)? {
        output::info("Cancelled.");
        return Ok(());
    }

    let report = transfer.delete()?;

    for (name, reason) in &report.failed {
        output::warning(&format!(
            "Failed to delete {name} from GitHub Secrets (may not exist): {reason}"
        ));
    }

    if !report.deleted.is_empty() {
        output::success(&format!(
            "Deleted {} secret(s) from {repo}",
            report.deleted.len()
        ));
    }

    Ok(())
}
