//! `clasp-secrets upload` — push ~/.clasprc.json into repository secrets.

use crate::cli::output;
use crate::cli::{confirm, load_settings, validate_repo, Cli};
use crate::credentials::CredentialFile;
use crate::environment::SystemEnvironment;
use crate::errors::Result;
use crate::gh::SystemRunner;
use crate::transfer::SecretTransfer;

/// Execute the `upload` command.
pub fn execute(cli: &Cli, repo: &str, yes: bool) -> Result<()> {
    validate_repo(repo)?;
    let settings = load_settings(cli)?;
    let runner = SystemRunner::new(&settings.gh_path);
    let mut transfer = SecretTransfer::new(&runner, settings.encoding, repo);

    // 1. Access gate: the repository must exist and be pushable.
    transfer.check_access()?;

    // 2. Unless --yes is set, ask before touching any secret.
    let approved = yes || confirm(&format!("Upload clasp credentials to \"{repo}\"?"))?;
    if !transfer.confirm(approved)? {
        output::info("Cancelled.");
        return Ok(());
    }

    // 3. Read, encode, and send.
    let credentials = CredentialFile::locate(&SystemEnvironment);
    let report = transfer.upload(&credentials)?;

    for name in &report.skipped {
        output::warning(&format!("{name} has no value in .clasprc.json — not uploaded"));
    }

    output::success(&format!(
        "Uploaded clasp credentials to GitHub Secrets of {repo} ({} secret(s), {})",
        report.uploaded.len(),
        settings.encoding
    ));
    output::tip(&format!("Run `clasp-secrets list {repo}` to confirm."));

    Ok(())
}
