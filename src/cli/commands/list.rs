//! `clasp-secrets list` — show which clasp secrets a repository has.

use crate::cli::output;
use crate::cli::{load_settings, validate_repo, Cli};
use crate::errors::Result;
use crate::gh::SystemRunner;
use crate::transfer::SecretTransfer;

/// Execute the `list` command.
pub fn execute(cli: &Cli, repo: &str) -> Result<()> {
    validate_repo(repo)?;
    let settings = load_settings(cli)?;
    let runner = SystemRunner::new(&settings.gh_path);
    let mut transfer = SecretTransfer::new(&runner, settings.encoding, repo);

    transfer.check_access()?;
    let report = transfer.list()?;

    output::print_secret_status_table(report.expected, &report.found);

    if report.found.is_empty() {
        output::info(&format!("No clasp secrets found in {repo}."));
        output::tip(&format!("Run `clasp-secrets upload {repo}` to add them."));
    } else if report.is_complete() {
        output::success(&format!(
            "Found {} of {} clasp secret(s) in {repo}",
            report.found.len(),
            report.expected.len()
        ));
    } else {
        output::warning(&format!(
            "Found only {} of {} clasp secret(s) in {repo}",
            report.found.len(),
            report.expected.len()
        ));
    }

    Ok(())
}
