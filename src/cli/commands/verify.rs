//! `clasp-secrets verify` — check the local credential file.

use chrono::Utc;

use crate::cli::output;
use crate::credentials::CredentialFile;
use crate::environment::SystemEnvironment;
use crate::errors::Result;
use crate::transfer::verify;

/// Execute the `verify` command.
pub fn execute() -> Result<()> {
    let credentials = CredentialFile::locate(&SystemEnvironment);
    let report = verify(&credentials)?;

    output::success(&format!("{} is valid", report.path.display()));

    if let Some(expires_at) = report.expires_at {
        let when = expires_at.format("%Y-%m-%d %H:%M:%S UTC");
        if report.is_expired(Utc::now()) {
            output::info(&format!(
                "Access token expired at {when}; clasp refreshes it on next use."
            ));
        } else {
            output::info(&format!("Access token expires at {when}"));
        }
    }

    Ok(())
}
