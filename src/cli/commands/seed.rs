//! `clasp-secrets seed` — recreate ~/.clasprc.json inside CI.
//!
//! Reads the `CLASP_*` variables a workflow exposes from the
//! field-by-field secrets and writes them back out in clasp's format.

use crate::cli::output;
use crate::credentials::{missing_fields, CredentialBundle, CredentialFile};
use crate::environment::{EnvironmentProvider, SystemEnvironment};
use crate::errors::{ClaspSecretsError, Result};

/// Execute the `seed` command.
pub fn execute() -> Result<()> {
    let path = seed(&SystemEnvironment)?;
    output::success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Write the credential file from `env` and return where it went.
///
/// Missing mandatory variables only warn; the file is written regardless.
pub fn seed(env: &dyn EnvironmentProvider) -> Result<std::path::PathBuf> {
    let bundle = CredentialBundle::from_env(env);

    let json = serde_json::to_string(&bundle)
        .map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))?;
    let missing = missing_fields(&json)?;
    if !missing.is_empty() {
        output::warning(&format!(
            "Writing incomplete credentials — missing {}",
            missing.join(", ")
        ));
    }

    let file = CredentialFile::locate(env);
    file.write(&bundle)?;
    Ok(file.path().to_path_buf())
}
