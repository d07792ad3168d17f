//! Read-only check that the local credential file is usable.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::credentials::{missing_fields, validate, CredentialBundle, CredentialFile};
use crate::errors::{ClaspSecretsError, Result};

/// What a successful verification found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub path: PathBuf,
    /// Access token expiry, when the file records one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl VerifyReport {
    /// Whether the access token has already expired at `now`.
    ///
    /// clasp refreshes expired tokens itself, so this is informational.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| t <= now)
    }
}

/// Check that `credentials` exists, parses, and has every mandatory field.
pub fn verify(credentials: &CredentialFile) -> Result<VerifyReport> {
    let raw = credentials.read_raw()?;

    if !validate(&raw) {
        return Err(match missing_fields(&raw) {
            Ok(missing) => ClaspSecretsError::IncompleteCredentials(missing.join(", ")),
            Err(e) => e,
        });
    }

    let expires_at = serde_json::from_str::<CredentialBundle>(&raw)
        .ok()
        .and_then(|b| b.token.expiry_date)
        .and_then(DateTime::<Utc>::from_timestamp_millis);

    Ok(VerifyReport {
        path: credentials.path().to_path_buf(),
        expires_at,
    })
}
