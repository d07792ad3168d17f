//! Structural completeness check for credential JSON.

use serde_json::Value;

use crate::errors::{ClaspSecretsError, Result};

/// Fields that must be non-empty strings, as (section, key).
pub const REQUIRED_FIELDS: [(&str, &str); 4] = [
    ("token", "access_token"),
    ("token", "refresh_token"),
    ("oauth2ClientSettings", "clientId"),
    ("oauth2ClientSettings", "clientSecret"),
];

/// Whether `raw` is JSON carrying all mandatory credential fields.
///
/// Never fails: anything that does not parse is simply invalid.
pub fn validate(raw: &str) -> bool {
    missing_fields(raw).is_ok_and(|missing| missing.is_empty())
}

/// Dotted names of mandatory fields that are absent or empty.
///
/// Fails with `MalformedJson` when `raw` is not JSON at all.
pub fn missing_fields(raw: &str) -> Result<Vec<String>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))?;

    Ok(REQUIRED_FIELDS
        .iter()
        .filter(|(section, key)| {
            !value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        })
        .map(|(section, key)| format!("{section}.{key}"))
        .collect())
}
