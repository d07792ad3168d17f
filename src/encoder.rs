//! How a credential file is laid out in the repository's secret store.
//!
//! - `single-blob`: the whole file, compacted and base64-encoded, in one
//!   secret named `CLASPRC_JSON`.
//! - `field-by-field`: ten `CLASP_*` secrets, one per credential field,
//!   matching the variables the CI seeding step reads back.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::credentials::missing_fields;
use crate::errors::{ClaspSecretsError, Result};
use crate::gh::RepoFlag;
use crate::transcode;

/// Secret holding the base64 blob.
pub const CLASPRC_SECRET: &str = "CLASPRC_JSON";

/// Per-field secret names, in upload order.
pub const FIELD_SECRETS: [&str; 10] = [
    "CLASP_ACCESS_TOKEN",
    "CLASP_REFRESH_TOKEN",
    "CLASP_CLIENT_ID",
    "CLASP_CLIENT_SECRET",
    "CLASP_REDIRECT_URI",
    "CLASP_SCOPE",
    "CLASP_TOKEN_TYPE",
    "CLASP_ID_TOKEN",
    "CLASP_EXPIRY_DATE",
    "CLASP_IS_LOCAL_CREDS",
];

/// Secret layout strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SecretEncoder {
    #[default]
    SingleBlob,
    FieldByField,
}

/// One secret ready to be sent.
pub struct EncodedSecret {
    pub name: &'static str,
    pub value: Zeroizing<String>,
}

/// Result of encoding a credential file.
pub struct Encoded {
    pub secrets: Vec<EncodedSecret>,
    /// Optional fields that were absent and will not be uploaded.
    pub skipped: Vec<&'static str>,
}

impl SecretEncoder {
    /// Every secret name this strategy may write.
    pub fn secret_names(self) -> &'static [&'static str] {
        match self {
            Self::SingleBlob => &[CLASPRC_SECRET],
            Self::FieldByField => &FIELD_SECRETS,
        }
    }

    pub fn repo_flag(self) -> RepoFlag {
        match self {
            Self::SingleBlob => RepoFlag::Short,
            Self::FieldByField => RepoFlag::ActionsApp,
        }
    }

    /// Turn raw `.clasprc.json` text into the secrets to upload.
    ///
    /// Nothing is returned unless the whole file encodes cleanly.
    pub fn encode(self, raw: &str) -> Result<Encoded> {
        match self {
            Self::SingleBlob => {
                let compact = Zeroizing::new(transcode::normalize(raw)?);
                Ok(Encoded {
                    secrets: vec![EncodedSecret {
                        name: CLASPRC_SECRET,
                        value: Zeroizing::new(transcode::encode(&compact)),
                    }],
                    skipped: Vec::new(),
                })
            }
            Self::FieldByField => encode_fields(raw),
        }
    }
}

impl std::fmt::Display for SecretEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SingleBlob => "single-blob",
            Self::FieldByField => "field-by-field",
        })
    }
}

/// JSON path of each value in [`FIELD_SECRETS`], same order.
const FIELD_PATHS: [&[&str]; 10] = [
    &["token", "access_token"],
    &["token", "refresh_token"],
    &["oauth2ClientSettings", "clientId"],
    &["oauth2ClientSettings", "clientSecret"],
    &["oauth2ClientSettings", "redirectUri"],
    &["token", "scope"],
    &["token", "token_type"],
    &["token", "id_token"],
    &["token", "expiry_date"],
    &["isLocalCreds"],
];

fn encode_fields(raw: &str) -> Result<Encoded> {
    let missing = missing_fields(raw)?;
    if !missing.is_empty() {
        return Err(ClaspSecretsError::IncompleteCredentials(missing.join(", ")));
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))?;

    let mut encoded = Encoded {
        secrets: Vec::with_capacity(FIELD_SECRETS.len()),
        skipped: Vec::new(),
    };
    for (name, path) in FIELD_SECRETS.into_iter().zip(FIELD_PATHS) {
        match field_text(&value, path) {
            Some(v) if !v.is_empty() => encoded.secrets.push(EncodedSecret {
                name,
                value: Zeroizing::new(v),
            }),
            _ => encoded.skipped.push(name),
        }
    }

    Ok(encoded)
}

/// Secret text for the value at `path`, whatever its JSON type.
/// Strings are taken verbatim; null and missing values yield `None`.
fn field_text(root: &Value, path: &[&str]) -> Option<String> {
    let value = path.iter().try_fold(root, |v, key| v.get(key))?;
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
