//! Serde types mirroring the JSON layout `clasp login` writes.
//!
//! Every field is optional when reading so a partially filled file still
//! parses; completeness is judged separately by [`super::validate`].
//! When writing, absent strings are omitted and a missing `expiry_date`
//! is written as `null`, which is what the CI seeding step has always
//! produced.

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentProvider;

/// OAuth token section of `.clasprc.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    /// Expiry as epoch milliseconds.
    #[serde(default)]
    pub expiry_date: Option<i64>,
}

/// OAuth client registration used to refresh the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2ClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

/// The whole credential set for clasp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    #[serde(default)]
    pub token: Token,

    #[serde(default, rename = "oauth2ClientSettings")]
    pub oauth2_client_settings: OAuth2ClientSettings,

    #[serde(default)]
    pub is_local_creds: bool,
}

impl CredentialBundle {
    /// Build a bundle from the `CLASP_*` variables used by CI seeding.
    ///
    /// `CLASP_EXPIRY_DATE` is parsed as an integer. Set but blank means
    /// `0`; unset or unparseable leaves the expiry `null`.
    /// `CLASP_IS_LOCAL_CREDS` is true only for the exact string `"true"`.
    pub fn from_env(env: &dyn EnvironmentProvider) -> Self {
        Self {
            token: Token {
                access_token: env.var("CLASP_ACCESS_TOKEN"),
                refresh_token: env.var("CLASP_REFRESH_TOKEN"),
                scope: env.var("CLASP_SCOPE"),
                token_type: env.var("CLASP_TOKEN_TYPE"),
                id_token: env.var("CLASP_ID_TOKEN"),
                expiry_date: env.var("CLASP_EXPIRY_DATE").and_then(|v| parse_expiry(&v)),
            },
            oauth2_client_settings: OAuth2ClientSettings {
                client_id: env.var("CLASP_CLIENT_ID"),
                client_secret: env.var("CLASP_CLIENT_SECRET"),
                redirect_uri: env.var("CLASP_REDIRECT_URI"),
            },
            is_local_creds: env.var("CLASP_IS_LOCAL_CREDS").as_deref() == Some("true"),
        }
    }
}

fn parse_expiry(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}
