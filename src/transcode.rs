//! Canonical JSON and base64 helpers for pushing credentials through
//! `gh secret set`, which reads the secret value from stdin as text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::errors::{ClaspSecretsError, Result};

/// Re-serialize JSON text compactly on a single line.
///
/// Key order is kept as written. Fails with `MalformedJson` if `raw`
/// does not parse.
pub fn normalize(raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))
}

/// Standard (padded) base64 of the UTF-8 bytes of `text`.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Inverse of [`encode`].
pub fn decode(b64: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(b64.trim())
        .map_err(|e| ClaspSecretsError::MalformedPayload(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClaspSecretsError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_newlines() {
        let raw = "\n  {\n  \"token\": {\n    \"access_token\": \"a b\"\n  },\n  \"isLocalCreds\": true\n}\n";
        assert_eq!(
            normalize(raw).unwrap(),
            r#"{"token":{"access_token":"a b"},"isLocalCreds":true}"#
        );
    }

    #[test]
    fn normalize_keeps_key_order() {
        assert_eq!(normalize(r#"{"z": 1, "a": 2}"#).unwrap(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            r#"{ "a": [1, 2, {"b": null}], "c": "d" }"#,
            "  [ ]  ",
            "\"text\"",
            "3.5",
        ] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn normalize_rejects_malformed_json() {
        assert!(matches!(
            normalize("invalid json{"),
            Err(ClaspSecretsError::MalformedJson(_))
        ));
    }

    #[test]
    fn encode_matches_known_value() {
        assert_eq!(encode("{\"a\":1}"), "eyJhIjoxfQ==");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn decode_reverses_encode_for_unicode() {
        for s in ["", "plain", "日本語のテキスト", "emoji 🔐 and\nnewline"] {
            assert_eq!(decode(&encode(s)).unwrap(), s);
        }
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        assert!(matches!(
            decode("not base64!!"),
            Err(ClaspSecretsError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_rejects_non_utf8() {
        let b64 = STANDARD.encode([0xff, 0xfe]);
        assert!(matches!(
            decode(&b64),
            Err(ClaspSecretsError::MalformedPayload(_))
        ));
    }
}
