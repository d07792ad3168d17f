//! Library-level tests for the credential transfer workflow, driving the
//! public API with an in-memory `CommandRunner` and environment.

use std::cell::RefCell;
use std::fs;

use clasp_secrets::credentials::{self, CredentialBundle, CredentialFile};
use clasp_secrets::encoder::SecretEncoder;
use clasp_secrets::environment::MapEnvironment;
use clasp_secrets::errors::{ClaspSecretsError, Result};
use clasp_secrets::gh::{CommandOutput, CommandRunner, OutputMode};
use clasp_secrets::transcode;
use clasp_secrets::transfer::{self, SecretTransfer, Stage};
use tempfile::TempDir;

/// Runner that answers like `gh` for a pushable repository and records
/// (command line, stdin) pairs.
#[derive(Default)]
struct ScriptedGh {
    calls: RefCell<Vec<(String, Option<String>)>>,
    remote_secrets: Vec<&'static str>,
}

impl CommandRunner for ScriptedGh {
    fn run(&self, args: &[&str], stdin: Option<&str>, _mode: OutputMode) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((args.join(" "), stdin.map(str::to_string)));

        let stdout = match args {
            ["api", ..] => r#"{"permissions":{"push":true}}"#.to_string(),
            ["secret", "list", ..] => {
                let entries: Vec<_> = self
                    .remote_secrets
                    .iter()
                    .map(|n| format!(r#"{{"name":"{n}"}}"#))
                    .collect();
                format!("[{}]", entries.join(","))
            }
            _ => String::new(),
        };

        Ok(CommandOutput {
            stdout,
            stderr: String::new(),
            exit_code: Some(0),
        })
    }
}

/// Seed a fake home directory the way CI does, returning its environment.
fn seeded_home(dir: &TempDir) -> MapEnvironment {
    let env = MapEnvironment::new()
        .with("HOME", dir.path().to_str().unwrap())
        .with("CLASP_ACCESS_TOKEN", "ya29.token")
        .with("CLASP_REFRESH_TOKEN", "1//refresh")
        .with("CLASP_CLIENT_ID", "client.apps.googleusercontent.com")
        .with("CLASP_CLIENT_SECRET", "shh")
        .with("CLASP_EXPIRY_DATE", "1700000000000")
        .with("CLASP_IS_LOCAL_CREDS", "false");

    CredentialFile::locate(&env)
        .write(&CredentialBundle::from_env(&env))
        .unwrap();
    env
}

// ---------------------------------------------------------------------------
// Seed → verify → upload
// ---------------------------------------------------------------------------

#[test]
fn seeded_file_verifies() {
    let dir = TempDir::new().unwrap();
    let env = seeded_home(&dir);

    let file = CredentialFile::locate(&env);
    assert_eq!(file.path(), dir.path().join(".clasprc.json"));

    let report = transfer::verify(&file).unwrap();
    assert!(report.expires_at.is_some());
}

#[test]
fn single_blob_round_trips_through_the_secret() {
    let dir = TempDir::new().unwrap();
    let env = seeded_home(&dir);
    let file = CredentialFile::locate(&env);
    let gh = ScriptedGh::default();

    let mut t = SecretTransfer::new(&gh, SecretEncoder::SingleBlob, "owner/repo");
    t.check_access().unwrap();
    t.confirm(true).unwrap();
    t.upload(&file).unwrap();

    let calls = gh.calls.borrow();
    let (line, stdin) = &calls[1];
    assert_eq!(line, "secret set CLASPRC_JSON -R owner/repo");

    // What CI would decode must be a valid credential file again.
    let restored = transcode::decode(stdin.as_deref().unwrap()).unwrap();
    assert!(credentials::validate(&restored));
    let original = fs::read_to_string(file.path()).unwrap();
    assert_eq!(restored, transcode::normalize(&original).unwrap());
}

#[test]
fn field_by_field_skips_unset_optional_fields() {
    let dir = TempDir::new().unwrap();
    let env = seeded_home(&dir);
    let gh = ScriptedGh::default();

    let mut t = SecretTransfer::new(&gh, SecretEncoder::FieldByField, "owner/repo");
    t.check_access().unwrap();
    t.confirm(true).unwrap();
    let report = t.upload(&CredentialFile::locate(&env)).unwrap();

    // scope, token_type, id_token and redirect_uri were never set.
    assert_eq!(report.uploaded.len(), 6);
    assert_eq!(report.skipped.len(), 4);
    assert!(report.uploaded.contains(&"CLASP_IS_LOCAL_CREDS"));

    let calls = gh.calls.borrow();
    let expiry = calls
        .iter()
        .find(|(line, _)| line.starts_with("secret set CLASP_EXPIRY_DATE"))
        .unwrap();
    assert_eq!(expiry.1.as_deref(), Some("1700000000000"));
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn upload_without_credentials_never_sets() {
    let dir = TempDir::new().unwrap();
    let env = MapEnvironment::new().with("HOME", dir.path().to_str().unwrap());
    let gh = ScriptedGh::default();

    let mut t = SecretTransfer::new(&gh, SecretEncoder::SingleBlob, "owner/repo");
    t.check_access().unwrap();
    t.confirm(true).unwrap();
    let result = t.upload(&CredentialFile::locate(&env));

    assert!(matches!(result, Err(ClaspSecretsError::FileNotFound(_))));
    assert_eq!(t.stage(), Stage::Aborted);
    assert!(gh
        .calls
        .borrow()
        .iter()
        .all(|(line, _)| !line.starts_with("secret set")));
}

#[test]
fn list_reports_one_match() {
    let gh = ScriptedGh {
        remote_secrets: vec!["CLASPRC_JSON", "OTHER"],
        ..ScriptedGh::default()
    };

    let mut t = SecretTransfer::new(&gh, SecretEncoder::SingleBlob, "owner/repo");
    t.check_access().unwrap();
    let report = t.list().unwrap();

    assert_eq!(report.found, vec!["CLASPRC_JSON".to_string()]);
}

#[test]
fn windows_home_resolution() {
    let env = MapEnvironment::windows().with("USERPROFILE", r"C:\Users\fake");
    assert_eq!(
        credentials::locate(&env),
        std::path::PathBuf::from(r"C:\Users\fake\.clasprc.json")
    );
}
