//! Moving credentials into and out of a repository's secret store.
//!
//! A [`SecretTransfer`] runs one operation against one repository and
//! walks through explicit stages:
//!
//! ```text
//! Idle ──check_access──▶ AccessChecked ──confirm(true)──▶ Confirmed ──upload/delete──▶ Completed
//!   │                         │  └──────────list─────────────────────────────────────▶ Completed
//!   └──denied──▶ Aborted      └──confirm(false)──▶ Aborted
//! ```
//!
//! Any failure along the way moves to `Aborted`. Nothing that was already
//! sent is rolled back.

pub mod verify;

use crate::credentials::CredentialFile;
use crate::encoder::SecretEncoder;
use crate::errors::{ClaspSecretsError, Result};
use crate::gh::{self, CommandRunner, RepositoryAccess};

pub use verify::{verify, VerifyReport};

/// Where a transfer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    AccessChecked,
    Confirmed,
    Completed,
    Aborted,
}

/// Secrets written by [`SecretTransfer::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<&'static str>,
    /// Optional fields that had no value and were not sent.
    pub skipped: Vec<&'static str>,
}

/// Outcome of [`SecretTransfer::delete`]; failures are not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<&'static str>,
    /// Secret name and the reason its deletion failed.
    pub failed: Vec<(&'static str, String)>,
}

/// Outcome of [`SecretTransfer::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListReport {
    /// Names the current encoding strategy manages.
    pub expected: &'static [&'static str],
    /// Those of `expected` present in the repository.
    pub found: Vec<String>,
}

impl ListReport {
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.expected.len()
    }
}

/// One credential operation against one repository.
pub struct SecretTransfer<'a> {
    runner: &'a dyn CommandRunner,
    encoder: SecretEncoder,
    repo: String,
    stage: Stage,
}

impl<'a> SecretTransfer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, encoder: SecretEncoder, repo: &str) -> Self {
        Self {
            runner,
            encoder,
            repo: repo.to_string(),
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn encoder(&self) -> SecretEncoder {
        self.encoder
    }

    /// Make sure the repository exists and can be pushed to.
    pub fn check_access(&mut self) -> Result<RepositoryAccess> {
        self.expect_stage(&[Stage::Idle], "check access")?;

        let result = gh::require_access(self.runner, &self.repo);
        self.advance(result, Stage::AccessChecked)
    }

    /// Record the user's answer to the confirmation prompt.
    ///
    /// Returns whether the transfer may proceed.
    pub fn confirm(&mut self, approved: bool) -> Result<bool> {
        self.expect_stage(&[Stage::AccessChecked], "confirm")?;
        self.stage = if approved {
            Stage::Confirmed
        } else {
            Stage::Aborted
        };
        Ok(approved)
    }

    /// Read `credentials`, encode them, and set the secrets.
    ///
    /// The file is read and fully encoded before the first `gh secret set`.
    pub fn upload(&mut self, credentials: &CredentialFile) -> Result<UploadReport> {
        self.expect_stage(&[Stage::Confirmed], "upload")?;
        let result = self.upload_inner(credentials);
        self.advance(result, Stage::Completed)
    }

    fn upload_inner(&self, credentials: &CredentialFile) -> Result<UploadReport> {
        let raw = credentials.read_raw()?;
        let encoded = self.encoder.encode(&raw)?;

        let mut uploaded = Vec::with_capacity(encoded.secrets.len());
        for secret in &encoded.secrets {
            gh::set_secret(
                self.runner,
                &self.repo,
                secret.name,
                &secret.value,
                self.encoder.repo_flag(),
            )?;
            tracing::info!(repo = %self.repo, secret = secret.name, "secret set");
            uploaded.push(secret.name);
        }

        Ok(UploadReport {
            uploaded,
            skipped: encoded.skipped,
        })
    }

    /// Delete every secret the encoding strategy manages.
    ///
    /// A failed delete is recorded and the rest still run; the secret may
    /// simply not exist.
    pub fn delete(&mut self) -> Result<DeleteReport> {
        self.expect_stage(&[Stage::Confirmed], "delete")?;

        let mut report = DeleteReport {
            deleted: Vec::new(),
            failed: Vec::new(),
        };
        for &name in self.encoder.secret_names() {
            match gh::delete_secret(self.runner, &self.repo, name, self.encoder.repo_flag()) {
                Ok(()) => report.deleted.push(name),
                Err(e) => {
                    tracing::warn!(repo = %self.repo, secret = name, error = %e, "secret delete failed");
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        self.stage = Stage::Completed;
        Ok(report)
    }

    /// Which managed secrets exist in the repository.
    pub fn list(&mut self) -> Result<ListReport> {
        self.expect_stage(&[Stage::AccessChecked, Stage::Confirmed], "list")?;

        let expected = self.encoder.secret_names();
        let result = gh::list_secret_names(self.runner, &self.repo).map(|names| ListReport {
            expected,
            found: names
                .into_iter()
                .filter(|n| expected.iter().any(|e| *e == n.as_str()))
                .collect(),
        });
        self.advance(result, Stage::Completed)
    }

    fn expect_stage(&self, allowed: &[Stage], operation: &str) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(ClaspSecretsError::CommandFailed(format!(
                "cannot {operation} while transfer is {:?}",
                self.stage
            )))
        }
    }

    fn advance<T>(&mut self, result: Result<T>, next: Stage) -> Result<T> {
        self.stage = if result.is_ok() { next } else { Stage::Aborted };
        result
    }
}
