//! Repository existence and push-permission check.
//!
//! `gh api repos/<owner>/<name>` returns the repository JSON, whose
//! `permissions.push` tells us whether secrets can be written. Failures
//! are classified by looking for HTTP status codes in the error text; a
//! 403 means the repository exists but cannot be pushed to.

use serde_json::Value;

use super::{CommandRunner, OutputMode};
use crate::cli::output;
use crate::errors::{ClaspSecretsError, Result};

/// Why an access check did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorReason {
    None,
    NotFound,
    PermissionDenied,
    Unknown,
}

/// Outcome of one access query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryAccess {
    pub exists: bool,
    pub can_push: bool,
    pub error_reason: AccessErrorReason,
}

impl RepositoryAccess {
    /// Access derived from a successful metadata response.
    pub fn from_permissions(can_push: bool) -> Self {
        Self {
            exists: true,
            can_push,
            error_reason: AccessErrorReason::None,
        }
    }

    /// Classify a failed query by its error text.
    pub fn from_failure(message: &str) -> Self {
        if message.contains("404") {
            Self {
                exists: false,
                can_push: false,
                error_reason: AccessErrorReason::NotFound,
            }
        } else if message.contains("403") {
            Self {
                exists: true,
                can_push: false,
                error_reason: AccessErrorReason::PermissionDenied,
            }
        } else {
            Self {
                exists: false,
                can_push: false,
                error_reason: AccessErrorReason::Unknown,
            }
        }
    }

    /// Whether secrets may be written to the repository.
    pub fn granted(&self) -> bool {
        self.exists && self.can_push
    }

    /// Turn a denied result into the matching error.
    pub fn ensure(&self, repo: &str) -> Result<()> {
        if self.granted() {
            return Ok(());
        }
        Err(match (self.exists, self.error_reason) {
            (false, AccessErrorReason::Unknown) => {
                ClaspSecretsError::UnknownAccessError(repo.to_string())
            }
            (false, _) => ClaspSecretsError::RepoNotFound(repo.to_string()),
            (true, _) => ClaspSecretsError::PermissionDenied(repo.to_string()),
        })
    }
}

/// Query `repo` (`owner/name`) and classify the outcome.
pub fn check_access(runner: &dyn CommandRunner, repo: &str) -> RepositoryAccess {
    let endpoint = format!("repos/{repo}");
    let message = match runner.run(&["api", &endpoint], None, OutputMode::Capture) {
        Ok(out) if out.success() => match serde_json::from_str::<Value>(&out.stdout) {
            Ok(data) => {
                let can_push = data
                    .get("permissions")
                    .and_then(|p| p.get("push"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                return RepositoryAccess::from_permissions(can_push);
            }
            Err(e) => e.to_string(),
        },
        Ok(out) => out.failure_message(),
        Err(e) => e.to_string(),
    };

    let access = RepositoryAccess::from_failure(&message);
    tracing::debug!(repo, reason = ?access.error_reason, %message, "repository access check failed");
    access
}

/// Pre-flight gate shared by every repository operation: query `repo`
/// and fail unless it exists and can be pushed to.
pub fn require_access(runner: &dyn CommandRunner, repo: &str) -> Result<RepositoryAccess> {
    let access = check_access(runner, repo);
    access.ensure(repo)?;
    Ok(access)
}

/// [`require_access`] for callers that want a yes/no answer: prints why
/// access is missing and returns `false`.
pub fn validate_access(runner: &dyn CommandRunner, repo: &str) -> bool {
    match require_access(runner, repo) {
        Ok(_) => true,
        Err(e) => {
            output::error(&e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gh::fake::{failed, ok, spawn_error, FakeRunner};

    #[test]
    fn push_true_is_granted() {
        let runner = FakeRunner::new(|_| ok(r#"{"permissions":{"push":true}}"#));
        let access = check_access(&runner, "owner/repo");

        assert_eq!(access, RepositoryAccess::from_permissions(true));
        assert!(access.granted());
        assert_eq!(runner.lines(), vec!["api repos/owner/repo"]);
    }

    #[test]
    fn push_false_exists_without_push() {
        let runner = FakeRunner::new(|_| ok(r#"{"permissions":{"push":false}}"#));
        let access = check_access(&runner, "owner/repo");

        assert!(access.exists);
        assert!(!access.can_push);
        assert_eq!(access.error_reason, AccessErrorReason::None);
    }

    #[test]
    fn missing_permissions_means_no_push() {
        let runner = FakeRunner::new(|_| ok(r#"{"full_name":"owner/repo"}"#));
        let access = check_access(&runner, "owner/repo");
        assert_eq!(access, RepositoryAccess::from_permissions(false));
    }

    #[test]
    fn http_404_is_not_found() {
        let runner = FakeRunner::new(|_| failed(1, "gh: Not Found (HTTP 404)"));
        let access = check_access(&runner, "owner/repo");

        assert_eq!(
            access,
            RepositoryAccess {
                exists: false,
                can_push: false,
                error_reason: AccessErrorReason::NotFound,
            }
        );
    }

    #[test]
    fn http_403_exists_but_denied() {
        let runner = FakeRunner::new(|_| failed(1, "gh: Forbidden (HTTP 403)"));
        let access = check_access(&runner, "owner/repo");

        assert_eq!(
            access,
            RepositoryAccess {
                exists: true,
                can_push: false,
                error_reason: AccessErrorReason::PermissionDenied,
            }
        );
    }

    #[test]
    fn gh_not_installed_is_unknown() {
        let runner = FakeRunner::new(|_| spawn_error("gh: command not found"));
        let access = check_access(&runner, "owner/repo");

        assert!(!access.exists);
        assert_eq!(access.error_reason, AccessErrorReason::Unknown);
    }

    #[test]
    fn unparseable_response_is_unknown() {
        let runner = FakeRunner::new(|_| ok("<html>"));
        let access = check_access(&runner, "owner/repo");
        assert_eq!(access.error_reason, AccessErrorReason::Unknown);
    }

    #[test]
    fn not_found_wins_when_both_codes_appear() {
        let access = RepositoryAccess::from_failure("HTTP 403 then HTTP 404");
        assert_eq!(access.error_reason, AccessErrorReason::NotFound);
    }

    #[test]
    fn ensure_maps_each_outcome_to_its_error() {
        let repo = "owner/repo";
        assert!(RepositoryAccess::from_permissions(true).ensure(repo).is_ok());
        assert!(matches!(
            RepositoryAccess::from_permissions(false).ensure(repo),
            Err(ClaspSecretsError::PermissionDenied(_))
        ));
        assert!(matches!(
            RepositoryAccess::from_failure("HTTP 404").ensure(repo),
            Err(ClaspSecretsError::RepoNotFound(_))
        ));
        assert!(matches!(
            RepositoryAccess::from_failure("HTTP 403").ensure(repo),
            Err(ClaspSecretsError::PermissionDenied(_))
        ));
        assert!(matches!(
            RepositoryAccess::from_failure("timeout").ensure(repo),
            Err(ClaspSecretsError::UnknownAccessError(_))
        ));
    }

    #[test]
    fn require_access_returns_granted_access() {
        let runner = FakeRunner::new(|_| ok(r#"{"permissions":{"push":true}}"#));
        let access = require_access(&runner, "owner/repo").unwrap();
        assert!(access.granted());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn require_access_fails_with_classified_error() {
        let runner = FakeRunner::new(|_| failed(1, "gh: Not Found (HTTP 404)"));
        assert!(matches!(
            require_access(&runner, "owner/gone"),
            Err(ClaspSecretsError::RepoNotFound(_))
        ));
    }

    #[test]
    fn validate_access_returns_bool() {
        let granted = FakeRunner::new(|_| ok(r#"{"permissions":{"push":true}}"#));
        assert!(validate_access(&granted, "owner/repo"));

        let denied = FakeRunner::new(|_| ok(r#"{"permissions":{"push":false}}"#));
        assert!(!validate_access(&denied, "owner/repo"));

        let missing = FakeRunner::new(|_| failed(1, "HTTP 404"));
        assert!(!validate_access(&missing, "owner/repo"));
    }
}
