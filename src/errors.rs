use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in clasp-secrets.
#[derive(Debug, Error)]
pub enum ClaspSecretsError {
    // --- Credential file errors ---
    #[error("No .clasprc.json found at {0}. Run `clasp login` first.")]
    FileNotFound(PathBuf),

    #[error("Invalid .clasprc.json format: {0}")]
    MalformedJson(String),

    #[error("Credentials are incomplete — missing {0}")]
    IncompleteCredentials(String),

    #[error("Invalid base64 payload: {0}")]
    MalformedPayload(String),

    // --- Repository access errors ---
    #[error("Repository \"{0}\" does not exist")]
    RepoNotFound(String),

    #[error("No push permission for repository \"{0}\"")]
    PermissionDenied(String),

    #[error("Could not check access to repository \"{0}\"")]
    UnknownAccessError(String),

    #[error("Invalid repository \"{0}\" — expected owner/name")]
    InvalidRepo(String),

    // --- External CLI errors ---
    #[error("External command failed: {0}")]
    ExternalCommandFailure(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for clasp-secrets results.
pub type Result<T> = std::result::Result<T, ClaspSecretsError>;
