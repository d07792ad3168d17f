//! Locating, reading, and writing `~/.clasprc.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::bundle::CredentialBundle;
use crate::environment::EnvironmentProvider;
use crate::errors::{ClaspSecretsError, Result};

/// File name clasp stores its credentials under.
pub const CLASPRC_FILE_NAME: &str = ".clasprc.json";

/// Resolve the credential file path from the home directory variable.
///
/// `USERPROFILE` is used on Windows hosts and `HOME` everywhere else. An
/// unset home yields the bare file name, i.e. a path relative to the
/// working directory.
pub fn locate(env: &dyn EnvironmentProvider) -> PathBuf {
    let home_var = if env.is_windows() { "USERPROFILE" } else { "HOME" };
    let home = env.var(home_var).unwrap_or_default();

    if home.is_empty() {
        return PathBuf::from(CLASPRC_FILE_NAME);
    }

    if env.is_windows() {
        // Built by hand so the result does not depend on the host's separator.
        let sep = if home.ends_with(['\\', '/']) { "" } else { "\\" };
        return PathBuf::from(format!("{home}{sep}{CLASPRC_FILE_NAME}"));
    }

    Path::new(&home).join(CLASPRC_FILE_NAME)
}

/// Handle to the credential file on disk.
#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The credential file at its well-known location.
    pub fn locate(env: &dyn EnvironmentProvider) -> Self {
        Self::new(locate(env))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the file contents verbatim.
    ///
    /// The buffer is wiped from memory on drop.
    pub fn read_raw(&self) -> Result<Zeroizing<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Zeroizing::new(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ClaspSecretsError::FileNotFound(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read and parse the file into a [`CredentialBundle`].
    pub fn read(&self) -> Result<CredentialBundle> {
        let raw = self.read_raw()?;
        serde_json::from_str(&raw).map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))
    }

    /// Write `bundle` as pretty-printed JSON (2-space indent).
    ///
    /// On Unix the file is restricted to the owner.
    pub fn write(&self, bundle: &CredentialBundle) -> Result<()> {
        let content = Zeroizing::new(
            serde_json::to_string_pretty(bundle)
                .map_err(|e| ClaspSecretsError::MalformedJson(e.to_string()))?,
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, content.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %self.path.display(), "wrote credential file");
        Ok(())
    }
}
