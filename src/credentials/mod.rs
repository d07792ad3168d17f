//! The clasp credential bundle and the `~/.clasprc.json` file that holds it.

pub mod bundle;
pub mod file;
pub mod validate;

pub use bundle::{CredentialBundle, OAuth2ClientSettings, Token};
pub use file::{locate, CredentialFile, CLASPRC_FILE_NAME};
pub use validate::{missing_fields, validate};
