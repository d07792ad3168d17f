//! Project configuration (`.clasp-secrets.toml`).

pub mod settings;

pub use settings::Settings;
