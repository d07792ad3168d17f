//! Access to process environment variables and the host platform.
//!
//! Everything that would otherwise read `std::env` directly takes an
//! `EnvironmentProvider`, so tests can substitute a fixed environment
//! instead of mutating the real one.

use std::collections::HashMap;

/// Read-only view of environment variables plus the platform family.
pub trait EnvironmentProvider {
    /// Value of the variable `name`, or `None` if unset or not UTF-8.
    fn var(&self, name: &str) -> Option<String>;

    /// Whether paths should be built the Windows way.
    fn is_windows(&self) -> bool;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn is_windows(&self) -> bool {
        cfg!(windows)
    }
}

/// A fixed, in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    windows: bool,
}

impl MapEnvironment {
    /// An empty Unix-like environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty Windows-like environment.
    pub fn windows() -> Self {
        Self {
            windows: true,
            ..Self::default()
        }
    }

    /// Builder-style variable setter.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn is_windows(&self) -> bool {
        self.windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_returns_set_values() {
        let env = MapEnvironment::new().with("HOME", "/fake/home");
        assert_eq!(env.var("HOME").as_deref(), Some("/fake/home"));
        assert_eq!(env.var("USERPROFILE"), None);
        assert!(!env.is_windows());
    }

    #[test]
    fn windows_map_environment_reports_windows() {
        assert!(MapEnvironment::windows().is_windows());
    }
}
