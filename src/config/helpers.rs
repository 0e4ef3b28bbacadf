//! Small typed wrappers over `std::env` used by the config loaders.

use crate::error::ConfigError;

/// Read a variable, treating unset and whitespace-only as absent.
pub fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(_) => None,
    }
}

pub fn require_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_owned(),
    })
}
