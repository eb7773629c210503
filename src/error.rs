//! Error type shared by loading and lookup

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Structural or type violation while loading. Fatal for the caller.
    #[error("Malformed config: {0}")]
    MalformedConfig(String),

    #[error("Unknown profile '{name}' (available: {})", available.join(", "))]
    UnknownProfile { name: String, available: Vec<String> },
}

impl ConfigError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedConfig(reason.into())
    }

    /// Malformed value at a dotted field path, e.g. `networks.development.port`.
    pub(crate) fn field(path: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedConfig(format!("{path}: {reason}"))
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
