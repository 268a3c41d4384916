//! Error types
//!
//! The simulation itself never fails; errors only come from startup
//! validation and from reading/writing the small JSON files we persist.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid gameplay configuration, detected once at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name}: range minimum {min} is greater than maximum {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("{name} must be greater than zero")]
    NonPositive { name: &'static str },
    #[error("{name} must be zero or greater")]
    Negative { name: &'static str },
    #[error("a session needs at least one life")]
    ZeroLives,
}

/// Failure reading or writing persisted options / high scores
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for the native driver
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidRange {
            name: "enemy_spawn_count",
            min: 3.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "enemy_spawn_count: range minimum 3 is greater than maximum 1"
        );
    }

    #[test]
    fn test_error_from_config() {
        let err: Error = ConfigError::ZeroLives.into();
        assert!(matches!(err, Error::Config(ConfigError::ZeroLives)));
    }
}
