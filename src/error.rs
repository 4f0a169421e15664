use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Freshness cache misuse.
///
/// Absence of a fresh value is never an error; the only failure is a write
/// or lookup against a namespace that has no configured TTL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("no TTL configured for cache namespace '{namespace}' (key '{key}')")]
    UnknownNamespace { namespace: String, key: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_error_converts_into_crate_error() {
        let err: Error = CacheError::UnknownNamespace {
            namespace: "podium".into(),
            key: "podium:2024".into(),
        }
        .into();

        assert!(matches!(err, Error::Cache(_)));
        assert!(err.to_string().contains("podium:2024"));
    }

    #[test]
    fn config_error_display_names_field() {
        let err = ConfigError::InvalidValue {
            field: "dedup.capacity",
            reason: "must be greater than 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for dedup.capacity: must be greater than 0"
        );
    }
}
