//! Unified error types for mpn-match.
//!
//! Scoring itself never fails: absent input, unparseable specs and missing
//! metadata all degrade to a lower-confidence score. Errors only arise while
//! building registries or loading configuration, where a bad entry is a
//! programming or deployment mistake that should surface immediately.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mpn-match operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MpnMatchError {
    /// Errors while populating or overriding the metadata registry
    #[error("Metadata registry error: {context}")]
    Metadata {
        context: String,
        #[source]
        source: MetadataErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML (de)serialization errors
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific metadata registry error kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MetadataErrorKind {
    #[error("Unknown tolerance rule '{0}' (expected exact, case_insensitive, numeric[:cutoff] or equivalence:<table>)")]
    UnknownToleranceRule(String),

    #[error("Unknown component type '{0}'")]
    UnknownComponentType(String),

    #[error("Unknown importance '{0}' (expected critical, high, medium or low)")]
    UnknownImportance(String),

    #[error("Unknown similarity profile '{0}'")]
    UnknownProfile(String),

    #[error("Numeric cutoff {0} must be within [0.0, 1.0)")]
    InvalidCutoff(f64),

    #[error("Unknown equivalence table '{0}'")]
    UnknownEquivalenceTable(String),

    #[error("Equivalence group in table '{0}' has fewer than two members")]
    EmptyEquivalenceGroup(String),
}

/// Convenient Result type for mpn-match operations
pub type Result<T> = std::result::Result<T, MpnMatchError>;

impl MpnMatchError {
    /// Create a metadata error with context
    pub fn metadata(context: impl Into<String>, source: MetadataErrorKind) -> Self {
        Self::Metadata {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: format!("{source}"),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The metadata error kind, if this is a metadata error.
    #[must_use]
    pub const fn metadata_kind(&self) -> Option<&MetadataErrorKind> {
        match self {
            Self::Metadata { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MpnMatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_error_display() {
        let err = MpnMatchError::metadata(
            "registering RESISTOR.resistance",
            MetadataErrorKind::UnknownToleranceRule("fuzzy".to_string()),
        );
        let msg = err.to_string();
        assert!(msg.contains("RESISTOR.resistance"));
        assert_eq!(
            err.metadata_kind(),
            Some(&MetadataErrorKind::UnknownToleranceRule("fuzzy".to_string()))
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = MpnMatchError::io(
            "/nonexistent/.mpn-match.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        match err {
            MpnMatchError::Io { path, .. } => {
                assert_eq!(path, Some(PathBuf::from("/nonexistent/.mpn-match.yaml")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_error() {
        let err = MpnMatchError::config("bad profile");
        assert_eq!(err.to_string(), "Invalid configuration: bad profile");
        assert!(err.metadata_kind().is_none());
    }
}
