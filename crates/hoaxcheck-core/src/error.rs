//! Error types for hoaxcheck

use crate::types::Domain;

/// Result type alias using hoaxcheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hoaxcheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A domain's model artifacts were missing or corrupt when loaded
    #[error("model unavailable for domain '{domain}': {reason}")]
    ModelUnavailable { domain: Domain, reason: String },

    /// No bundle is registered for the requested domain
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// Submitted text was blank
    #[error("input text is empty")]
    EmptyInput,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(domain: Domain, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            domain,
            reason: reason.into(),
        }
    }

    /// Create a new unknown-domain error
    pub fn unknown_domain(domain: impl Into<String>) -> Self {
        Self::UnknownDomain(domain.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable code for front-ends
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable { .. } => "model_unavailable",
            Self::UnknownDomain(_) => "unknown_domain",
            Self::EmptyInput => "empty_input",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = [
            Error::model_unavailable(Domain::News, "missing"),
            Error::unknown_domain("sports"),
            Error::EmptyInput,
            Error::config("bad yaml"),
        ];
        let kinds: Vec<_> = errors.iter().map(Error::kind).collect();
        assert_eq!(
            kinds,
            vec!["model_unavailable", "unknown_domain", "empty_input", "config"]
        );
    }

    #[test]
    fn test_model_unavailable_message() {
        let err = Error::model_unavailable(Domain::Social, "vocabulary size mismatch");
        assert_eq!(
            err.to_string(),
            "model unavailable for domain 'social': vocabulary size mismatch"
        );
    }
}
