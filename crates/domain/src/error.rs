//! Domain error type.

use thiserror::Error;

/// Failure to read an option value or identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Used by the `FromStr` impls of the option enums.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown logic mode: xor");
        assert!(matches!(err, DomainError::Parse(_)));
        assert_eq!(err.to_string(), "Parse error: Unknown logic mode: xor");
    }
}
