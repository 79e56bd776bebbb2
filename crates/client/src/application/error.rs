//! Service layer error types
//!
//! This module defines errors that can occur in the application service layer,
//! abstracting over transport-specific errors.

use thiserror::Error;

use crate::ports::outbound::ApiError;

/// Errors that can occur in service operations
///
/// `Clone` so a single in-flight fetch can hand its result to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Transport or HTTP failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Cached or fetched data did not match the expected type
    #[error("Failed to decode data: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Check if this is an authorization error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Api(ApiError::Unauthorized))
    }
}

/// Default request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_api_errors() {
        let err: ServiceError = ApiError::NotFound("/quests/q9".to_string()).into();
        assert!(!err.is_unauthorized());

        let err: ServiceError = ApiError::Unauthorized.into();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Not signed in or not allowed");
    }
}
