//! Unified error handling for the ISUPPORT subsystem.
//!
//! Per-token and per-contributor failures are recovered inside a rebuild and
//! only show up as diagnostics; the errors here are what crosses module
//! boundaries.

use slirc_isupport::{TokenError, ValueError};
use thiserror::Error;

// ============================================================================
// Contributor Errors (token collection)
// ============================================================================

/// Errors a contributor may return from `collect_tokens`.
///
/// Any of these aborts only the failing contributor; its tokens for this
/// rebuild are discarded and the rest of the rebuild continues.
#[derive(Debug, Error)]
pub enum ContributorError {
    #[error("invalid token: {0}")]
    Token(#[from] TokenError),

    #[error("invalid value: {0}")]
    Value(#[from] ValueError),

    #[error("contributor panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

impl ContributorError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Token(_) => "invalid_token",
            Self::Value(_) => "invalid_value",
            Self::Panicked(_) => "panicked",
            Self::Failed(_) => "failed",
        }
    }
}

// ============================================================================
// Cache Errors (snapshot access)
// ============================================================================

/// Errors surfaced to the host by the snapshot cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsupportError {
    /// `send_to` ran before the boot-time rebuild. This is an ordering bug in
    /// the host, not a client-visible condition.
    #[error("ISUPPORT requested before the first rebuild")]
    NotBuilt,
}

impl IsupportError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotBuilt => "not_built",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_error_codes() {
        assert_eq!(ContributorError::Failed("x".into()).error_code(), "failed");
        assert_eq!(ContributorError::Panicked("x".into()).error_code(), "panicked");
        assert_eq!(
            ContributorError::from(TokenError::EmptyName).error_code(),
            "invalid_token"
        );
        assert_eq!(
            ContributorError::from(ValueError::DuplicateInInput('k')).error_code(),
            "invalid_value"
        );
    }

    #[test]
    fn test_contributor_error_display() {
        let err = ContributorError::from(TokenError::EmptyName);
        assert_eq!(err.to_string(), "invalid token: token name is empty");
        assert_eq!(
            ContributorError::Failed("backend offline".into()).to_string(),
            "backend offline"
        );
    }

    #[test]
    fn test_isupport_error() {
        assert_eq!(IsupportError::NotBuilt.error_code(), "not_built");
        assert!(IsupportError::NotBuilt.to_string().contains("first rebuild"));
    }
}
