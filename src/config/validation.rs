//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use slirc_isupport::{TokenError, validate_name};
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("isupport.max_params must be at least 1")]
    ZeroMaxParams,
    #[error("isupport.max_line_bytes ({max_line_bytes}) is too small, need at least {needed}")]
    LineBudgetTooSmall { max_line_bytes: usize, needed: usize },
    #[error("isupport.trailing must not be empty")]
    EmptyTrailing,
    #[error("isupport.tokens has an invalid name: {0}")]
    InvalidTokenName(#[from] TokenError),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Required fields
    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(' ') {
        errors.push(ValidationError::InvalidServerName(config.server.name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    // Line packing
    let isupport = &config.isupport;
    if isupport.max_params == 0 {
        errors.push(ValidationError::ZeroMaxParams);
    }
    if isupport.trailing.is_empty() {
        errors.push(ValidationError::EmptyTrailing);
    }
    let limits = isupport.line_limits(&config.server.name, config.limits.nicklen);
    if limits.max_param_len(&isupport.trailing) == 0 {
        errors.push(ValidationError::LineBudgetTooSmall {
            max_line_bytes: isupport.max_line_bytes,
            // Room for the framing plus one single-byte token.
            needed: limits.prefix_reserve + 1 + isupport.trailing.len() + 2,
        });
    }

    // Operator-defined tokens
    for name in isupport.tokens.keys() {
        if let Err(e) = validate_name(name) {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
