//! Error types for token construction and structured values.

use thiserror::Error;

/// Reasons a token name is refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The name was the empty string.
    #[error("token name is empty")]
    EmptyName,

    /// The name contained a character that would break the wire format.
    #[error("token name {name:?} contains forbidden character {found:?}")]
    ForbiddenChar {
        /// The rejected name.
        name: String,
        /// The first offending character.
        found: char,
    },
}

impl TokenError {
    /// Get a static error code string for logging and metrics labels.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::ForbiddenChar { .. } => "forbidden_char",
        }
    }
}

/// Errors raised by the structured value builders.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A channel mode letter was listed twice in one category.
    #[error("duplicate channel mode character '{0}' found in input string")]
    DuplicateInInput(char),

    /// A channel mode letter appears in more than one CHANMODES category.
    #[error("duplicate channel mode character '{0}' found in CHANMODES, modes must be disjoint")]
    DuplicateAcrossCategories(char),
}
