//! ISUPPORT tokens.

use std::fmt::{self, Display, Formatter};

use crate::error::TokenError;
use crate::escape::escape_value_to;

/// Characters a token name may never contain.
const FORBIDDEN_NAME_CHARS: [char; 2] = [' ', '='];

/// Check that `name` can be sent as an ISUPPORT token name.
///
/// Names are case-sensitive and must be non-empty. A space would split the
/// parameter and `=` would be read as the value separator.
pub fn validate_name(name: &str) -> Result<(), TokenError> {
    if name.is_empty() {
        return Err(TokenError::EmptyName);
    }
    match name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        Some(found) => Err(TokenError::ForbiddenChar {
            name: name.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

/// A single advertised capability: a name and an optional value.
///
/// Construction validates the name, so a `Token` is always renderable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    name: String,
    value: Option<String>,
}

impl Token {
    /// Create a token, validating its name.
    pub fn new(
        name: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Result<Self, TokenError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            value: value.map(Into::into),
        })
    }

    /// Create a valueless token such as `EXCEPTS`.
    pub fn flag(name: impl Into<String>) -> Result<Self, TokenError> {
        Self::new(name, None::<String>)
    }

    /// Create a token without validating the name.
    ///
    /// Only used for the `-NAME` removal tokens of a re-advertisement, whose
    /// names were already validated when first advertised.
    pub(crate) fn removal(name: &str) -> Self {
        Self {
            name: format!("-{name}"),
            value: None,
        }
    }

    /// The token name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw (unescaped) value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Render as a wire parameter: `NAME` or `NAME=ESCAPED_VALUE`.
    ///
    /// An empty value renders as the bare name.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => {
                f.write_str("=")?;
                escape_value_to(f, value)
            }
            _ => Ok(()),
        }
    }
}

/// Build the `-NAME` token announcing that `name` is no longer supported.
pub fn removal_token(name: &str) -> Token {
    Token::removal(name)
}
