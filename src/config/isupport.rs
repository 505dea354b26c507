//! ISUPPORT line packing and operator-defined tokens.

use serde::Deserialize;
use slirc_isupport::{DEFAULT_MAX_PARAMS, DEFAULT_TRAILING, LineLimits, MAX_LINE_LEN};
use std::collections::BTreeMap;

/// `[isupport]` section.
///
/// ```toml
/// [isupport]
/// max_params = 13
/// trailing = "are supported by this server"
///
/// [isupport.tokens]
/// SAFELIST = true        # bare token
/// WHOX = false           # suppress a token another module set
/// SILENCE = 32           # numeric value
/// BOT = "B"              # text value
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct IsupportConfig {
    /// Maximum tokens per 005 line (default: 13).
    #[serde(default = "default_max_params")]
    pub max_params: usize,
    /// Maximum serialized line length in bytes (default: 512).
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
    /// Bytes reserved for `:server 005 target ` and CRLF. Computed from the
    /// server name and `NICKLEN` when unset.
    #[serde(default)]
    pub prefix_reserve: Option<usize>,
    /// Trailing text of every 005 line.
    #[serde(default = "default_trailing")]
    pub trailing: String,
    /// Extra tokens contributed by configuration.
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenSetting>,
}

impl Default for IsupportConfig {
    fn default() -> Self {
        Self {
            max_params: default_max_params(),
            max_line_bytes: default_max_line_bytes(),
            prefix_reserve: None,
            trailing: default_trailing(),
            tokens: BTreeMap::new(),
        }
    }
}

impl IsupportConfig {
    /// Line limits for a server with the given name and nickname length.
    pub fn line_limits(&self, server_name: &str, nicklen: usize) -> LineLimits {
        LineLimits {
            max_params: self.max_params,
            max_line_bytes: self.max_line_bytes,
            prefix_reserve: self
                .prefix_reserve
                .unwrap_or_else(|| LineLimits::prefix_reserve_for(server_name.len(), nicklen)),
        }
    }
}

/// Value of an entry under `[isupport.tokens]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenSetting {
    /// `true` advertises a bare token, `false` removes it.
    Flag(bool),
    /// Numeric value.
    Number(i64),
    /// Text value (escaped on the wire).
    Text(String),
}

impl TokenSetting {
    /// The token value, or `None` for a bare token. Not meaningful for
    /// `Flag(false)`.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Flag(_) => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Whether this entry suppresses the token.
    pub fn is_removal(&self) -> bool {
        matches!(self, Self::Flag(false))
    }
}

fn default_max_params() -> usize {
    DEFAULT_MAX_PARAMS
}

fn default_max_line_bytes() -> usize {
    MAX_LINE_LEN
}

fn default_trailing() -> String {
    DEFAULT_TRAILING.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IsupportConfig::default();
        assert_eq!(config.max_params, 13);
        assert_eq!(config.max_line_bytes, 512);
        assert_eq!(config.prefix_reserve, None);
        assert_eq!(config.trailing, "are supported by this server");
        assert!(config.tokens.is_empty());
    }

    #[test]
    fn computed_prefix_reserve() {
        let limits = IsupportConfig::default().line_limits("irc.test.net", 30);
        // ":irc.test.net 005 " + 30-byte nick + " " + CRLF
        assert_eq!(limits.prefix_reserve, 1 + 12 + 5 + 30 + 1 + 2);
        assert_eq!(limits.max_params, 13);
    }

    #[test]
    fn explicit_prefix_reserve_wins() {
        let config = IsupportConfig {
            prefix_reserve: Some(100),
            ..IsupportConfig::default()
        };
        assert_eq!(config.line_limits("irc.test.net", 30).prefix_reserve, 100);
    }

    #[test]
    fn parses_token_settings() {
        let config: IsupportConfig = toml::from_str(
            r#"
            [tokens]
            SAFELIST = true
            WHOX = false
            SILENCE = 32
            BOT = "B"
            "#,
        )
        .unwrap();
        assert_eq!(config.tokens["SAFELIST"], TokenSetting::Flag(true));
        assert!(config.tokens["WHOX"].is_removal());
        assert_eq!(config.tokens["SILENCE"].value().as_deref(), Some("32"));
        assert_eq!(config.tokens["BOT"].value().as_deref(), Some("B"));
        assert_eq!(config.tokens["SAFELIST"].value(), None);
    }
}
