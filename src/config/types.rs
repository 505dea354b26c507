//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::isupport::IsupportConfig;
use super::limits::LimitsConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Protocol limits advertised to clients.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// ISUPPORT line packing and extra tokens.
    #[serde(default)]
    pub isupport: IsupportConfig,
    /// Optional built-in modules.
    #[serde(default)]
    pub modules: ModulesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.straylight.net"). Used as the 005 source.
    pub name: String,
    /// Network name (e.g., "Straylight"), advertised as `NETWORK`.
    pub network: String,
    /// Nickname/channel case mapping, advertised as `CASEMAPPING`.
    #[serde(default)]
    pub casemapping: Casemapping,
}

/// Case mapping rules for nick and channel comparison.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Casemapping {
    /// Only A-Z/a-z fold.
    Ascii,
    /// ASCII plus `[]\~` ↔ `{}|^`.
    #[default]
    Rfc1459,
}

impl Casemapping {
    /// The value sent in the `CASEMAPPING` token.
    pub fn as_isupport_value(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
        }
    }
}

/// Optional built-in modules.
#[derive(Debug, Clone, Deserialize)]
pub struct ModulesConfig {
    /// Advertise the CTCP-blocking extban (`EXTBAN` letter `C`).
    #[serde(default = "default_true")]
    pub noctcp: bool,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            noctcp: default_true(),
        }
    }
}

pub(super) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        name = "irc.test.net"
        network = "TestNet"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.server.name, "irc.test.net");
        assert_eq!(config.server.network, "TestNet");
        assert_eq!(config.server.casemapping, Casemapping::Rfc1459);
        assert_eq!(config.limits.nicklen, 30);
        assert_eq!(config.isupport.max_params, 13);
        assert!(config.modules.noctcp);
    }

    #[test]
    fn casemapping_values() {
        assert_eq!(Casemapping::Ascii.as_isupport_value(), "ascii");
        assert_eq!(Casemapping::Rfc1459.as_isupport_value(), "rfc1459");
    }

    #[test]
    fn parses_casemapping_and_modules() {
        let config = Config::from_toml_str(
            r#"
            [server]
            name = "irc.test.net"
            network = "TestNet"
            casemapping = "ascii"

            [modules]
            noctcp = false
            "#,
        )
        .unwrap();
        assert_eq!(config.server.casemapping, Casemapping::Ascii);
        assert!(!config.modules.noctcp);
    }

    #[test]
    fn missing_server_section_is_a_parse_error() {
        let err = Config::from_toml_str("[limits]\nnicklen = 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.network, "TestNet");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/slircd/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
