//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config structs (Config, ServerConfig, ModulesConfig)
//! - [`limits`]: Protocol limits advertised through ISUPPORT (LimitsConfig)
//! - [`isupport`]: 005 line packing and operator-defined tokens (IsupportConfig)
//! - [`validation`]: Startup validation

mod isupport;
mod limits;
mod types;
pub mod validation;

pub use isupport::{IsupportConfig, TokenSetting};
pub use limits::LimitsConfig;
pub use types::{Casemapping, Config, ConfigError, ModulesConfig, ServerConfig};
pub use validation::{ValidationError, validate};
