//! Operator-defined tokens from `[isupport.tokens]`.

use crate::config::{Config, TokenSetting};
use crate::error::ContributorError;
use crate::isupport::{TokenContributor, TokenStore};
use std::collections::BTreeMap;

/// Applies `[isupport.tokens]`: `false` removes a token set by an earlier
/// contributor, anything else sets it.
///
/// Registered last so operators can override built-in tokens.
#[derive(Debug, Clone, Default)]
pub struct ConfigTokens {
    tokens: BTreeMap<String, TokenSetting>,
}

impl ConfigTokens {
    pub const NAME: &'static str = "config";

    pub fn new(tokens: BTreeMap<String, TokenSetting>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.isupport.tokens.clone())
    }
}

impl TokenContributor for ConfigTokens {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn collect_tokens(&self, tokens: &mut TokenStore) -> Result<(), ContributorError> {
        for (name, setting) in &self.tokens {
            if setting.is_removal() {
                tokens.remove(name);
            } else {
                tokens.insert(name.as_str(), setting.value());
            }
        }
        Ok(())
    }
}
