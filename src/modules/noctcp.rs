//! CTCP-blocking extban.

use crate::error::ContributorError;
use crate::isupport::{TokenContributor, TokenStore};

/// Extban letter matching CTCP senders.
const EXTBAN_LETTER: char = 'C';

/// Adds `C` to the letters of `EXTBAN`, creating `EXTBAN=,C` if no earlier
/// contributor advertised extbans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCtcpTokens;

impl NoCtcpTokens {
    pub const NAME: &'static str = "noctcp";
}

impl TokenContributor for NoCtcpTokens {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn collect_tokens(&self, tokens: &mut TokenStore) -> Result<(), ContributorError> {
        let current = tokens.get("EXTBAN").flatten().unwrap_or(",");
        // EXTBAN=<prefix>,<letters>; a value without a comma is all letters.
        let (prefix, letters) = current.split_once(',').unwrap_or(("", current));
        if letters.contains(EXTBAN_LETTER) {
            return Ok(());
        }
        let value = format!("{prefix},{letters}{EXTBAN_LETTER}");
        tokens.set("EXTBAN", value);
        Ok(())
    }
}
