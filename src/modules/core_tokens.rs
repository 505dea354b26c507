//! The daemon's own ISUPPORT tokens.

use crate::config::{Casemapping, Config, LimitsConfig};
use crate::error::ContributorError;
use crate::isupport::{TokenContributor, TokenStore};
use slirc_isupport::{ChanModesBuilder, TargMaxBuilder, prefix_value};

/// Channel membership modes and their prefix symbols, highest rank first.
const PREFIX_MODES: &str = "qaohv";
const PREFIX_SYMBOLS: &str = "~&@%+";

/// Tokens describing the core protocol: limits, channel modes, casemapping.
#[derive(Debug, Clone)]
pub struct CoreTokens {
    network: String,
    casemapping: Casemapping,
    limits: LimitsConfig,
}

impl CoreTokens {
    pub const NAME: &'static str = "core";

    pub fn from_config(config: &Config) -> Self {
        Self {
            network: config.server.network.clone(),
            casemapping: config.server.casemapping,
            limits: config.limits.clone(),
        }
    }
}

impl TokenContributor for CoreTokens {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn collect_tokens(&self, tokens: &mut TokenStore) -> Result<(), ContributorError> {
        let limits = &self.limits;

        let chanmodes = ChanModesBuilder::new()
            .list_modes("beIq")?
            .param_always("k")?
            .param_set("l")?
            .no_param("imnrstMU")?;

        let targmax = TargMaxBuilder::new()
            .add("JOIN", 10)
            .add("PART", 10)
            .add("KICK", limits.maxtargets)
            .add("PRIVMSG", limits.maxtargets)
            .add("NOTICE", limits.maxtargets)
            .add("NAMES", 10)
            .add("WHOIS", 1)
            .add("WHOWAS", 10)
            .add_unlimited("MONITOR");

        tokens.set("AWAYLEN", limits.awaylen);
        tokens.set("CASEMAPPING", self.casemapping.as_isupport_value());
        tokens.set("CHANMODES", chanmodes.build());
        tokens.set("CHANNELLEN", limits.channellen);
        tokens.set("CHANTYPES", "#&+!");
        tokens.set("ELIST", "MNU");
        tokens.set("EXCEPTS", "e");
        tokens.set("EXTBAN", ",m");
        tokens.set("INVEX", "I");
        tokens.set("KICKLEN", limits.kicklen);
        tokens.set("MAXTARGETS", limits.maxtargets);
        tokens.set("MODES", limits.modes);
        if limits.monitor > 0 {
            tokens.set("MONITOR", limits.monitor);
        }
        tokens.set("NETWORK", &self.network);
        tokens.set("NICKLEN", limits.nicklen);
        tokens.set("PREFIX", prefix_value(PREFIX_MODES, PREFIX_SYMBOLS));
        tokens.set("STATUSMSG", PREFIX_SYMBOLS);
        tokens.set("TARGMAX", targmax.build());
        tokens.set("TOPICLEN", limits.topiclen);
        tokens.flag("UTF8ONLY");
        tokens.flag("WHOX");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> Config {
        Config::from_toml_str(&format!(
            "[server]\nname = \"irc.test.net\"\nnetwork = \"TestNet\"\n{extra}"
        ))
        .unwrap()
    }

    fn collect(config: &Config) -> TokenStore {
        let mut store = TokenStore::new();
        CoreTokens::from_config(config)
            .collect_tokens(&mut store)
            .unwrap();
        store
    }

    #[test]
    fn advertises_configured_values() {
        let store = collect(&config("[limits]\nnicklen = 16\n"));
        assert_eq!(store.get("NETWORK"), Some(Some("TestNet")));
        assert_eq!(store.get("NICKLEN"), Some(Some("16")));
        assert_eq!(store.get("CASEMAPPING"), Some(Some("rfc1459")));
        assert_eq!(store.get("PREFIX"), Some(Some("(qaohv)~&@%+")));
        assert_eq!(store.get("CHANMODES"), Some(Some("beIq,k,l,imnrstMU")));
        assert_eq!(store.get("WHOX"), Some(None));
    }

    #[test]
    fn targmax_follows_maxtargets() {
        let store = collect(&config("[limits]\nmaxtargets = 8\n"));
        let targmax = store.get("TARGMAX").flatten().unwrap();
        assert!(targmax.contains("PRIVMSG:8"));
        assert!(targmax.ends_with("MONITOR:"));
    }

    #[test]
    fn zero_monitor_omits_token() {
        let store = collect(&config("[limits]\nmonitor = 0\n"));
        assert!(!store.contains("MONITOR"));
    }
}
