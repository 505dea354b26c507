//! Built-in token contributors.

mod config_tokens;
mod core_tokens;
mod noctcp;

pub use config_tokens::ConfigTokens;
pub use core_tokens::CoreTokens;
pub use noctcp::NoCtcpTokens;

use crate::config::Config;
use crate::isupport::TokenContributor;
use std::sync::Arc;

/// The contributors enabled by `config`, in registration order.
pub fn builtin_contributors(config: &Config) -> Vec<Arc<dyn TokenContributor>> {
    let mut contributors: Vec<Arc<dyn TokenContributor>> =
        vec![Arc::new(CoreTokens::from_config(config))];
    if config.modules.noctcp {
        contributors.push(Arc::new(NoCtcpTokens));
    }
    contributors.push(Arc::new(ConfigTokens::from_config(config)));
    contributors
}
