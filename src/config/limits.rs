//! Protocol limits configuration.

use serde::Deserialize;

/// Protocol limits advertised to clients through ISUPPORT.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum nickname length, advertised as `NICKLEN` (default: 30).
    /// Also bounds the target length reserved in every 005 line.
    #[serde(default = "default_nicklen")]
    pub nicklen: usize,
    /// Maximum channel name length, `CHANNELLEN` (default: 50).
    #[serde(default = "default_channellen")]
    pub channellen: usize,
    /// Maximum topic length, `TOPICLEN` (default: 390).
    #[serde(default = "default_text_len")]
    pub topiclen: usize,
    /// Maximum kick reason length, `KICKLEN` (default: 390).
    #[serde(default = "default_text_len")]
    pub kicklen: usize,
    /// Maximum away message length, `AWAYLEN` (default: 200).
    #[serde(default = "default_awaylen")]
    pub awaylen: usize,
    /// Maximum parameterised modes per MODE command, `MODES` (default: 6).
    #[serde(default = "default_modes")]
    pub modes: usize,
    /// Maximum targets per message, `MAXTARGETS` (default: 4).
    #[serde(default = "default_maxtargets")]
    pub maxtargets: usize,
    /// MONITOR list size, `MONITOR` (default: 100).
    #[serde(default = "default_monitor")]
    pub monitor: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            nicklen: default_nicklen(),
            channellen: default_channellen(),
            topiclen: default_text_len(),
            kicklen: default_text_len(),
            awaylen: default_awaylen(),
            modes: default_modes(),
            maxtargets: default_maxtargets(),
            monitor: default_monitor(),
        }
    }
}

fn default_nicklen() -> usize {
    30
}

fn default_channellen() -> usize {
    50
}

fn default_text_len() -> usize {
    390
}

fn default_awaylen() -> usize {
    200
}

fn default_modes() -> usize {
    6
}

fn default_maxtargets() -> usize {
    4
}

fn default_monitor() -> usize {
    100
}
