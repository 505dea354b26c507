//! # slirc-isupport
//!
//! Protocol-level building blocks for `RPL_ISUPPORT` (numeric 005).
//!
//! ## Features
//!
//! - Token names and values with validation ([`Token`])
//! - Reversible value escaping (`\x20`, `\x5C`, `\xHH`)
//! - Packing rendered tokens into numeric lines under a parameter-count and
//!   byte-length budget ([`pack_lines`])
//! - Wire serialization of 005 replies ([`IsupportReply`])
//! - Builders for structured values such as `CHANMODES` and `TARGMAX`
//! - Client-side parsing of received 005 replies ([`Isupport`])
//!
//! Nothing in this crate performs I/O; the server-side cache and contributor
//! plumbing live in `slircd-isupport`.
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_isupport::{pack_lines, LineLimits, Token, DEFAULT_TRAILING};
//!
//! let tokens = vec![
//!     Token::new("CHANTYPES", Some("#")).unwrap(),
//!     Token::new("NETWORK", Some("TestNet")).unwrap(),
//!     Token::flag("NICKLEN").unwrap(),
//! ];
//! let params = tokens.iter().map(Token::render);
//! let packed = pack_lines(params, &LineLimits::default(), DEFAULT_TRAILING);
//!
//! assert_eq!(packed.lines.len(), 1);
//! assert_eq!(packed.lines[0].params(), ["CHANTYPES=#", "NETWORK=TestNet", "NICKLEN"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod escape;
pub mod line;
pub mod parser;
pub mod reply;
pub mod token;
pub mod values;

pub use self::error::{TokenError, ValueError};
pub use self::escape::{escape_value, escape_value_to, unescape_value};
pub use self::line::{
    pack_lines, LineLimits, NumericLine, PackedLines, DEFAULT_MAX_PARAMS, DEFAULT_TRAILING,
    MAX_LINE_LEN,
};
pub use self::parser::{ChanModes, Isupport, IsupportEntry, PrefixSpec};
pub use self::reply::{IsupportReply, RPL_ISUPPORT};
pub use self::token::{removal_token, validate_name, Token};
pub use self::values::{prefix_value, ChanModesBuilder, TargMaxBuilder};
