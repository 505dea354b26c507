//! slircd-isupport - ISUPPORT (RPL_ISUPPORT / 005) subsystem for the
//! Straylight IRC Daemon.
//!
//! Modules contribute tokens, the [`isupport::IsupportManager`] packs them
//! into 005 lines once per rebuild, and registration hands each client the
//! cached lines with only the target substituted.

pub mod config;
pub mod error;
pub mod isupport;
pub mod modules;
pub mod telemetry;

pub use slirc_isupport as proto;
