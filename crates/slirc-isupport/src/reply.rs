//! Wire serialization of `RPL_ISUPPORT` replies.

use std::fmt::{self, Display, Formatter};

use crate::line::NumericLine;

/// Numeric code of `RPL_ISUPPORT`.
pub const RPL_ISUPPORT: u16 = 5;

/// A 005 reply addressed to one client.
///
/// The recipient's identifier is the only per-connection part of the
/// message; the token parameters are borrowed from a shared [`NumericLine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsupportReply<'a> {
    server: &'a str,
    target: &'a str,
    line: &'a NumericLine,
}

impl<'a> IsupportReply<'a> {
    /// Address `line` to `target`, sourced from `server`.
    pub fn new(server: &'a str, target: &'a str, line: &'a NumericLine) -> Self {
        Self {
            server,
            target,
            line,
        }
    }

    /// The recipient's identifier.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// The shared line carried by this reply.
    pub fn line(&self) -> &'a NumericLine {
        self.line
    }

    /// All parameters as they appear on the wire: target, tokens, trailing.
    pub fn args(&self) -> Vec<&'a str> {
        let mut args = Vec::with_capacity(self.line.params().len() + 2);
        args.push(self.target);
        args.extend(self.line.params().iter().map(String::as_str));
        args.push(self.line.trailing());
        args
    }
}

impl Display for IsupportReply<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{} {:03} {}", self.server, RPL_ISUPPORT, self.target)?;
        for param in self.line.params() {
            write!(f, " {}", param)?;
        }
        write!(f, " :{}\r\n", self.line.trailing())
    }
}
