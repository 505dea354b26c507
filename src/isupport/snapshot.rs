//! Immutable result of one rebuild.

use slirc_isupport::{IsupportReply, NumericLine, Token, removal_token};

/// The published ISUPPORT state: the advertised tokens and the packed lines.
///
/// Snapshots are never modified after construction; a rebuild publishes a
/// new one. Concatenating every line's parameters yields exactly
/// `tokens()` rendered, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    tokens: Vec<Token>,
    lines: Vec<NumericLine>,
}

impl Snapshot {
    pub fn new(tokens: Vec<Token>, lines: Vec<NumericLine>) -> Self {
        Self { tokens, lines }
    }

    /// Advertised tokens, sorted by name.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Packed 005 lines; never empty for a built snapshot.
    pub fn lines(&self) -> &[NumericLine] {
        &self.lines
    }

    /// Look up an advertised token by name.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens
            .binary_search_by(|t| t.name().cmp(name))
            .ok()
            .map(|idx| &self.tokens[idx])
    }

    /// Address every line to `target`.
    pub fn replies_for<'a>(
        &'a self,
        server: &'a str,
        target: &'a str,
    ) -> impl Iterator<Item = IsupportReply<'a>> + 'a {
        self.lines
            .iter()
            .map(move |line| IsupportReply::new(server, target, line))
    }

    /// Tokens to re-advertise to clients that received `previous`.
    ///
    /// Withdrawn tokens come first as `-NAME`, followed by tokens that are
    /// new or whose value changed; each group is sorted by name.
    pub fn changes_since(&self, previous: &Snapshot) -> Vec<Token> {
        let mut changes: Vec<Token> = previous
            .tokens
            .iter()
            .filter(|old| self.get(old.name()).is_none())
            .map(|old| removal_token(old.name()))
            .collect();

        changes.extend(
            self.tokens
                .iter()
                .filter(|new| previous.get(new.name()) != Some(*new))
                .cloned(),
        );
        changes
    }
}
