//! Client-side parsing of received `RPL_ISUPPORT` replies.
//!
//! The inverse of rendering: split each token on its first `=`, unescape the
//! value, and honour `-NAME` removals from re-advertisements.

use crate::escape::unescape_value;

/// A single parsed ISUPPORT entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsupportEntry {
    /// The token name (e.g. `NETWORK`).
    pub key: String,
    /// The unescaped value, if the token carried one.
    pub value: Option<String>,
}

/// Accumulated ISUPPORT state from one or more 005 replies.
///
/// # Example
///
/// ```
/// use slirc_isupport::Isupport;
///
/// let mut isupport = Isupport::default();
/// isupport.apply_reply_args(&[
///     "alice",
///     "NETWORK=Test\\x20Net",
///     "CHANTYPES=#&",
///     "are supported by this server",
/// ]);
///
/// assert_eq!(isupport.network(), Some("Test Net"));
/// assert_eq!(isupport.chantypes(), Some("#&"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Isupport {
    entries: Vec<IsupportEntry>,
}

impl Isupport {
    /// Parse the arguments of a single 005 reply.
    ///
    /// Returns `None` if there is not even a target argument.
    pub fn from_reply_args(args: &[&str]) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        let mut isupport = Self::default();
        isupport.apply_reply_args(args);
        Some(isupport)
    }

    /// Merge the arguments of another 005 reply into this state.
    ///
    /// The first argument (target) and the last (trailing text) are skipped;
    /// a 005 reply always carries both.
    pub fn apply_reply_args(&mut self, args: &[&str]) {
        let tokens = args
            .get(1..args.len().saturating_sub(1))
            .unwrap_or_default();
        self.apply_params(tokens);
    }

    /// Merge bare token parameters into this state.
    pub fn apply_params(&mut self, params: &[&str]) {
        for &param in params {
            if param.starts_with(':') {
                break;
            }
            if param.is_empty() {
                continue;
            }
            if let Some(removed) = param.strip_prefix('-') {
                self.entries.retain(|e| e.key != removed);
                continue;
            }
            let (key, value) = match param.split_once('=') {
                Some((k, v)) if !v.is_empty() => (k, Some(unescape_value(v))),
                Some((k, _)) => (k, None),
                None => (param, None),
            };
            self.entries.retain(|e| e.key != key);
            self.entries.push(IsupportEntry {
                key: key.to_string(),
                value,
            });
        }
    }

    /// Iterate over all entries in the order they were last set.
    pub fn iter(&self) -> impl Iterator<Item = &IsupportEntry> {
        self.entries.iter()
    }

    /// Number of known tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no token is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a token.
    ///
    /// Returns `Some(Some(value))` if the token has a value, `Some(None)` if
    /// it is present without one, and `None` if it is absent.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_deref())
    }

    /// The `NETWORK` name.
    pub fn network(&self) -> Option<&str> {
        self.get("NETWORK").flatten()
    }

    /// The `CHANTYPES` value.
    pub fn chantypes(&self) -> Option<&str> {
        self.get("CHANTYPES").flatten()
    }

    /// The parsed `PREFIX` value.
    pub fn prefix(&self) -> Option<PrefixSpec<'_>> {
        self.get("PREFIX").flatten().and_then(PrefixSpec::parse)
    }

    /// The parsed `CHANMODES` value.
    pub fn chanmodes(&self) -> Option<ChanModes<'_>> {
        self.get("CHANMODES").flatten().and_then(ChanModes::parse)
    }
}

/// Parsed `PREFIX` value, mapping membership modes to prefix symbols.
///
/// ```
/// use slirc_isupport::PrefixSpec;
///
/// let spec = PrefixSpec::parse("(ov)@+").unwrap();
/// assert_eq!(spec.prefix_for_mode('o'), Some('@'));
/// assert_eq!(spec.mode_for_prefix('+'), Some('v'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixSpec<'a> {
    /// Mode letters, e.g. `ov`.
    pub modes: &'a str,
    /// Prefix symbols in the same order, e.g. `@+`.
    pub prefixes: &'a str,
}

impl<'a> PrefixSpec<'a> {
    /// Parse a value like `(ov)@+`.
    pub fn parse(s: &'a str) -> Option<Self> {
        let rest = s.strip_prefix('(')?;
        let (modes, prefixes) = rest.split_once(')')?;
        if modes.is_empty() || modes.chars().count() != prefixes.chars().count() {
            return None;
        }
        Some(PrefixSpec { modes, prefixes })
    }

    /// The prefix symbol for a mode letter.
    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        self.modes
            .chars()
            .position(|c| c == mode)
            .and_then(|i| self.prefixes.chars().nth(i))
    }

    /// The mode letter for a prefix symbol.
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes
            .chars()
            .position(|c| c == prefix)
            .and_then(|i| self.modes.chars().nth(i))
    }
}

/// Parsed `CHANMODES` value (types A, B, C and D).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChanModes<'a> {
    /// Type A: list modes.
    pub a: &'a str,
    /// Type B: always take a parameter.
    pub b: &'a str,
    /// Type C: take a parameter when set.
    pub c: &'a str,
    /// Type D: never take a parameter.
    pub d: &'a str,
}

impl<'a> ChanModes<'a> {
    /// Parse a value like `b,k,l,imnpst`.
    pub fn parse(s: &'a str) -> Option<Self> {
        let mut parts = s.splitn(4, ',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(ChanModes { a, b, c, d })
    }
}
