//! Token store filled by contributors during one rebuild.

use slirc_isupport::{Token, TokenError, validate_name};
use std::collections::BTreeMap;

/// Name-keyed token collection, rebuilt from scratch on every rebuild.
///
/// Keys are unique (last writer wins) and iterate in ascending byte order,
/// so the output does not depend on contributor registration order.
/// Invalid names are refused and remembered so the rebuild can report them.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: BTreeMap<String, Option<String>>,
    rejected: Vec<(String, TokenError)>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a token.
    ///
    /// Returns `false` if the name was refused; the refusal is recorded and
    /// reported by the rebuild, so callers may ignore the result.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> bool {
        let name = name.into();
        match validate_name(&name) {
            Ok(()) => {
                self.tokens.insert(name, value.map(Into::into));
                true
            }
            Err(e) => {
                self.rejected.push((name, e));
                false
            }
        }
    }

    /// Insert a token with a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) -> bool {
        self.insert(name, Some(value.to_string()))
    }

    /// Insert a valueless token.
    pub fn flag(&mut self, name: impl Into<String>) -> bool {
        self.insert(name, None::<String>)
    }

    /// Remove a token set earlier in this rebuild.
    pub fn remove(&mut self, name: &str) -> bool {
        self.tokens.remove(name).is_some()
    }

    /// Look up a token.
    ///
    /// Returns `Some(Some(value))` if the token has a value, `Some(None)` if
    /// it is present without one, and `None` if it is absent.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.tokens.get(name).map(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drain the names refused since the last call.
    pub(crate) fn take_rejected(&mut self) -> Vec<(String, TokenError)> {
        std::mem::take(&mut self.rejected)
    }

    /// Accepted tokens sorted by name.
    pub fn finalize(self) -> Vec<Token> {
        self.tokens
            .into_iter()
            .filter_map(|(name, value)| Token::new(name, value).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_sorts_by_name() {
        let mut store = TokenStore::new();
        store.set("NETWORK", "TestNet");
        store.set("CHANTYPES", "#");
        store.flag("NICKLEN");
        let names: Vec<String> = store.finalize().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["CHANTYPES", "NETWORK", "NICKLEN"]);
    }

    #[test]
    fn sort_is_byte_order_and_case_sensitive() {
        let mut store = TokenStore::new();
        store.flag("b");
        store.flag("B");
        store.flag("a");
        store.flag("A");
        let names: Vec<String> = store.finalize().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["A", "B", "a", "b"]);
    }

    #[test]
    fn last_writer_wins() {
        let mut store = TokenStore::new();
        store.set("MODES", 4);
        store.set("MODES", 6);
        assert_eq!(store.get("MODES"), Some(Some("6")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn invalid_names_are_refused_and_recorded() {
        let mut store = TokenStore::new();
        assert!(!store.flag(""));
        assert!(!store.set("A B", 1));
        assert!(!store.set("A=B", 1));
        assert!(store.flag("OK"));

        assert_eq!(store.len(), 1);
        let rejected = store.take_rejected();
        assert_eq!(rejected.len(), 3);
        assert_eq!(rejected[0].1, TokenError::EmptyName);
        assert!(store.take_rejected().is_empty());
    }

    #[test]
    fn get_distinguishes_flag_from_absent() {
        let mut store = TokenStore::new();
        store.flag("WHOX");
        assert_eq!(store.get("WHOX"), Some(None));
        assert_eq!(store.get("MISSING"), None);
        assert!(store.contains("WHOX"));
    }

    #[test]
    fn remove_omits_token() {
        let mut store = TokenStore::new();
        store.flag("WHOX");
        assert!(store.remove("WHOX"));
        assert!(!store.remove("WHOX"));
        assert!(store.is_empty());
        assert!(store.finalize().is_empty());
    }
}
