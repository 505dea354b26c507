//! Builders for structured ISUPPORT values.
//!
//! These produce the raw (unescaped) value string; escaping happens when the
//! token is rendered.

use std::collections::HashSet;

use crate::error::ValueError;

/// Format a `PREFIX` value: `(modes)symbols`, e.g. `(qaohv)~&@%+`.
pub fn prefix_value(modes: &str, symbols: &str) -> String {
    format!("({modes}){symbols}")
}

/// Builder for the `TARGMAX` value.
///
/// - `CMD:limit` means `CMD` accepts at most `limit` targets.
/// - `CMD:` means `CMD` accepts unlimited targets.
#[derive(Debug, Clone, Default)]
pub struct TargMaxBuilder {
    entries: Vec<(String, Option<usize>)>,
}

impl TargMaxBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command with a specific limit.
    pub fn add(mut self, cmd: &str, limit: usize) -> Self {
        self.entries.push((cmd.to_uppercase(), Some(limit)));
        self
    }

    /// Add a command with unlimited targets.
    pub fn add_unlimited(mut self, cmd: &str) -> Self {
        self.entries.push((cmd.to_uppercase(), None));
        self
    }

    /// Whether no command has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the value, preserving insertion order.
    pub fn build(&self) -> String {
        self.entries
            .iter()
            .map(|(cmd, limit)| match limit {
                Some(l) => format!("{cmd}:{l}"),
                None => format!("{cmd}:"),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Builder for the `CHANMODES` value.
///
/// The four categories must be disjoint:
/// - Type A: list modes (`b`, `e`, `I`)
/// - Type B: parameter always (`k`)
/// - Type C: parameter when set (`l`)
/// - Type D: no parameter (`i`, `m`, `n`, `s`, `t`)
#[derive(Debug, Clone, Default)]
pub struct ChanModesBuilder {
    a: String,
    b: String,
    c: String,
    d: String,
}

impl ChanModesBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Type A modes (list modes).
    pub fn list_modes(mut self, modes: &str) -> Result<Self, ValueError> {
        self.check_disjoint(modes, 0)?;
        self.a = modes.to_string();
        Ok(self)
    }

    /// Set Type B modes (parameter always).
    pub fn param_always(mut self, modes: &str) -> Result<Self, ValueError> {
        self.check_disjoint(modes, 1)?;
        self.b = modes.to_string();
        Ok(self)
    }

    /// Set Type C modes (parameter when set).
    pub fn param_set(mut self, modes: &str) -> Result<Self, ValueError> {
        self.check_disjoint(modes, 2)?;
        self.c = modes.to_string();
        Ok(self)
    }

    /// Set Type D modes (no parameter).
    pub fn no_param(mut self, modes: &str) -> Result<Self, ValueError> {
        self.check_disjoint(modes, 3)?;
        self.d = modes.to_string();
        Ok(self)
    }

    /// Reject letters repeated within `new_modes` or already used by a
    /// category other than `slot` (which is about to be replaced).
    fn check_disjoint(&self, new_modes: &str, slot: usize) -> Result<(), ValueError> {
        let others: Vec<&str> = [&self.a, &self.b, &self.c, &self.d]
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != slot)
            .map(|(_, s)| s.as_str())
            .collect();

        let mut seen = HashSet::new();
        for ch in new_modes.chars() {
            if !seen.insert(ch) {
                return Err(ValueError::DuplicateInInput(ch));
            }
            if others.iter().any(|s| s.contains(ch)) {
                return Err(ValueError::DuplicateAcrossCategories(ch));
            }
        }
        Ok(())
    }

    /// Build the value: `A,B,C,D`.
    pub fn build(&self) -> String {
        format!("{},{},{},{}", self.a, self.b, self.c, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_value_format() {
        assert_eq!(prefix_value("ov", "@+"), "(ov)@+");
    }

    #[test]
    fn targmax_preserves_order_and_uppercases() {
        let targmax = TargMaxBuilder::new().add("join", 10).add_unlimited("PRIVMSG");
        assert_eq!(targmax.build(), "JOIN:10,PRIVMSG:");
    }

    #[test]
    fn chanmodes_builds_four_categories() {
        let modes = ChanModesBuilder::new()
            .list_modes("beI")
            .and_then(|b| b.param_always("k"))
            .and_then(|b| b.param_set("l"))
            .and_then(|b| b.no_param("imnst"))
            .unwrap();
        assert_eq!(modes.build(), "beI,k,l,imnst");
    }

    #[test]
    fn chanmodes_rejects_cross_category_duplicate() {
        let err = ChanModesBuilder::new()
            .param_always("k")
            .and_then(|b| b.no_param("k"))
            .unwrap_err();
        assert_eq!(err, ValueError::DuplicateAcrossCategories('k'));
    }

    #[test]
    fn chanmodes_rejects_duplicate_in_one_string() {
        let err = ChanModesBuilder::new().list_modes("aa").unwrap_err();
        assert_eq!(err, ValueError::DuplicateInInput('a'));
    }

    #[test]
    fn chanmodes_allows_replacing_a_category() {
        let modes = ChanModesBuilder::new()
            .list_modes("b")
            .and_then(|b| b.list_modes("be"))
            .unwrap();
        assert_eq!(modes.build(), "be,,,");
    }
}
