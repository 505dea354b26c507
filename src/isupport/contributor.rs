//! Token contributors and their registry.

use super::store::TokenStore;
use crate::error::ContributorError;
use std::fmt;
use std::sync::Arc;

/// A source of ISUPPORT tokens, typically a loaded module.
///
/// `collect_tokens` runs once per rebuild on a fresh [`TokenStore`]. Tokens
/// not asserted in a given rebuild are simply absent from it. Contributors
/// run in registration order and may read or amend tokens set by earlier
/// ones.
///
/// An error (or panic) only discards this contributor's changes for the
/// current rebuild.
pub trait TokenContributor: Send + Sync {
    /// Unique name, used for registration and diagnostics.
    fn name(&self) -> &str;

    /// Add, overwrite, or remove tokens.
    fn collect_tokens(&self, tokens: &mut TokenStore) -> Result<(), ContributorError>;
}

/// Contributor backed by a closure.
pub struct FnContributor<F> {
    name: String,
    f: F,
}

impl<F> TokenContributor for FnContributor<F>
where
    F: Fn(&mut TokenStore) -> Result<(), ContributorError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn collect_tokens(&self, tokens: &mut TokenStore) -> Result<(), ContributorError> {
        (self.f)(tokens)
    }
}

/// Wrap a closure as a shareable contributor.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn TokenContributor>
where
    F: Fn(&mut TokenStore) -> Result<(), ContributorError> + Send + Sync + 'static,
{
    Arc::new(FnContributor {
        name: name.into(),
        f,
    })
}

/// Registered contributors in registration order.
#[derive(Clone, Default)]
pub struct ContributorRegistry {
    entries: Vec<Arc<dyn TokenContributor>>,
}

impl ContributorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contributor.
    ///
    /// A contributor with the same name is replaced in place, keeping its
    /// position; the replaced one is returned.
    pub fn register(
        &mut self,
        contributor: Arc<dyn TokenContributor>,
    ) -> Option<Arc<dyn TokenContributor>> {
        match self.position(contributor.name()) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx], contributor)),
            None => {
                self.entries.push(contributor);
                None
            }
        }
    }

    /// Remove a contributor by name.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn TokenContributor>> {
        self.position(name).map(|idx| self.entries.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Contributor names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TokenContributor>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|c| c.name() == name)
    }
}

impl fmt::Debug for ContributorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContributorRegistry")
            .field("contributors", &self.names())
            .finish()
    }
}
