//! ISUPPORT (005) generation, caching and delivery.
//!
//! Contributors assert tokens into a [`TokenStore`]; the [`IsupportManager`]
//! runs them all, packs the result into 005 lines, and publishes an
//! immutable [`Snapshot`] that connection handlers read lock-free.
//! [`ModuleHost`] triggers rebuilds as modules load and unload.

mod contributor;
mod host;
mod manager;
mod snapshot;
mod store;

pub use contributor::{ContributorRegistry, FnContributor, TokenContributor, from_fn};
pub use host::ModuleHost;
pub use manager::{Diagnostic, IsupportManager, RebuildReport};
pub use snapshot::Snapshot;
pub use store::TokenStore;
