//! Server-wide ISUPPORT cache.
//!
//! # Publish/read contract
//!
//! The current [`Snapshot`] lives behind an [`ArcSwapOption`]. A rebuild
//! constructs a complete snapshot off to the side and swaps it in with a
//! single atomic store, so readers see either the previous snapshot or the
//! new one, never a mix. Reads take no lock. Rebuilds are serialized by a
//! mutex that only the build-and-publish path touches; line limits can only
//! change while that mutex is held, so every snapshot is packed with one
//! consistent set of limits.

use super::contributor::ContributorRegistry;
use super::snapshot::Snapshot;
use super::store::TokenStore;
use crate::config::Config;
use crate::error::{ContributorError, IsupportError};
use crate::telemetry::spans;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use slirc_isupport::{IsupportReply, LineLimits, NumericLine, Token, TokenError, pack_lines};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A recoverable problem encountered while rebuilding.
///
/// Every diagnostic is also logged; they are returned so hosts and tests can
/// inspect what was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A contributor tried to set a token whose name is not sendable.
    InvalidName {
        contributor: String,
        name: String,
        error: TokenError,
    },
    /// A contributor returned an error or panicked; its tokens were discarded.
    ContributorFailed {
        contributor: String,
        code: &'static str,
        error: String,
    },
    /// A token too long to fit on any 005 line.
    Oversized { name: String, len: usize, max: usize },
}

impl Diagnostic {
    /// Get a static label for this diagnostic.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "invalid_name",
            Self::ContributorFailed { .. } => "contributor_failed",
            Self::Oversized { .. } => "oversized",
        }
    }
}

/// Outcome of [`IsupportManager::rebuild`].
#[derive(Debug, Clone)]
pub struct RebuildReport {
    /// The snapshot that was published.
    pub snapshot: Arc<Snapshot>,
    /// Lines re-advertising what changed since the previous snapshot, for
    /// clients that are already registered. Empty on the first build or when
    /// nothing changed.
    pub delta: Vec<NumericLine>,
    /// Everything that was dropped along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds, caches and serves the 005 lines.
pub struct IsupportManager {
    server_name: String,
    limits: Mutex<LineLimits>,
    trailing: String,
    current: ArcSwapOption<Snapshot>,
    rebuild_lock: Mutex<()>,
}

impl IsupportManager {
    pub fn new(
        server_name: impl Into<String>,
        limits: LineLimits,
        trailing: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            limits: Mutex::new(limits),
            trailing: trailing.into(),
            current: ArcSwapOption::empty(),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Create a manager using the configured server name and line limits.
    pub fn from_config(config: &Config) -> Self {
        let limits = config
            .isupport
            .line_limits(&config.server.name, config.limits.nicklen);
        Self::new(
            config.server.name.clone(),
            limits,
            config.isupport.trailing.clone(),
        )
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Limits the next rebuild will pack with.
    pub fn limits(&self) -> LineLimits {
        *self.limits.lock()
    }

    /// Replace the line limits used by subsequent rebuilds.
    ///
    /// Waits for any rebuild in progress. The published snapshot keeps its
    /// old packing until the next rebuild, so callers should rebuild right
    /// after, as [`ModuleHost::reconfigure`](super::ModuleHost::reconfigure)
    /// does.
    pub fn set_limits(&self, limits: LineLimits) {
        let _guard = self.rebuild_lock.lock();
        let mut current = self.limits.lock();
        if *current != limits {
            info!(
                max_params = limits.max_params,
                max_line_bytes = limits.max_line_bytes,
                prefix_reserve = limits.prefix_reserve,
                "ISUPPORT line limits changed"
            );
            *current = limits;
        }
    }

    /// Run every contributor and pack the result, without publishing.
    pub fn build(&self, registry: &ContributorRegistry) -> (Snapshot, Vec<Diagnostic>) {
        let limits = self.limits();
        self.build_with(registry, &limits)
    }

    fn build_with(
        &self,
        registry: &ContributorRegistry,
        limits: &LineLimits,
    ) -> (Snapshot, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut store = TokenStore::new();

        for contributor in registry.iter() {
            let name = contributor.name();
            let _span = spans::contributor(name).entered();
            let checkpoint = store.clone();

            let outcome =
                catch_unwind(AssertUnwindSafe(|| contributor.collect_tokens(&mut store)))
                    .unwrap_or_else(|payload| {
                        Err(ContributorError::Panicked(panic_message(payload.as_ref())))
                    });

            for (token, e) in store.take_rejected() {
                warn!(
                    contributor = %name,
                    token = %token,
                    error = %e,
                    "Dropping ISUPPORT token with invalid name"
                );
                diagnostics.push(Diagnostic::InvalidName {
                    contributor: name.to_string(),
                    name: token,
                    error: e,
                });
            }

            match outcome {
                Ok(()) => debug!(tokens = store.len(), "Contributor done"),
                Err(e) => {
                    warn!(
                        contributor = %name,
                        code = e.error_code(),
                        error = %e,
                        "ISUPPORT contributor failed, discarding its tokens"
                    );
                    store = checkpoint;
                    diagnostics.push(Diagnostic::ContributorFailed {
                        contributor: name.to_string(),
                        code: e.error_code(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let max = limits.max_param_len(&self.trailing);
        let mut tokens = Vec::with_capacity(store.len());
        let mut params = Vec::with_capacity(store.len());
        for token in store.finalize() {
            let rendered = token.render();
            if rendered.len() > max {
                diagnostics.push(oversized(token.name(), rendered.len(), max));
                continue;
            }
            params.push(rendered);
            tokens.push(token);
        }

        let packed = pack_lines(params, limits, &self.trailing);
        debug_assert!(packed.oversized.is_empty());
        (Snapshot::new(tokens, packed.lines), diagnostics)
    }

    /// Rebuild from `registry` and publish the result.
    ///
    /// Called at boot, before any client can finish registering, and again
    /// whenever the set of contributors changes.
    pub fn rebuild(&self, registry: &ContributorRegistry) -> RebuildReport {
        let _guard = self.rebuild_lock.lock();
        let _span = spans::rebuild(registry.len()).entered();
        let limits = self.limits();

        let (snapshot, mut diagnostics) = self.build_with(registry, &limits);
        let snapshot = Arc::new(snapshot);
        let previous = self.publish(Arc::clone(&snapshot));

        let delta = match previous {
            Some(prev) => {
                let changes = snapshot.changes_since(&prev);
                self.pack_delta(&changes, &limits, &mut diagnostics)
            }
            None => Vec::new(),
        };

        info!(
            tokens = snapshot.tokens().len(),
            lines = snapshot.lines().len(),
            dropped = diagnostics.len(),
            changed_lines = delta.len(),
            "ISUPPORT rebuilt"
        );

        RebuildReport {
            snapshot,
            delta,
            diagnostics,
        }
    }

    /// Atomically replace the visible snapshot, returning the previous one.
    pub fn publish(&self, snapshot: impl Into<Arc<Snapshot>>) -> Option<Arc<Snapshot>> {
        self.current.swap(Some(snapshot.into()))
    }

    /// The currently visible snapshot.
    pub fn current(&self) -> Result<Arc<Snapshot>, IsupportError> {
        self.current.load_full().ok_or(IsupportError::NotBuilt)
    }

    pub fn is_built(&self) -> bool {
        self.current.load().is_some()
    }

    /// Serialized 005 lines for one client, addressed to `target`.
    ///
    /// Lines only stay within the byte limit for targets no longer than the
    /// reserve allows; a longer target is logged.
    pub fn send_to(&self, target: &str) -> Result<Vec<String>, IsupportError> {
        let snapshot = self.current().inspect_err(|e| {
            error!(
                target = %target,
                code = e.error_code(),
                "ISUPPORT requested before boot rebuild"
            );
        })?;
        self.check_target(target);
        Ok(snapshot
            .replies_for(&self.server_name, target)
            .map(|reply| reply.to_string())
            .collect())
    }

    /// Serialized re-advertisement lines from `report`, addressed to `target`.
    pub fn send_delta_to(&self, target: &str, report: &RebuildReport) -> Vec<String> {
        self.check_target(target);
        report
            .delta
            .iter()
            .map(|line| IsupportReply::new(&self.server_name, target, line).to_string())
            .collect()
    }

    /// Whether `target` fits in the space reserved for it on every line.
    pub fn fits_target(&self, target: &str) -> bool {
        target.len() <= self.limits().max_target_len(self.server_name.len())
    }

    fn check_target(&self, target: &str) {
        if !self.fits_target(target) {
            warn!(
                client = %target,
                max = self.limits().max_target_len(self.server_name.len()),
                "ISUPPORT target longer than reserved; lines may exceed the byte limit"
            );
        }
    }

    fn pack_delta(
        &self,
        tokens: &[Token],
        limits: &LineLimits,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<NumericLine> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let max = limits.max_param_len(&self.trailing);
        let packed = pack_lines(tokens.iter().map(Token::render), limits, &self.trailing);
        for param in &packed.oversized {
            diagnostics.push(oversized(param, param.len(), max));
        }
        let mut lines = packed.lines;
        // Everything oversized leaves a single trailing-only line.
        lines.retain(|line| !line.params().is_empty());
        lines
    }
}

fn oversized(name: &str, len: usize, max: usize) -> Diagnostic {
    warn!(token = %name, len, max, "Dropping ISUPPORT token too long for one line");
    Diagnostic::Oversized {
        name: name.to_string(),
        len,
        max,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isupport::contributor::from_fn;

    fn manager() -> IsupportManager {
        IsupportManager::new(
            "irc.test.net",
            LineLimits::for_server("irc.test.net", 30),
            "are supported by this server",
        )
    }

    #[test]
    fn current_before_rebuild_is_not_built() {
        let manager = manager();
        assert!(!manager.is_built());
        assert_eq!(manager.current().unwrap_err(), IsupportError::NotBuilt);
        assert_eq!(manager.send_to("alice").unwrap_err(), IsupportError::NotBuilt);
    }

    #[test]
    fn publish_returns_previous() {
        let manager = manager();
        assert!(manager.publish(Snapshot::new(Vec::new(), Vec::new())).is_none());
        assert!(manager.publish(Snapshot::new(Vec::new(), Vec::new())).is_some());
        assert!(manager.is_built());
    }

    #[test]
    fn first_rebuild_has_no_delta() {
        let manager = manager();
        let mut registry = ContributorRegistry::new();
        registry.register(from_fn("a", |t| {
            t.flag("WHOX");
            Ok(())
        }));
        let report = manager.rebuild(&registry);
        assert!(report.delta.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn failed_contributor_is_rolled_back() {
        let manager = manager();
        let mut registry = ContributorRegistry::new();
        registry.register(from_fn("good", |t| {
            t.set("NETWORK", "TestNet");
            Ok(())
        }));
        registry.register(from_fn("bad", |t| {
            t.set("HALFWAY", 1);
            t.remove("NETWORK");
            Err(ContributorError::Failed("backend offline".into()))
        }));
        let (snapshot, diagnostics) = manager.build(&registry);
        let names: Vec<&str> = snapshot.tokens().iter().map(Token::name).collect();
        assert_eq!(names, ["NETWORK"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind(), "contributor_failed");
    }

    #[test]
    fn panicking_contributor_is_isolated() {
        let manager = manager();
        let mut registry = ContributorRegistry::new();
        registry.register(from_fn("boom", |_| panic!("contributor exploded")));
        registry.register(from_fn("after", |t| {
            t.flag("WHOX");
            Ok(())
        }));
        let (snapshot, diagnostics) = manager.build(&registry);
        assert!(snapshot.get("WHOX").is_some());
        assert_eq!(
            diagnostics,
            [Diagnostic::ContributorFailed {
                contributor: "boom".into(),
                code: "panicked",
                error: "contributor panicked: contributor exploded".into(),
            }]
        );
    }

    #[test]
    fn oversized_withdrawal_is_reported() {
        let manager = manager();
        let max = manager
            .limits()
            .max_param_len("are supported by this server");
        let name = "W".repeat(max);

        let mut registry = ContributorRegistry::new();
        let flag = name.clone();
        registry.register(from_fn("wide", move |t| {
            t.flag(flag.as_str());
            Ok(())
        }));
        let first = manager.rebuild(&registry);
        assert!(first.snapshot.get(&name).is_some());

        let report = manager.rebuild(&ContributorRegistry::new());
        assert!(report.delta.is_empty());
        assert_eq!(
            report.diagnostics,
            [Diagnostic::Oversized {
                name: format!("-{name}"),
                len: max + 1,
                max,
            }]
        );
    }

    #[test]
    fn set_limits_applies_to_next_rebuild() {
        let manager = manager();
        let mut registry = ContributorRegistry::new();
        registry.register(from_fn("many", |t| {
            for i in 0..10 {
                t.set(format!("T{i}"), i);
            }
            Ok(())
        }));
        assert_eq!(manager.rebuild(&registry).snapshot.lines().len(), 1);

        manager.set_limits(LineLimits {
            max_params: 4,
            ..manager.limits()
        });
        assert_eq!(manager.limits().max_params, 4);
        assert_eq!(manager.rebuild(&registry).snapshot.lines().len(), 3);
    }

    #[test]
    fn fits_target_follows_reserve() {
        let manager = manager();
        assert!(manager.fits_target(&"n".repeat(30)));
        assert!(!manager.fits_target(&"n".repeat(31)));
    }

    #[test]
    fn panic_message_handles_payload_types() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown panic payload");
    }
}
