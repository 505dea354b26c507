//! Module lifecycle glue: keeps the registry and the cache in step.

use super::contributor::{ContributorRegistry, TokenContributor};
use super::manager::{IsupportManager, RebuildReport};
use crate::error::IsupportError;
use parking_lot::Mutex;
use slirc_isupport::LineLimits;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the contributor registry and rebuilds the cache whenever a module
/// comes or goes.
///
/// The registry lock is held across each rebuild so that concurrent
/// load/unload calls publish in the order they changed the registry.
pub struct ModuleHost {
    registry: Mutex<ContributorRegistry>,
    manager: IsupportManager,
}

impl ModuleHost {
    pub fn new(manager: IsupportManager) -> Self {
        Self {
            registry: Mutex::new(ContributorRegistry::new()),
            manager,
        }
    }

    /// Create a host with an initial set of contributors, registered in order.
    ///
    /// Nothing is built until [`boot`](Self::boot).
    pub fn with_contributors<I>(manager: IsupportManager, contributors: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TokenContributor>>,
    {
        let mut registry = ContributorRegistry::new();
        for contributor in contributors {
            registry.register(contributor);
        }
        Self {
            registry: Mutex::new(registry),
            manager,
        }
    }

    /// Build and publish the first snapshot.
    ///
    /// Must complete before any client can finish registration.
    pub fn boot(&self) -> RebuildReport {
        let registry = self.registry.lock();
        let report = self.manager.rebuild(&registry);
        info!(
            modules = ?registry.names(),
            lines = report.snapshot.lines().len(),
            "ISUPPORT ready"
        );
        report
    }

    /// Register a module's contributor and rebuild.
    pub fn load(&self, contributor: Arc<dyn TokenContributor>) -> RebuildReport {
        let mut registry = self.registry.lock();
        let name = contributor.name().to_string();
        if registry.register(contributor).is_some() {
            info!(module = %name, "Module reloaded");
        } else {
            info!(module = %name, "Module loaded");
        }
        self.manager.rebuild(&registry)
    }

    /// Unregister a module's contributor and rebuild.
    ///
    /// Returns `None`, without rebuilding, if no such module is loaded.
    pub fn unload(&self, name: &str) -> Option<RebuildReport> {
        let mut registry = self.registry.lock();
        if registry.unregister(name).is_none() {
            debug!(module = %name, "Unload of unknown module ignored");
            return None;
        }
        info!(module = %name, "Module unloaded");
        Some(self.manager.rebuild(&registry))
    }

    /// Replace the whole contributor set and rebuild once.
    ///
    /// Used on configuration reload, where every built-in contributor is
    /// recreated from the new configuration.
    pub fn reload<I>(&self, contributors: I) -> RebuildReport
    where
        I: IntoIterator<Item = Arc<dyn TokenContributor>>,
    {
        self.replace(None, contributors)
    }

    /// Like [`reload`](Self::reload), but also switch to new line limits
    /// first, so a larger advertised `NICKLEN` gets a matching reserve.
    pub fn reconfigure<I>(&self, limits: LineLimits, contributors: I) -> RebuildReport
    where
        I: IntoIterator<Item = Arc<dyn TokenContributor>>,
    {
        self.replace(Some(limits), contributors)
    }

    fn replace<I>(&self, limits: Option<LineLimits>, contributors: I) -> RebuildReport
    where
        I: IntoIterator<Item = Arc<dyn TokenContributor>>,
    {
        let mut registry = self.registry.lock();
        let mut next = ContributorRegistry::new();
        for contributor in contributors {
            next.register(contributor);
        }
        *registry = next;
        info!(modules = ?registry.names(), "Modules reloaded");
        if let Some(limits) = limits {
            self.manager.set_limits(limits);
        }
        self.manager.rebuild(&registry)
    }

    /// Names of loaded modules in registration order.
    pub fn module_names(&self) -> Vec<String> {
        self.registry
            .lock()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Serialized 005 lines for one client.
    pub fn send_to(&self, target: &str) -> Result<Vec<String>, IsupportError> {
        self.manager.send_to(target)
    }

    pub fn manager(&self) -> &IsupportManager {
        &self.manager
    }
}
