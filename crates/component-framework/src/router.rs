//! # Router
//!
//! Keeps the chain of mounted instances in step with the current path.
//!
//! On every navigation the router resolves the new chain, unmounts the
//! instances that are no longer on it (deepest first), mounts fresh instances
//! for the new entries (outermost first) and renders the chain, nesting each
//! child's view into its parent's outlet. Entries shared by the old and new
//! chains, typically the root layout, stay mounted.
//!
//! A failed unmount ends the navigation with that error once every stale
//! instance has been unmounted: the new entries are not mounted and
//! `current()` is cleared, so the caller can navigate again from a known
//! chain.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{HostError, RouterError};
use crate::host::{HostSettings, Instance};
use crate::route::RouteTable;
use crate::timer::GuardLedger;
use crate::view::View;

struct MountedRoute {
    path: String,
    instance: Box<dyn Instance>,
}

/// Navigates a [`RouteTable`].
pub struct Router {
    table: Arc<RouteTable>,
    settings: HostSettings,
    mounted: Vec<MountedRoute>,
    current: Option<String>,
}

impl Router {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self::with_ledger(table, GuardLedger::new())
    }

    /// Uses `ledger` to account for the timers of every mounted instance.
    pub fn with_ledger(table: Arc<RouteTable>, ledger: Arc<GuardLedger>) -> Self {
        Self::with_settings(table, HostSettings::new(ledger))
    }

    /// Builds every mounted instance with `settings`.
    pub fn with_settings(table: Arc<RouteTable>, settings: HostSettings) -> Self {
        Self {
            table,
            settings,
            mounted: Vec::new(),
            current: None,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn ledger(&self) -> &Arc<GuardLedger> {
        self.settings.ledger()
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// The path of the last successful navigation.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Names of the mounted instances, outermost first.
    pub fn mounted(&self) -> Vec<&'static str> {
        self.mounted.iter().map(|m| m.instance.name()).collect()
    }

    /// Navigates to `path` and returns the composed view.
    ///
    /// An unknown path fails with [`RouteError::NotFound`](crate::error::RouteError::NotFound)
    /// and leaves the mounted chain untouched. A failed unmount or mount
    /// fails with [`RouterError::Host`] and clears `current()`.
    #[instrument(skip(self))]
    pub async fn navigate(&mut self, path: &str) -> Result<View, RouterError> {
        let table = self.table.clone();
        let chain = table.resolve(path)?;

        let keep = self
            .mounted
            .iter()
            .zip(&chain)
            .take_while(|(mounted, entry)| mounted.path == entry.path())
            .count();

        if let Some(e) = self.unmount_to(keep).await {
            self.current = None;
            return Err(e.into());
        }

        for entry in &chain[keep..] {
            let instance = entry.produce(&self.settings);
            if let Err(e) = instance.activate().await {
                warn!(route = entry.path(), error = %e, "Mount failed");
                self.current = None;
                return Err(e.into());
            }
            self.mounted.push(MountedRoute {
                path: entry.path().to_string(),
                instance,
            });
        }

        info!(chain = ?self.mounted(), "Navigated");
        self.current = Some(path.to_string());
        self.render().await
    }

    /// Renders the mounted chain with each child nested in its parent.
    pub async fn render(&self) -> Result<View, RouterError> {
        let mut composed: Option<View> = None;
        for route in self.mounted.iter().rev() {
            let view = route.instance.render().await?;
            composed = Some(match composed {
                Some(child) => view.fill_outlet(child),
                None => view,
            });
        }
        Ok(composed.unwrap_or_else(View::empty))
    }

    /// Unmounts everything, deepest first.
    pub async fn shutdown(&mut self) -> Result<(), RouterError> {
        let first_error = self.unmount_to(0).await;
        self.current = None;
        info!(outstanding = self.ledger().outstanding(), "Router shut down");
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    async fn unmount_to(&mut self, depth: usize) -> Option<HostError> {
        let mut first_error = None;
        while self.mounted.len() > depth {
            let Some(route) = self.mounted.pop() else {
                break;
            };
            if let Err(e) = route.instance.deactivate().await {
                warn!(route = %route.path, error = %e, "Unmount failed");
                first_error.get_or_insert(e);
            }
        }
        first_error
    }
}
