//! # Application Lifecycle
//!
//! [`AppSystem`] is the composition root: it builds the route table from
//! config, wires the profile API into the views that need it, owns the
//! [`Router`] and tears everything down on shutdown.
//!
//! ```rust,ignore
//! let mut system = AppSystem::new(AppConfig::default(), source)?;
//! let view = system.navigate("/about").await?;
//! system.shutdown().await?;
//! ```
//!
//! Shutdown unmounts the chain deepest first, so every timer acquired by a
//! page is released before the call returns. [`AppSystem::ledger`] exposes the
//! counts.

use std::sync::Arc;

use component_framework::{GuardLedger, HostSettings, JsonSource, Router, RouterError, View};
use tracing::{info, instrument};

use crate::api::ProfileApi;
use crate::components::TickCounter;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::{self, RouteDeps};

pub struct AppSystem {
    config: AppConfig,
    router: Router,
    ticks: TickCounter,
}

impl AppSystem {
    pub fn new(config: AppConfig, source: Arc<dyn JsonSource>) -> Result<Self, AppError> {
        let ticks = TickCounter::new();
        let deps = RouteDeps {
            api: ProfileApi::new(source, config.profile_url.clone()),
            tick_interval: config.tick_interval(),
            ticks: ticks.clone(),
        };
        let table = routes::build(config.route_set, &deps)?;
        info!(route_set = ?config.route_set, paths = ?table.paths(), "Route table ready");

        let settings = HostSettings::new(GuardLedger::new()).with_buffer_size(config.channel_capacity);
        Ok(Self {
            config,
            router: Router::with_settings(Arc::new(table), settings),
            ticks,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn ledger(&self) -> &Arc<GuardLedger> {
        self.router.ledger()
    }

    /// Total timer firings across all pages so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    #[instrument(skip(self))]
    pub async fn navigate(&mut self, path: &str) -> Result<View, RouterError> {
        self.router.navigate(path).await
    }

    /// Re-renders the current chain, picking up any loads that completed.
    pub async fn render(&self) -> Result<View, RouterError> {
        self.router.render().await
    }

    pub async fn shutdown(mut self) -> Result<(), RouterError> {
        info!("Shutting down...");
        self.router.shutdown().await?;
        info!(
            acquired = self.ledger().acquired(),
            released = self.ledger().released(),
            "Shutdown complete"
        );
        Ok(())
    }
}
