//! Walks the route surface once, printing each render.
//!
//! ```bash
//! RUST_LOG=info cargo run -p component-sample
//! ```
//!
//! Reads `app.toml` from the working directory if present.

use std::sync::Arc;

use component_framework::tracing::setup_tracing;
use component_framework::HttpJsonSource;
use component_sample::config::AppConfig;
use component_sample::error::AppError;
use component_sample::lifecycle::AppSystem;
use tracing::{error, info, Instrument};

const USER_AGENT: &str = concat!("component-sample/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let config = AppConfig::load_or_default("app.toml")?;
    info!(?config, "Starting");
    let dwell = config.tick_interval() * 5 / 2;

    let source = Arc::new(HttpJsonSource::new(USER_AGENT)?);
    let mut system = AppSystem::new(config, source)?;

    for path in ["/", "/about", "/contact", "/profile", "/missing"] {
        let span = tracing::info_span!("navigation", path);
        let result = async {
            let view = system.navigate(path).await?;
            info!(%view, "Rendered");
            tokio::time::sleep(dwell).await;
            system.render().await
        }
        .instrument(span)
        .await;

        match result {
            Ok(view) => info!(path, %view, ticks = system.ticks(), "Settled"),
            Err(e) => error!(path, error = %e, "Navigation failed"),
        }
    }

    system.shutdown().await?;
    Ok(())
}
