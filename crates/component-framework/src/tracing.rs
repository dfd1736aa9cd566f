//! # Observability
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! What gets logged:
//!
//! - **Lifecycle**: `Mounted` / `Unmounted` at `info`, phase changes at `debug`
//! - **Resources**: timer acquire/release at `debug`, ticks at `trace`
//! - **Loads**: start and completion at `debug`, failures at `warn`
//! - **Navigation**: the mounted chain after each navigation at `info`
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run    # phases, renders, load payloads
//! RUST_LOG=trace cargo run    # every timer tick
//! ```
//!
//! Every event carries a `component` field, so the module path is left out.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
