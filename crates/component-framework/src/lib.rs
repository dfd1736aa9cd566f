//! # Component Framework
//!
//! A small host for view-producing components with guarded lifecycles and a
//! static route table.
//!
//! ## Core Concepts
//!
//! - **[`Component`]**: a pure `view(&state)` plus a pure `reduce(&state, event)`,
//!   with `on_activate` / `on_deactivate` hooks.
//! - **[`ComponentHost`]**: drives one instance through
//!   `Unmounted -> Mounting -> Active -> Unmounting -> Unmounted`, applying load
//!   results and re-rendering after every transition.
//! - **[`TimerHandle`]**: the resource guard. Acquired on activation, released
//!   on deactivation, idempotent, released on drop.
//! - **[`Activation::mount_child`]**: a component hosting child components.
//!   Children mount inside the parent's activation, unmount after the
//!   parent's own hook, and render inside the parent's outlet.
//! - **[`RouteTable`] / [`Router`]**: exact-match nested routes, each child
//!   rendered inside its parent's outlet.
//! - **[`JsonSource`]**: the seam for outbound loads, with
//!   [`mock::MockJsonSource`] for tests.
//!
//! ## Concurrency Model
//!
//! Each instance gets its own host task that handles requests one at a time,
//! so component state is never shared. Timers and loads run as separate tasks
//! and only talk back to the host through its channel.

pub mod component;
pub mod error;
pub mod fetch;
pub mod host;
pub mod mock;
pub mod route;
pub mod router;
pub mod timer;
pub mod tracing;
pub mod view;

// Re-export core types for convenience
pub use component::Component;
pub use error::{FetchError, HostError, RouteError, RouteTableError, RouterError};
pub use fetch::{HttpJsonSource, JsonSource};
pub use host::{Activation, ComponentHost, HostHandle, HostSettings, Instance, Phase, Snapshot};
pub use route::{RouteEntry, RouteTable, ViewProducer};
pub use router::Router;
pub use timer::{GuardLedger, TimerHandle};
pub use view::View;
