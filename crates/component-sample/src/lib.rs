//! # Component Sample
//!
//! The exercise app built on [`component_framework`]: a root layout with a nav
//! bar, an about page that loads a profile, and two pages that run a timer
//! while mounted.
//!
//! - **[`components`]**: the views and components.
//! - **[`routes`]**: the canonical route table and the superseded single-route one.
//! - **[`api`]**: the profile endpoint and [`UserInfo`](api::UserInfo).
//! - **[`config`]**: [`AppConfig`](config::AppConfig), loaded from TOML.
//! - **[`lifecycle`]**: [`AppSystem`](lifecycle::AppSystem), which wires it all together.

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod routes;
