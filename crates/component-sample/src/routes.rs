//! The app's route tables.
//!
//! Tables are built once at startup and handed to the router; nothing here is
//! global.

use std::time::Duration;

use component_framework::{RouteEntry, RouteTable, RouteTableError};

use crate::api::ProfileApi;
use crate::components::{About, Contact, Profile, ProfileCard, RootLayout, TickCounter};
use crate::config::RouteSet;

/// What the route views need to be constructed.
#[derive(Clone)]
pub struct RouteDeps {
    pub api: ProfileApi,
    pub tick_interval: Duration,
    pub ticks: TickCounter,
}

/// `/` (layout) with `/about`, `/contact` and `/profile`.
pub fn canonical(deps: &RouteDeps) -> Result<RouteTable, RouteTableError> {
    let about_api = deps.api.clone();
    let (contact_ticks, profile_ticks) = (deps.ticks.clone(), deps.ticks.clone());
    let interval = deps.tick_interval;

    RouteTable::new(
        RouteEntry::component("/", || RootLayout)
            .child(RouteEntry::component("/about", move || About::new(about_api.clone())))
            .child(RouteEntry::component("/contact", move || {
                Contact::new(interval, contact_ticks.clone())
            }))
            .child(RouteEntry::component("/profile", move || {
                Profile::new(interval, profile_ticks.clone())
            })),
    )
}

/// Superseded single-route layout: `/` with `/profile` showing the card.
pub fn profile_only(deps: &RouteDeps) -> Result<RouteTable, RouteTableError> {
    let api = deps.api.clone();
    RouteTable::new(
        RouteEntry::component("/", || RootLayout)
            .child(RouteEntry::component("/profile", move || ProfileCard::new(api.clone()))),
    )
}

pub fn build(set: RouteSet, deps: &RouteDeps) -> Result<RouteTable, RouteTableError> {
    match set {
        RouteSet::Canonical => canonical(deps),
        RouteSet::ProfileOnly => profile_only(deps),
    }
}
