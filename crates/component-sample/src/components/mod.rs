//! The app's views and components.
//!
//! - [`RootLayout`]: nav bar, outlet, footer. Mounted for every path.
//! - [`About`]: the about page, hosting a [`ProfileCard`] child instance.
//! - [`ProfileCard`]: loads the profile record on activation.
//! - [`Contact`] / [`Profile`]: each runs a repeating timer while mounted.

pub mod about;
pub mod contact;
pub mod footer;
pub mod layout;
pub mod nav;
pub mod profile;
pub mod profile_card;

pub use about::About;
pub use contact::Contact;
pub use layout::RootLayout;
pub use profile::Profile;
pub use profile_card::{ProfileCard, ProfileEvent};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared count of timer firings, for the demo output and tests.
#[derive(Debug, Clone, Default)]
pub struct TickCounter(Arc<AtomicU64>);

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}
