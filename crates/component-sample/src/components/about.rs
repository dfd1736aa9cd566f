use async_trait::async_trait;
use component_framework::{Activation, Component, HostError, View};
use tracing::{debug, info};

use super::profile_card::ProfileCard;
use crate::api::ProfileApi;

/// The about page. Hosts a [`ProfileCard`] as its child instance.
///
/// The card mounts, and starts its load, while the page is still mounting,
/// and unmounts after the page. Its view fills the page's outlet.
pub struct About {
    api: ProfileApi,
}

impl About {
    pub fn new(api: ProfileApi) -> Self {
        debug!("About constructed");
        Self { api }
    }
}

#[async_trait]
impl Component for About {
    type State = ();
    type Event = ();
    type Error = HostError;

    fn view(&self, _state: &()) -> View {
        View::element("div")
            .child(View::element("h1").with_text("About"))
            .child(View::Outlet)
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), HostError> {
        debug!("About mounting, mounting profile card");
        ctx.mount_child(ProfileCard::new(self.api.clone())).await?;
        info!("About mounted");
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), HostError> {
        info!("About unmounting");
        Ok(())
    }
}
