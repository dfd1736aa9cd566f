use std::convert::Infallible;
use std::future::Future;

use async_trait::async_trait;
use component_framework::{Activation, Component, FetchError, View};
use tracing::info;

use crate::api::{ProfileApi, UserInfo};

#[derive(Debug)]
pub enum ProfileEvent {
    Loaded(UserInfo),
}

/// Shows a user's public profile, loaded once on activation.
///
/// Renders the empty record until the load resolves.
#[derive(Clone)]
pub struct ProfileCard {
    api: ProfileApi,
}

impl ProfileCard {
    pub fn new(api: ProfileApi) -> Self {
        Self { api }
    }

    /// The load this card starts when activated.
    pub fn load(&self) -> impl Future<Output = Result<ProfileEvent, FetchError>> + Send + 'static {
        let api = self.api.clone();
        async move { api.fetch().await.map(ProfileEvent::Loaded) }
    }

    pub fn apply(_state: &UserInfo, event: ProfileEvent) -> UserInfo {
        match event {
            ProfileEvent::Loaded(info) => info,
        }
    }

    pub fn render(state: &UserInfo) -> View {
        View::element("div")
            .attr("class", "profile-card")
            .child(View::element("h1").with_text(state.name.clone()))
            .child(View::element("h1").with_text(state.age.to_string()))
            .child(View::element("h1").with_text(state.location.clone()))
            .child(View::element("img").attr("src", state.avatar_url.clone()))
    }
}

#[async_trait]
impl Component for ProfileCard {
    type State = UserInfo;
    type Event = ProfileEvent;
    type Error = Infallible;

    fn reduce(state: &UserInfo, event: ProfileEvent) -> UserInfo {
        Self::apply(state, event)
    }

    fn view(&self, state: &UserInfo) -> View {
        Self::render(state)
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), Infallible> {
        info!(url = self.api.url(), "Profile card mounted, loading profile");
        ctx.load(self.load());
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), Infallible> {
        info!("Profile card unmounting");
        Ok(())
    }
}
