use std::convert::Infallible;
use std::time::Duration;

use async_trait::async_trait;
use component_framework::{Activation, Component, TimerHandle, View};
use tracing::info;

use super::TickCounter;

/// Profile page. Holds its timer as an effect whose cleanup is dropping the
/// handle.
pub struct Profile {
    interval: Duration,
    ticks: TickCounter,
    effect: Option<TimerHandle>,
}

impl Profile {
    pub fn new(interval: Duration, ticks: TickCounter) -> Self {
        Self {
            interval,
            ticks,
            effect: None,
        }
    }
}

#[async_trait]
impl Component for Profile {
    type State = ();
    type Event = ();
    type Error = Infallible;

    fn view(&self, _state: &()) -> View {
        View::element("h1").with_text("Profile")
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), Infallible> {
        let ticks = self.ticks.clone();
        self.effect = Some(ctx.set_interval(self.interval, move || {
            let count = ticks.bump();
            info!(ticks = count, "I am running");
        }));
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), Infallible> {
        info!("Cleanup of Profile");
        drop(self.effect.take());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use component_framework::{ComponentHost, GuardLedger};

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_releases_effect() {
        let ledger = GuardLedger::new();
        let ticks = TickCounter::new();
        let handle = ComponentHost::spawn(
            Profile::new(Duration::from_millis(100), ticks.clone()),
            ledger.clone(),
        );

        handle.activate().await.unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;
        handle.deactivate().await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(ticks.get(), 4);
        assert_eq!(ledger.outstanding(), 0);
    }
}
