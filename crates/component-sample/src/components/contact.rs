use std::convert::Infallible;
use std::time::Duration;

use async_trait::async_trait;
use component_framework::timer::release_slot;
use component_framework::{Activation, Component, TimerHandle, View};
use tracing::info;

use super::TickCounter;

/// Contact page. Runs a timer while mounted and releases it explicitly on
/// deactivation.
pub struct Contact {
    interval: Duration,
    ticks: TickCounter,
    timer: Option<TimerHandle>,
}

impl Contact {
    pub fn new(interval: Duration, ticks: TickCounter) -> Self {
        Self {
            interval,
            ticks,
            timer: None,
        }
    }
}

#[async_trait]
impl Component for Contact {
    type State = ();
    type Event = ();
    type Error = Infallible;

    fn view(&self, _state: &()) -> View {
        View::element("h1").with_text("Contact Page")
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), Infallible> {
        let ticks = self.ticks.clone();
        self.timer = Some(ctx.set_interval(self.interval, move || {
            let count = ticks.bump();
            info!(ticks = count, "Timer is running");
        }));
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), Infallible> {
        info!("Contact unmounting, clearing timer");
        release_slot(&mut self.timer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use component_framework::{ComponentHost, GuardLedger};

    #[tokio::test(start_paused = true)]
    async fn test_timer_cleared_on_unmount() {
        let ledger = GuardLedger::new();
        let ticks = TickCounter::new();
        let handle = ComponentHost::spawn(
            Contact::new(Duration::from_secs(1), ticks.clone()),
            ledger.clone(),
        );

        handle.activate().await.unwrap();
        assert_eq!(handle.render().await.unwrap().text_content(), "Contact Page");
        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.deactivate().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(ticks.get(), 2);
        assert_eq!(ledger.acquired(), 1);
        assert_eq!(ledger.released(), 1);
    }
}
