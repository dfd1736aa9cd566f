use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use component_framework::timer::release_slot;
use component_framework::{
    Activation, Component, GuardLedger, HostError, HostSettings, RouteEntry, RouteError,
    RouteTable, Router, RouterError, TimerHandle, View,
};

type Journal = Arc<Mutex<Vec<String>>>;

/// Records mount/unmount order and keeps a timer while mounted.
struct Page {
    name: &'static str,
    journal: Journal,
    timer: Option<TimerHandle>,
}

#[async_trait]
impl Component for Page {
    type State = ();
    type Event = ();
    type Error = Infallible;

    fn name(&self) -> &'static str {
        self.name
    }

    fn view(&self, _state: &()) -> View {
        if self.name == "Layout" {
            View::element("div")
                .child(View::element("nav").with_text("nav"))
                .child(View::Outlet)
        } else {
            View::element("h1").with_text(self.name)
        }
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), Infallible> {
        self.journal.lock().unwrap().push(format!("mount {}", self.name));
        self.timer = Some(ctx.set_interval(Duration::from_secs(1), || {}));
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), Infallible> {
        self.journal.lock().unwrap().push(format!("unmount {}", self.name));
        release_slot(&mut self.timer);
        Ok(())
    }
}

fn page(name: &'static str, journal: &Journal) -> impl Fn() -> Page + Send + Sync + 'static {
    let journal = journal.clone();
    move || Page {
        name,
        journal: journal.clone(),
        timer: None,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cleanup refused")]
struct CleanupRefused;

/// Holds a timer and fails its own deactivation after releasing it.
struct Brittle {
    timer: Option<TimerHandle>,
}

#[async_trait]
impl Component for Brittle {
    type State = ();
    type Event = ();
    type Error = CleanupRefused;

    fn view(&self, _state: &()) -> View {
        View::element("h1").with_text("Brittle")
    }

    async fn on_activate(&mut self, ctx: &mut Activation<Self>) -> Result<(), CleanupRefused> {
        self.timer = Some(ctx.set_interval(Duration::from_secs(1), || {}));
        Ok(())
    }

    async fn on_deactivate(&mut self) -> Result<(), CleanupRefused> {
        release_slot(&mut self.timer);
        Err(CleanupRefused)
    }
}

fn router(journal: &Journal) -> Router {
    let table = RouteTable::new(
        RouteEntry::component("/", page("Layout", journal))
            .child(RouteEntry::component("/about", page("About", journal)))
            .child(RouteEntry::component("/contact", page("Contact", journal))),
    )
    .unwrap();
    Router::new(Arc::new(table))
}

fn take(journal: &Journal) -> Vec<String> {
    std::mem::take(&mut *journal.lock().unwrap())
}

#[tokio::test]
async fn test_navigation_mounts_chain_and_nests_views() {
    let journal = Journal::default();
    let mut router = router(&journal);

    let view = router.navigate("/about").await.unwrap();
    assert_eq!(router.mounted(), vec!["Layout", "About"]);
    assert_eq!(take(&journal), vec!["mount Layout", "mount About"]);
    assert_eq!(view.to_string(), "<div><nav>nav</nav><h1>About</h1></div>");
    assert_eq!(router.current(), Some("/about"));

    router.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_switching_child_keeps_layout_mounted() {
    let journal = Journal::default();
    let mut router = router(&journal);

    router.navigate("/about").await.unwrap();
    take(&journal);

    let view = router.navigate("/contact").await.unwrap();
    assert_eq!(take(&journal), vec!["unmount About", "mount Contact"]);
    assert_eq!(view.text_content(), "navContact");

    let view = router.navigate("/").await.unwrap();
    assert_eq!(take(&journal), vec!["unmount Contact"]);
    assert_eq!(router.mounted(), vec!["Layout"]);
    assert_eq!(view.to_string(), "<div><nav>nav</nav></div>");

    router.shutdown().await.unwrap();
    assert_eq!(take(&journal), vec!["unmount Layout"]);
}

#[tokio::test]
async fn test_unknown_path_leaves_mounts_untouched() {
    let journal = Journal::default();
    let mut router = router(&journal);
    router.navigate("/about").await.unwrap();
    take(&journal);

    let err = router.navigate("/nowhere").await.unwrap_err();
    assert!(matches!(
        err,
        RouterError::Route(RouteError::NotFound(ref p)) if p == "/nowhere"
    ));
    assert!(take(&journal).is_empty());
    assert_eq!(router.mounted(), vec!["Layout", "About"]);
    assert_eq!(router.current(), Some("/about"));

    router.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_every_timer_released_after_shutdown() {
    let journal = Journal::default();
    let mut router = router(&journal);

    for path in ["/", "/about", "/contact", "/about", "/"] {
        router.navigate(path).await.unwrap();
    }
    router.shutdown().await.unwrap();

    let ledger = router.ledger();
    assert_eq!(ledger.acquired(), 4);
    assert_eq!(ledger.released(), ledger.acquired());
    assert!(router.mounted().is_empty());
    assert_eq!(router.current(), None);
}

#[tokio::test]
async fn test_render_before_navigation_is_empty() {
    let journal = Journal::default();
    let router = router(&journal);
    assert_eq!(router.render().await.unwrap(), View::empty());
}

#[tokio::test]
async fn test_failed_unmount_fails_navigation() {
    let journal = Journal::default();
    let table = RouteTable::new(
        RouteEntry::component("/", page("Layout", &journal))
            .child(RouteEntry::component("/brittle", || Brittle { timer: None }))
            .child(RouteEntry::component("/about", page("About", &journal))),
    )
    .unwrap();
    let mut router = Router::new(Arc::new(table));
    router.navigate("/brittle").await.unwrap();
    take(&journal);

    let err = router.navigate("/about").await.unwrap_err();
    assert!(matches!(err, RouterError::Host(HostError::Deactivation(_))));
    assert_eq!(router.mounted(), vec!["Layout"]);
    assert_eq!(router.current(), None);
    assert!(take(&journal).is_empty());

    let view = router.navigate("/about").await.unwrap();
    assert_eq!(view.text_content(), "navAbout");
    router.shutdown().await.unwrap();
    assert_eq!(router.ledger().outstanding(), 0);
}

#[tokio::test]
async fn test_router_builds_hosts_with_its_settings() {
    let journal = Journal::default();
    let table = RouteTable::new(
        RouteEntry::component("/", page("Layout", &journal))
            .child(RouteEntry::component("/about", page("About", &journal))),
    )
    .unwrap();
    let settings = HostSettings::new(GuardLedger::new()).with_buffer_size(1);
    let mut router = Router::with_settings(Arc::new(table), settings);

    assert_eq!(router.settings().buffer_size(), 1);
    router.navigate("/about").await.unwrap();
    assert_eq!(router.render().await.unwrap().text_content(), "navAbout");
    router.shutdown().await.unwrap();
    assert_eq!(router.ledger().acquired(), 2);
    assert_eq!(router.ledger().outstanding(), 0);
}
