//! # Component Host
//!
//! The host controller that drives one component instance through
//!
//! ```text
//! Unmounted -> Mounting -> Active -> Unmounting -> Unmounted
//! ```
//!
//! It follows the same server/client split as a message-driven actor: a
//! [`ComponentHost`] task owns the component and its state and processes
//! [`HostRequest`]s one at a time, while cheap [`HostHandle`]s send requests
//! over an mpsc channel and wait on oneshot replies. Activation, deactivation,
//! renders and load completions are therefore strictly sequential per
//! instance and the state needs no lock.
//!
//! A component may mount child components from its `on_activate` through
//! [`Activation::mount_child`]. Children reach `Active` before their parent
//! does, are deactivated after the parent's own `on_deactivate`, and their
//! views fill the parent's outlets on every render request.
//!
//! Instances are single-use. Once an instance reaches the terminal
//! `Unmounted` phase (after deactivation or a failed activation) the host task
//! exits and every later request fails with [`HostError::HostClosed`]. A load
//! that completes after that point finds the channel closed and is dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::component::Component;
use crate::error::{FetchError, HostError};
use crate::timer::{GuardLedger, TimerHandle};
use crate::view::View;

/// Default capacity of a host's request channel.
pub const DEFAULT_BUFFER: usize = 32;

/// How hosts are built: the ledger they report to and the capacity of their
/// request channel.
#[derive(Debug, Clone)]
pub struct HostSettings {
    ledger: Arc<GuardLedger>,
    buffer_size: usize,
}

impl HostSettings {
    pub fn new(ledger: Arc<GuardLedger>) -> Self {
        Self {
            ledger,
            buffer_size: DEFAULT_BUFFER,
        }
    }

    /// Sets the request channel capacity. Zero is raised to one.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn ledger(&self) -> &Arc<GuardLedger> {
        &self.ledger
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

/// Lifecycle phase of a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Mounting,
    Active,
    Unmounting,
}

/// Type alias for the one-shot response channel used by hosts.
pub type Response<T> = oneshot::Sender<Result<T, HostError>>;

/// Point-in-time copy of an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<S> {
    pub phase: Phase,
    pub state: S,
    pub renders: u64,
}

/// Messages processed by a [`ComponentHost`].
#[derive(Debug)]
pub enum HostRequest<C: Component> {
    Activate {
        respond_to: Response<()>,
    },
    Deactivate {
        respond_to: Response<()>,
    },
    Render {
        respond_to: Response<View>,
    },
    Snapshot {
        respond_to: Response<Snapshot<C::State>>,
    },
    Loaded {
        outcome: Result<C::Event, FetchError>,
    },
}

// =============================================================================
// ACTIVATION CONTEXT
// =============================================================================

/// Context handed to [`Component::on_activate`].
///
/// Gives the component access to the resources the host knows how to guard:
/// repeating timers, one-shot asynchronous loads and child instances.
pub struct Activation<C: Component> {
    component: &'static str,
    inbox: mpsc::WeakSender<HostRequest<C>>,
    settings: HostSettings,
    loads: Vec<AbortHandle>,
    children: Vec<Box<dyn Instance>>,
}

impl<C: Component> Activation<C> {
    fn new(
        component: &'static str,
        inbox: mpsc::WeakSender<HostRequest<C>>,
        settings: HostSettings,
    ) -> Self {
        Self {
            component,
            inbox,
            settings,
            loads: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Starts a repeating timer. The component owns the returned handle and
    /// must release it in `on_deactivate`.
    pub fn set_interval<F>(&self, period: Duration, callback: F) -> TimerHandle
    where
        F: FnMut() + Send + 'static,
    {
        TimerHandle::start(period, self.settings.ledger.clone(), callback)
    }

    /// Starts one outbound load. Its outcome is applied through
    /// [`Component::reduce`] once the future resolves, unless the instance
    /// has been torn down by then.
    pub fn load<F>(&mut self, load: F)
    where
        F: Future<Output = Result<C::Event, FetchError>> + Send + 'static,
    {
        let inbox = self.inbox.clone();
        let component = self.component;
        let task = tokio::spawn(async move {
            let outcome = load.await;
            let delivered = match inbox.upgrade() {
                Some(sender) => sender.send(HostRequest::Loaded { outcome }).await.is_ok(),
                None => false,
            };
            if !delivered {
                debug!(component, "Load completed after teardown, discarded");
            }
        });
        self.loads.push(task.abort_handle());
        debug!(component, in_flight = self.loads.len(), "Load started");
    }

    /// Hosts `child` and activates it before returning.
    ///
    /// The child shares this instance's settings. Its view fills the next
    /// unfilled outlet of the parent's view, in mount order, and it is
    /// deactivated after the parent's `on_deactivate`.
    pub async fn mount_child<K: Component>(&mut self, child: K) -> Result<HostHandle<K>, HostError> {
        let handle = ComponentHost::spawn_with(child, &self.settings);
        debug!(parent = self.component, child = handle.name(), "Mounting child");
        handle.activate().await?;
        self.children.push(Box::new(handle.clone()));
        Ok(handle)
    }

    pub fn ledger(&self) -> &Arc<GuardLedger> {
        &self.settings.ledger
    }

    fn cancel_loads(&mut self) -> usize {
        let mut cancelled = 0;
        for load in self.loads.drain(..) {
            if !load.is_finished() {
                load.abort();
                cancelled += 1;
            }
        }
        cancelled
    }
}

// =============================================================================
// THE HOST SERVER
// =============================================================================

/// Drives a single component instance.
pub struct ComponentHost<C: Component> {
    receiver: mpsc::Receiver<HostRequest<C>>,
    inbox: mpsc::WeakSender<HostRequest<C>>,
    component: C,
    name: &'static str,
    state: C::State,
    phase: Phase,
    renders: u64,
    view: watch::Sender<View>,
    settings: HostSettings,
    activation: Option<Activation<C>>,
}

impl<C: Component> ComponentHost<C> {
    /// Creates a host and its handle. The host does nothing until
    /// [`ComponentHost::run`] is spawned.
    pub fn new(component: C, settings: HostSettings) -> (Self, HostHandle<C>) {
        let (sender, receiver) = mpsc::channel(settings.buffer_size);
        let name = component.name();
        let state = C::State::default();
        let (view, view_rx) = watch::channel(component.view(&state));
        let host = Self {
            receiver,
            inbox: sender.downgrade(),
            component,
            name,
            state,
            phase: Phase::Unmounted,
            renders: 0,
            view,
            settings,
            activation: None,
        };
        (host, HostHandle::new(name, sender, view_rx))
    }

    /// Creates the host with default settings and spawns its loop on the
    /// current runtime.
    pub fn spawn(component: C, ledger: Arc<GuardLedger>) -> HostHandle<C> {
        Self::spawn_with(component, &HostSettings::new(ledger))
    }

    pub fn spawn_with(component: C, settings: &HostSettings) -> HostHandle<C> {
        let (host, handle) = Self::new(component, settings.clone());
        tokio::spawn(host.run());
        handle
    }

    /// Processes requests until the instance is torn down or every handle
    /// has been dropped. An instance still active when the handles go away is
    /// deactivated before the loop exits.
    pub async fn run(mut self) {
        let component = self.name;
        debug!(component, "Host started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HostRequest::Activate { respond_to } => {
                    if self.phase != Phase::Unmounted {
                        let _ = respond_to.send(Err(HostError::InvalidPhase {
                            expected: Phase::Unmounted,
                            actual: self.phase,
                        }));
                        continue;
                    }
                    let result = self.activate().await;
                    let failed = result.is_err();
                    let _ = respond_to.send(result);
                    if failed {
                        break;
                    }
                }
                HostRequest::Deactivate { respond_to } => {
                    if self.phase != Phase::Active {
                        let _ = respond_to.send(Err(HostError::InvalidPhase {
                            expected: Phase::Active,
                            actual: self.phase,
                        }));
                        continue;
                    }
                    let result = self.teardown().await;
                    let _ = respond_to.send(result);
                    break;
                }
                HostRequest::Render { respond_to } => {
                    let _ = respond_to.send(self.compose().await);
                }
                HostRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(Snapshot {
                        phase: self.phase,
                        state: self.state.clone(),
                        renders: self.renders,
                    }));
                }
                HostRequest::Loaded { outcome } => self.apply(outcome),
            }
        }

        if self.phase == Phase::Active {
            warn!(component, "Handles dropped while active, deactivating");
            if let Err(e) = self.teardown().await {
                warn!(component, error = %e, "Deactivation failed");
            }
        }
        debug!(component, renders = self.renders, "Host stopped");
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(component = self.name, from = ?self.phase, to = ?phase, "Phase");
        self.phase = phase;
        self.settings.ledger.record(self.name, phase);
    }

    async fn activate(&mut self) -> Result<(), HostError> {
        self.set_phase(Phase::Mounting);
        let mut activation = Activation::new(self.name, self.inbox.clone(), self.settings.clone());
        let result = self.component.on_activate(&mut activation).await;
        self.activation = Some(activation);

        match result {
            Ok(()) => {
                self.set_phase(Phase::Active);
                info!(component = self.name, "Mounted");
                self.render();
                Ok(())
            }
            Err(e) => {
                warn!(component = self.name, error = %e, "Activation failed");
                if let Err(cleanup) = self.teardown().await {
                    warn!(component = self.name, error = %cleanup, "Cleanup after failed activation failed");
                }
                Err(HostError::Activation(Box::new(e)))
            }
        }
    }

    async fn teardown(&mut self) -> Result<(), HostError> {
        self.set_phase(Phase::Unmounting);
        let cancelled = self
            .activation
            .as_mut()
            .map(Activation::cancel_loads)
            .unwrap_or(0);
        let mut result = self
            .component
            .on_deactivate()
            .await
            .map_err(|e| HostError::Deactivation(Box::new(e)));

        let children = self
            .activation
            .as_mut()
            .map(|activation| std::mem::take(&mut activation.children))
            .unwrap_or_default();
        for child in children.into_iter().rev() {
            if let Err(e) = child.deactivate().await {
                warn!(component = self.name, child = child.name(), error = %e, "Child unmount failed");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        self.set_phase(Phase::Unmounted);
        info!(component = self.name, cancelled_loads = cancelled, "Unmounted");
        result
    }

    fn apply(&mut self, outcome: Result<C::Event, FetchError>) {
        if self.phase != Phase::Active {
            debug!(component = self.name, phase = ?self.phase, "Load completion for inactive instance discarded");
            return;
        }
        match outcome {
            Ok(event) => {
                debug!(component = self.name, ?event, "Load completed");
                self.state = C::reduce(&self.state, event);
                self.render();
            }
            Err(e) => warn!(component = self.name, error = %e, "Load failed"),
        }
    }

    /// The latest view with each child's composed view in the next outlet.
    async fn compose(&mut self) -> Result<View, HostError> {
        let mut view = self.view.borrow().clone();
        if let Some(activation) = &self.activation {
            for child in &activation.children {
                view = view.fill_outlet(child.render().await?);
            }
        }
        Ok(view)
    }

    fn render(&mut self) {
        let view = self.component.view(&self.state);
        self.renders += 1;
        debug!(component = self.name, renders = self.renders, "Render");
        self.view.send_replace(view);
    }
}

// =============================================================================
// THE HOST CLIENT
// =============================================================================

/// Handle for driving a [`ComponentHost`].
pub struct HostHandle<C: Component> {
    name: &'static str,
    sender: mpsc::Sender<HostRequest<C>>,
    view: watch::Receiver<View>,
}

impl<C: Component> Clone for HostHandle<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            sender: self.sender.clone(),
            view: self.view.clone(),
        }
    }
}

impl<C: Component> HostHandle<C> {
    fn new(name: &'static str, sender: mpsc::Sender<HostRequest<C>>, view: watch::Receiver<View>) -> Self {
        Self { name, sender, view }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> HostRequest<C>,
    ) -> Result<T, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    pub async fn activate(&self) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::Activate { respond_to })
            .await
    }

    pub async fn deactivate(&self) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::Deactivate { respond_to })
            .await
    }

    /// The most recent render, with mounted children nested in it.
    pub async fn render(&self) -> Result<View, HostError> {
        self.request(|respond_to| HostRequest::Render { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<Snapshot<C::State>, HostError> {
        self.request(|respond_to| HostRequest::Snapshot { respond_to })
            .await
    }

    /// Watches renders. The receiver sees the latest view of this instance
    /// after every state transition; child views are not nested in.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view.clone()
    }
}

/// Type-erased view of a hosted instance, used where different component
/// types sit side by side (the router's mounted chain).
#[async_trait]
pub trait Instance: Send + Sync {
    fn name(&self) -> &'static str;
    async fn activate(&self) -> Result<(), HostError>;
    async fn deactivate(&self) -> Result<(), HostError>;
    async fn render(&self) -> Result<View, HostError>;
}

#[async_trait]
impl<C: Component> Instance for HostHandle<C> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn activate(&self) -> Result<(), HostError> {
        HostHandle::activate(self).await
    }

    async fn deactivate(&self) -> Result<(), HostError> {
        HostHandle::deactivate(self).await
    }

    async fn render(&self) -> Result<View, HostError> {
        HostHandle::render(self).await
    }
}
