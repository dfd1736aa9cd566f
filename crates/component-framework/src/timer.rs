//! # Lifecycle Resource Guard
//!
//! A [`TimerHandle`] is a repeating timer owned by exactly one component
//! instance. Components acquire one in `on_activate` through
//! [`Activation::set_interval`](crate::host::Activation::set_interval) and
//! release it in `on_deactivate`.
//!
//! Releasing is idempotent, and dropping a handle releases it, so a component
//! that failed to activate before it acquired anything can still run its
//! normal release path.
//!
//! Once [`TimerHandle::release`] returns, the callback is not running and
//! never runs again: the timer task only fires while holding the gate lock
//! and release closes the gate under that same lock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::host::Phase;

/// Number of phase transitions a ledger remembers.
const TRAIL_LEN: usize = 256;

/// Counts guard acquisitions and releases for a set of component instances,
/// and keeps a bounded trail of their phase transitions.
///
/// A host shares one ledger with every activation it drives, so leaks show up
/// as `outstanding() > 0` after all instances are unmounted.
#[derive(Debug, Default)]
pub struct GuardLedger {
    acquired: AtomicUsize,
    released: AtomicUsize,
    trail: Mutex<VecDeque<(&'static str, Phase)>>,
}

impl GuardLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn outstanding(&self) -> usize {
        self.acquired().saturating_sub(self.released())
    }

    pub(crate) fn record(&self, component: &'static str, phase: Phase) {
        let mut trail = self.trail.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if trail.len() == TRAIL_LEN {
            trail.pop_front();
        }
        trail.push_back((component, phase));
    }

    /// The most recent phase transitions, oldest first. Parents and the
    /// children they mount interleave in the order the hosts ran them.
    pub fn transitions(&self) -> Vec<(&'static str, Phase)> {
        let trail = self.trail.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        trail.iter().copied().collect()
    }
}

struct Armed {
    gate: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
    ledger: Arc<GuardLedger>,
}

fn lock(gate: &Mutex<bool>) -> MutexGuard<'_, bool> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to a running repeating timer.
pub struct TimerHandle {
    id: usize,
    armed: Option<Armed>,
}

impl TimerHandle {
    /// Starts a timer that calls `callback` every `period`, first firing one
    /// `period` after this call. Must be called inside a tokio runtime.
    pub fn start<F>(period: Duration, ledger: Arc<GuardLedger>, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let id = ledger.acquired.fetch_add(1, Ordering::SeqCst) + 1;
        let gate = Arc::new(Mutex::new(true));
        let task_gate = gate.clone();

        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                {
                    let open = lock(&task_gate);
                    if !*open {
                        break;
                    }
                    trace!(timer = id, "Tick");
                    callback();
                }
            }
        });

        debug!(timer = id, ?period, "Timer acquired");
        Self {
            id,
            armed: Some(Armed { gate, task, ledger }),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    /// Cancels the timer. Safe to call any number of times.
    pub fn release(&mut self) {
        let Some(armed) = self.armed.take() else {
            return;
        };
        *lock(&armed.gate) = false;
        armed.task.abort();
        armed.ledger.released.fetch_add(1, Ordering::SeqCst);
        debug!(timer = self.id, "Timer released");
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Releases a timer slot that may never have been filled.
///
/// Components keep their handle as `Option<TimerHandle>`; this lets
/// `on_deactivate` run the same way whether or not activation got far enough
/// to acquire it.
pub fn release_slot(slot: &mut Option<TimerHandle>) {
    if let Some(mut handle) = slot.take() {
        handle.release();
    }
}
