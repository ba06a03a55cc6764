//! # Shared registry and worker lifecycle state.
//!
//! One mutex guards both the ordered listener sequence and the worker
//! lifecycle fields, so every transition that depends on "is the registry
//! empty" and "is a worker alive" is decided atomically.
//!
//! ## Architecture
//! ```text
//! callers ──► insert / remove / clear ──┐
//!                                       ├──► Mutex<RegistryInner>
//! worker  ──► snapshot / finish_pass ───┘        ├─ listeners: Vec<ListenerRef>
//!                                                ├─ state: WorkerState
//!                                                ├─ cancel: Option<CancellationToken>
//!                                                └─ worker_seq: u64
//! ```
//!
//! ## Rules
//! - **Snapshot-per-pass**: the worker never iterates the live sequence; it
//!   clones it at pass start. Mutations made during a pass become visible at
//!   the next pass boundary.
//! - **No user code under the lock**: conditions and handlers run against the
//!   snapshot, after the guard is released, so handlers may re-enter the
//!   registry (e.g. to remove their own listener) without deadlocking.
//! - **Worker identity**: every started worker gets a fresh `worker_seq`. A
//!   worker may only transition the shared state while it is still the
//!   current worker; a superseded worker exits without touching it.
//! - **Ordered, duplicates allowed**: insertion order is preserved and the
//!   same `ListenerRef` may be registered more than once; each registration
//!   is an independent entry.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::core::worker::WorkerState;
use crate::listeners::ListenerRef;

/// Outcome of the worker's pass-boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PassOutcome {
    /// Registry still has listeners; run another pass.
    Continue,
    /// Registry is empty; the worker has transitioned the state to
    /// `NotRunning` and must exit.
    Drained,
    /// A newer worker owns the lifecycle state; exit without touching it.
    Superseded,
}

struct RegistryInner {
    listeners: Vec<ListenerRef>,
    state: WorkerState,
    cancel: Option<CancellationToken>,
    worker_seq: u64,
}

/// Registry of active listeners plus the worker lifecycle it drives.
pub(crate) struct Registry {
    inner: Mutex<RegistryInner>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                listeners: Vec::new(),
                state: WorkerState::NotRunning,
                cancel: None,
                worker_seq: 0,
            }),
        }
    }

    fn guard(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a listener. Returns `false` only if the registry rejects the
    /// insertion; callers surface that as a failed registration.
    pub(crate) fn insert(&self, listener: ListenerRef) -> bool {
        match self.inner.lock() {
            Ok(mut g) => {
                g.listeners.push(listener);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes the first entry that is the same allocation as `listener`.
    pub(crate) fn remove(&self, listener: &ListenerRef) -> Option<ListenerRef> {
        let mut g = self.guard();
        let idx = g
            .listeners
            .iter()
            .position(|l| std::sync::Arc::ptr_eq(l, listener))?;
        Some(g.listeners.remove(idx))
    }

    /// Atomically replaces the sequence with an empty one; returns the number
    /// of entries drained.
    pub(crate) fn clear(&self) -> usize {
        std::mem::take(&mut self.guard().listeners).len()
    }

    /// Copies the current sequence for one polling pass.
    pub(crate) fn snapshot(&self) -> Vec<ListenerRef> {
        self.guard().listeners.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.guard().listeners.len()
    }

    pub(crate) fn state(&self) -> WorkerState {
        self.guard().state
    }

    /// Claims the worker slot. Returns the new worker's identity and its
    /// cancellation token, or `None` if a worker is already running.
    pub(crate) fn begin_worker(&self) -> Option<(u64, CancellationToken)> {
        let mut g = self.guard();
        if g.state == WorkerState::Running {
            return None;
        }
        g.worker_seq += 1;
        let token = CancellationToken::new();
        g.cancel = Some(token.clone());
        g.state = WorkerState::Running;
        Some((g.worker_seq, token))
    }

    /// Signals the current worker to terminate at its next cancellation check
    /// and drops the registry's reference to its token.
    ///
    /// Idle no-op: returns `None` when no worker is running, including when a
    /// previous stop is still draining.
    pub(crate) fn request_stop(&self) -> Option<u64> {
        let mut g = self.guard();
        if g.state != WorkerState::Running {
            return None;
        }
        if let Some(token) = g.cancel.take() {
            token.cancel();
        }
        g.state = WorkerState::Stopping;
        Some(g.worker_seq)
    }

    /// Pass-boundary check run by the worker identified by `seq`.
    ///
    /// Decides, atomically with respect to registrations, whether that worker
    /// keeps running or exits. A registration that lands after a `Drained`
    /// outcome observes `NotRunning` and claims a fresh worker, so no
    /// listener is ever left behind by the exit race.
    pub(crate) fn finish_pass(&self, seq: u64) -> PassOutcome {
        let mut g = self.guard();
        if g.worker_seq != seq {
            return PassOutcome::Superseded;
        }
        if g.listeners.is_empty() {
            g.state = WorkerState::NotRunning;
            g.cancel = None;
            return PassOutcome::Drained;
        }
        PassOutcome::Continue
    }

    /// Cancellation exit path: transitions to `NotRunning` iff the caller is
    /// still the current worker.
    pub(crate) fn finish_worker(&self, seq: u64) -> bool {
        let mut g = self.guard();
        if g.worker_seq != seq {
            return false;
        }
        g.state = WorkerState::NotRunning;
        g.cancel = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Listener;

    #[test]
    fn test_insert_preserves_order_and_duplicates() {
        let registry = Registry::new();
        let a = Listener::arc(|| false, || {});
        let b = Listener::arc(|| false, || {});

        assert!(registry.insert(a.clone()));
        assert!(registry.insert(b.clone()));
        assert!(registry.insert(a.clone()));
        assert_eq!(registry.len(), 3);

        let snap = registry.snapshot();
        assert_eq!(snap[0].id(), a.id());
        assert_eq!(snap[1].id(), b.id());
        assert_eq!(snap[2].id(), a.id());
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let registry = Registry::new();
        let a = Listener::arc(|| false, || {});
        registry.insert(a.clone());
        registry.insert(a.clone());

        assert!(registry.remove(&a).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(&a).is_some());
        assert_eq!(registry.len(), 0);
        assert!(registry.remove(&a).is_none());
    }

    #[test]
    fn test_remove_miss_returns_none_and_leaves_size() {
        let registry = Registry::new();
        let registered = Listener::arc(|| false, || {});
        let stranger = Listener::arc(|| false, || {});
        registry.insert(registered);

        assert!(registry.remove(&stranger).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_swaps_in_empty_registry() {
        let registry = Registry::new();
        registry.insert(Listener::arc(|| false, || {}));
        registry.insert(Listener::arc(|| false, || {}));

        assert_eq!(registry.clear(), 2);
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.clear(), 0);
    }

    #[test]
    fn test_begin_worker_claims_slot_once() {
        let registry = Registry::new();
        let (seq, _token) = registry.begin_worker().expect("first claim");
        assert_eq!(registry.state(), WorkerState::Running);
        assert!(registry.begin_worker().is_none());

        assert!(registry.finish_worker(seq));
        assert_eq!(registry.state(), WorkerState::NotRunning);

        let (next, _token) = registry.begin_worker().expect("reclaim after finish");
        assert_ne!(next, seq);
    }

    #[test]
    fn test_request_stop_is_idle_noop() {
        let registry = Registry::new();
        assert!(registry.request_stop().is_none());
        assert_eq!(registry.state(), WorkerState::NotRunning);
    }

    #[test]
    fn test_request_stop_cancels_and_is_idempotent() {
        let registry = Registry::new();
        let (seq, token) = registry.begin_worker().expect("claim");

        assert_eq!(registry.request_stop(), Some(seq));
        assert!(token.is_cancelled());
        assert_eq!(registry.state(), WorkerState::Stopping);

        // Second stop while the old worker drains: nothing left to signal.
        assert!(registry.request_stop().is_none());
    }

    #[test]
    fn test_finish_pass_drains_only_when_empty() {
        let registry = Registry::new();
        let listener = Listener::arc(|| false, || {});
        registry.insert(listener.clone());

        let (seq, _token) = registry.begin_worker().expect("claim");
        assert_eq!(registry.finish_pass(seq), PassOutcome::Continue);

        registry.remove(&listener);
        assert_eq!(registry.finish_pass(seq), PassOutcome::Drained);
        assert_eq!(registry.state(), WorkerState::NotRunning);
    }

    #[test]
    fn test_finish_pass_superseded_after_restart() {
        let registry = Registry::new();
        registry.insert(Listener::arc(|| false, || {}));

        let (old, _token) = registry.begin_worker().expect("claim");
        registry.request_stop();
        let (new, _token) = registry.begin_worker().expect("reclaim");

        assert_eq!(registry.finish_pass(old), PassOutcome::Superseded);
        // The replacement still owns the state.
        assert_eq!(registry.state(), WorkerState::Running);
        assert_eq!(registry.finish_pass(new), PassOutcome::Continue);
        assert!(!registry.finish_worker(old));
    }
}
