//! # Lifecycle events emitted by the event loop.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Registry events**: listener registration flow (added, removed, cleared)
//! - **Worker events**: polling worker lifecycle (started, stopping, stopped)
//! - **Fault events**: panics caught while evaluating a listener
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! listener or worker identity, and a human-readable reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use spinwatch::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ListenerAdded)
//!     .with_listener(7)
//!     .with_reason("demo");
//!
//! assert_eq!(ev.kind, EventKind::ListenerAdded);
//! assert_eq!(ev.listener, Some(7));
//! assert_eq!(ev.reason.as_deref(), Some("demo"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of loop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registry events ===
    /// A listener was inserted into the registry.
    ///
    /// Sets:
    /// - `listener`: listener id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ListenerAdded,

    /// A listener was removed from the registry.
    ///
    /// Sets:
    /// - `listener`: listener id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ListenerRemoved,

    /// The registry was atomically replaced with an empty one.
    ///
    /// Sets:
    /// - `reason`: number of listeners drained
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RegistryCleared,

    // === Worker events ===
    /// A polling worker began its first pass.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerStarted,

    /// `stop()` signalled the current worker to terminate.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerStopping,

    /// A polling worker exited.
    ///
    /// Sets:
    /// - `worker`: worker id
    /// - `reason`: exit cause (`"registry drained"`, `"cancelled"`, `"superseded"`)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerStopped,

    // === Fault events ===
    /// A condition panicked while being tested; the listener was skipped for
    /// this pass and stays registered.
    ConditionPanicked,

    /// A handler panicked while being invoked; the listener stays registered.
    HandlerPanicked,
}

/// Loop event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Identity of the listener, if applicable.
    pub listener: Option<u64>,
    /// Identity of the polling worker, if applicable.
    pub worker: Option<u64>,
    /// Human-readable reason (fault messages, exit causes, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            listener: None,
            worker: None,
            reason: None,
        }
    }

    /// Attaches a listener identity.
    #[inline]
    pub fn with_listener(mut self, listener: u64) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Attaches a worker identity.
    #[inline]
    pub fn with_worker(mut self, worker: u64) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a fault event for a caught listener panic.
    #[inline]
    pub(crate) fn listener_fault(listener: u64, err: &crate::error::ListenerError) -> Self {
        use crate::error::ListenerError;

        let kind = match err {
            ListenerError::ConditionPanic { .. } => EventKind::ConditionPanicked,
            ListenerError::HandlerPanic { .. } => EventKind::HandlerPanicked,
        };
        Event::new(kind)
            .with_listener(listener)
            .with_reason(err.as_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;

    #[test]
    fn test_seq_is_strictly_increasing() {
        let a = Event::new(EventKind::WorkerStarted);
        let b = Event::new(EventKind::WorkerStopped);
        let c = Event::new(EventKind::ListenerAdded);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::new(EventKind::WorkerStopped)
            .with_worker(3)
            .with_reason("registry drained");
        assert_eq!(ev.worker, Some(3));
        assert_eq!(ev.listener, None);
        assert_eq!(ev.reason.as_deref(), Some("registry drained"));
    }

    #[test]
    fn test_listener_fault_maps_variant_to_kind() {
        let cond = ListenerError::ConditionPanic { reason: "a".into() };
        let hand = ListenerError::HandlerPanic { reason: "b".into() };

        let ev = Event::listener_fault(1, &cond);
        assert_eq!(ev.kind, EventKind::ConditionPanicked);
        assert_eq!(ev.listener, Some(1));

        let ev = Event::listener_fault(2, &hand);
        assert_eq!(ev.kind, EventKind::HandlerPanicked);
        assert!(ev.reason.as_deref().unwrap_or("").contains("b"));
    }
}
