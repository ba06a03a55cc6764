//! # PollWorker: the background polling pass loop.
//!
//! One worker runs at a time, spawned lazily by the first registration and
//! torn down when a pass observes an empty registry or `stop()` cancels it.
//!
//! ## Pass loop
//! ```text
//! loop {
//!   ├─► cancellation check (once per pass)
//!   ├─► snapshot registry
//!   ├─► for each listener: condition.test() ──true──► handler.fire()
//!   │        └─ panic → publish ConditionPanicked / HandlerPanicked, continue
//!   ├─► finish_pass()
//!   │     ├─► Drained    → publish WorkerStopped("registry drained"), exit
//!   │     ├─► Superseded → publish WorkerStopped("superseded"), exit
//!   │     └─► Continue
//!   └─► inter-pass wait (yield, or cancellable sleep when configured)
//! }
//! ```
//!
//! ## Rules
//! - Listeners are evaluated **synchronously, in insertion order**, once per
//!   pass per listener whose condition holds.
//! - Cancellation is polled once per full pass; latency is bounded by one
//!   complete pass over all current listeners and their handlers.
//! - A panicking listener is reported and skipped; the pass continues.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;

use crate::core::registry::{PassOutcome, Registry};
use crate::events::{Bus, Event, EventKind};

/// Lifecycle state of the polling worker, owned by the registry.
///
/// ```text
/// NotRunning ──(first registration)──► Running ──(stop())──► Stopping
///     ▲                                   │                     │
///     │                 (pass sees empty registry)      (loop body exits)
///     └───────────────────────────────────┴─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// No worker is alive. Initial state; re-entered after every exit.
    NotRunning,
    /// A worker is scanning the registry.
    Running,
    /// `stop()` was signalled; the worker exits at its next cancellation check.
    Stopping,
}

/// One spawned instance of the polling loop.
pub(crate) struct PollWorker {
    pub(crate) registry: Arc<Registry>,
    pub(crate) bus: Bus,
    pub(crate) pass_interval: Duration,
    pub(crate) seq: u64,
    pub(crate) cancel: CancellationToken,
}

impl PollWorker {
    pub(crate) async fn run(self) {
        self.bus
            .publish(Event::new(EventKind::WorkerStarted).with_worker(self.seq));

        loop {
            if self.cancel.is_cancelled() {
                self.registry.finish_worker(self.seq);
                self.exit("cancelled");
                return;
            }

            for listener in self.registry.snapshot() {
                match listener.poll() {
                    Ok(_fired) => {}
                    Err(err) => {
                        self.bus.publish(Event::listener_fault(listener.id(), &err));
                    }
                }
            }

            match self.registry.finish_pass(self.seq) {
                PassOutcome::Continue => {}
                PassOutcome::Drained => {
                    self.exit("registry drained");
                    return;
                }
                PassOutcome::Superseded => {
                    self.exit("superseded");
                    return;
                }
            }

            if self.pass_interval.is_zero() {
                task::yield_now().await;
            } else {
                select! {
                    _ = self.cancel.cancelled() => {}
                    _ = time::sleep(self.pass_interval) => {}
                }
            }
        }
    }

    fn exit(&self, reason: &'static str) {
        self.bus.publish(
            Event::new(EventKind::WorkerStopped)
                .with_worker(self.seq)
                .with_reason(reason),
        );
    }
}
