//! # EventLoop: registration API and worker lifecycle owner.
//!
//! The [`EventLoop`] owns the listener registry, the observability bus, and
//! at most one live polling worker. Registration calls may arrive from any
//! thread; the loop serializes lifecycle transitions through the registry's
//! single lock.
//!
//! ## High-level architecture
//! ```text
//! callers (any thread)
//!   │  add_listener / add / remove_listener / remove_all_listeners / stop
//!   ▼
//! EventLoop ──► Registry (listeners + WorkerState, one mutex)
//!   │                │
//!   │ first registration while no worker is alive:
//!   └──► spawn PollWorker (seq N, CancellationToken)
//!                    │
//!                    └──► passes over registry snapshots,
//!                         exits on empty registry or cancellation
//!
//! Observability:
//!   EventLoop / PollWorker ── publish(Event) ──► Bus ──► SubscriberSet
//! ```
//!
//! ## Lifecycle
//! The worker starts lazily on the first registration, runs while the
//! registry is non-empty, and exits after any pass that observes an empty
//! registry. `stop()` halts the worker without clearing the registry; the
//! next registration spawns a fresh worker that resumes the residual
//! registry.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use spinwatch::{Config, EventLoop};
//!
//! #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
//! async fn main() {
//!     let eloop = EventLoop::new(Config::default());
//!
//!     let ready = Arc::new(AtomicBool::new(false));
//!     let observed = Arc::clone(&ready);
//!     let listener = eloop
//!         .add_listener(
//!             move || observed.load(Ordering::Acquire),
//!             || println!("ready!"),
//!         )
//!         .expect("registration");
//!
//!     ready.store(true, Ordering::Release);
//!     // ... the handler fires on the worker's next pass ...
//!
//!     eloop.remove_listener(&listener);
//! }
//! ```

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::core::registry::Registry;
use crate::core::worker::{PollWorker, WorkerState};
use crate::events::{Bus, Event, EventKind};
use crate::listeners::{Condition, Handler, Listener, ListenerRef};
use crate::subscribers::{Subscribe, SubscriberSet};

/// A lazily-started background polling loop.
///
/// Callers register a condition together with a handler; a single background
/// worker repeatedly evaluates all registered conditions and invokes the
/// corresponding handler whenever a condition holds.
///
/// ### Rules
/// - The worker is alive iff the registry was non-empty at the start of its
///   most recent pass; it may still be finishing a pass after the registry
///   was drained.
/// - Registration never blocks the caller beyond registry insertion and a
///   possible worker spawn.
/// - Listener identity is reference identity: the same [`ListenerRef`]
///   registered twice is two independent entries.
///
/// Dropping the loop cancels any live worker.
pub struct EventLoop {
    registry: Arc<Registry>,
    bus: Bus,
    config: Config,
    runtime: Handle,
}

impl EventLoop {
    /// Creates a loop with no subscribers.
    ///
    /// Must be called within a Tokio runtime; the loop captures the runtime
    /// handle so later registrations may arrive from any thread.
    pub fn new(config: Config) -> Self {
        Self::with_subscribers(config, Vec::new())
    }

    /// Creates a loop and wires the given subscribers to its event bus.
    ///
    /// Events flow through a fan-out task into per-subscriber queues; a slow
    /// or panicking subscriber never affects the polling worker.
    pub fn with_subscribers(config: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(config.bus_capacity);
        let runtime = Handle::current();

        if !subscribers.is_empty() {
            let set = SubscriberSet::new(subscribers);
            let mut rx = bus.subscribe();
            runtime.spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            });
        }

        Self {
            registry: Arc::new(Registry::new()),
            bus,
            config,
            runtime,
        }
    }

    /// Builds a listener from the given condition and handler, registers it,
    /// and ensures a worker is running.
    ///
    /// Returns the constructed listener, or `None` if the registry rejected
    /// the insertion ("not registered", not a fault).
    pub fn add_listener<C, H>(&self, condition: C, handler: H) -> Option<ListenerRef>
    where
        C: Condition,
        H: Handler,
    {
        self.add(Listener::arc(condition, handler))
    }

    /// Registers a pre-built listener; enables reuse/sharing across calls.
    ///
    /// Each call inserts an independent registry entry, even for a
    /// [`ListenerRef`] that is already registered. Identical return contract
    /// to [`EventLoop::add_listener`].
    pub fn add(&self, listener: ListenerRef) -> Option<ListenerRef> {
        if !self.registry.insert(listener.clone()) {
            return None;
        }
        self.bus
            .publish(Event::new(EventKind::ListenerAdded).with_listener(listener.id()));
        self.ensure_worker();
        Some(listener)
    }

    /// Removes the first registry entry identity-equal to `listener`.
    ///
    /// Returns the removed listener, or `None` if no entry matched. Never
    /// stops the worker, even if the registry becomes empty: the worker
    /// discovers emptiness at its own next pass boundary.
    pub fn remove_listener(&self, listener: &ListenerRef) -> Option<ListenerRef> {
        let removed = self.registry.remove(listener)?;
        self.bus
            .publish(Event::new(EventKind::ListenerRemoved).with_listener(removed.id()));
        Some(removed)
    }

    /// Atomically replaces the registry with an empty one.
    ///
    /// Does not interrupt an in-progress pass; the worker exits at its next
    /// pass-boundary check.
    pub fn remove_all_listeners(&self) {
        let drained = self.registry.clear();
        self.bus.publish(
            Event::new(EventKind::RegistryCleared).with_reason(format!("{drained} listeners")),
        );
    }

    /// Removes each of the given listeners via the single-removal path.
    ///
    /// Not atomic as a whole: registrations interleaved with this batch
    /// observe partial progress.
    pub fn remove_listeners(&self, listeners: &[ListenerRef]) {
        for listener in listeners {
            let _ = self.remove_listener(listener);
        }
    }

    /// Signals the current worker to terminate at its next cancellation
    /// check and returns without waiting for it to exit.
    ///
    /// A no-op when no worker is alive. The registry is left untouched: a
    /// later registration spawns a fresh worker that immediately resumes
    /// processing all previously-registered listeners.
    pub fn stop(&self) {
        if let Some(seq) = self.registry.request_stop() {
            self.bus
                .publish(Event::new(EventKind::WorkerStopping).with_worker(seq));
        }
    }

    /// Current lifecycle state of the polling worker.
    pub fn state(&self) -> WorkerState {
        self.registry.state()
    }

    /// Number of entries currently in the registry.
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    /// Creates a receiver observing subsequent loop events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    fn ensure_worker(&self) {
        if let Some((seq, cancel)) = self.registry.begin_worker() {
            let worker = PollWorker {
                registry: Arc::clone(&self.registry),
                bus: self.bus.clone(),
                pass_interval: self.config.pass_interval,
                seq,
                cancel,
            };
            self.runtime.spawn(worker.run());
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        let _ = self.registry.request_stop();
    }
}
