//! # spinwatch
//!
//! **Spinwatch** is a lightweight, lazily-started condition polling loop.
//!
//! Callers register a *condition* (a synchronous predicate) together with a
//! *handler* (a synchronous action); a single background worker repeatedly
//! evaluates all registered conditions and invokes the corresponding handler
//! whenever a condition holds. It exists so application code can react to
//! state changes (sensor flags, I/O readiness, external progress markers)
//! without each caller managing its own polling thread.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │   Listener   │   │   Listener   │   │   Listener   │
//!  │ (cond, hand) │   │ (cond, hand) │   │ (cond, hand) │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventLoop                                                │
//! │  - Registry (ordered listeners + WorkerState, one lock)   │
//! │  - Bus (broadcast lifecycle events)                       │
//! │  - at most one PollWorker at a time                       │
//! └──────────────────────────┬────────────────────────────────┘
//!                            ▼
//!                     ┌──────────────┐
//!                     │  PollWorker  │   per pass, in insertion order:
//!                     │ (pass loop)  │   condition.test() ──► handler.fire()
//!                     └──────┬───────┘
//!                            │ publishes WorkerStarted / WorkerStopped /
//!                            │ ConditionPanicked / HandlerPanicked ...
//!                            ▼
//!               Bus ──► SubscriberSet ──► user sinks (optional)
//! ```
//!
//! ### Lifecycle
//! ```text
//! add_listener() ──► Registry grows ──► worker spawned if NotRunning
//!
//! worker pass:
//!   ├─► cancellation check (once per pass)
//!   ├─► snapshot registry, evaluate every listener
//!   └─► registry empty at pass boundary? ──► worker exits (NotRunning)
//!
//! stop() ──► cancel token, keep registry ──► next add_listener()
//!            spawns a fresh worker that resumes the residual registry
//! ```
//!
//! ## Semantics
//! | Guarantee         | Description                                                              |
//! |-------------------|--------------------------------------------------------------------------|
//! | **Laziness**      | The worker only runs while listeners are registered.                     |
//! | **Identity**      | Listeners compare by reference; duplicates are independent entries.      |
//! | **Snapshots**     | Each pass iterates a snapshot; mutations land at the next pass boundary. |
//! | **Isolation**     | A panicking condition/handler is reported and skipped, never fatal.      |
//! | **Latency**       | Busy-spin by default; [`Config::pass_interval`] caps the polling rate.   |
//! | **Observability** | Lifecycle events on a broadcast [`Bus`], consumed via [`Subscribe`].     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//! use spinwatch::{Config, EventLoop, WorkerState};
//!
//! #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.pass_interval = Duration::from_millis(1);
//!
//!     let eloop = Arc::new(EventLoop::new(cfg));
//!
//!     // A flag some other part of the program flips.
//!     let ready = Arc::new(AtomicBool::new(false));
//!
//!     let observed = Arc::clone(&ready);
//!     let listener = eloop
//!         .add_listener(
//!             move || observed.swap(false, Ordering::AcqRel),
//!             || println!("flag observed high"),
//!         )
//!         .expect("registration");
//!
//!     ready.store(true, Ordering::Release);
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!
//!     // Halt the worker; the registry survives a stop().
//!     eloop.stop();
//!     assert_eq!(eloop.listener_count(), 1);
//!
//!     eloop.remove_listener(&listener);
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod listeners;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{EventLoop, WorkerState};
pub use config::Config;
pub use error::ListenerError;
pub use events::{Bus, Event, EventKind};
pub use listeners::{Condition, Handler, Listener, ListenerRef};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
