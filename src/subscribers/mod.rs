//! # Event subscribers for the loop's observability bus.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery
//! that delivers [`Event`](crate::events::Event)s to user sinks.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   EventLoop / PollWorker ── publish(Event) ──► Bus
//!                                                 │
//!                                        (fan-out listener)
//!                                                 │
//!                                          SubscriberSet::emit
//!                                       ┌─────────┼─────────┐
//!                                       ▼         ▼         ▼
//!                                  [queue S1] [queue S2] [queue SN]
//!                                       ▼         ▼         ▼
//!                                  sub1.on_event  ...  subN.on_event
//! ```
//!
//! Subscribers are purely observational: they cannot influence registration
//! or worker lifecycle, and the loop is correct with zero subscribers.

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
