//! Listener abstractions and capabilities.
//!
//! This module provides the caller-facing types:
//! - [`Condition`] - trait for synchronous, repeatedly-tested predicates
//! - [`Handler`] - trait for synchronous actions fired when a condition holds
//! - [`Listener`] - immutable pairing of one condition and one handler
//! - [`ListenerRef`] - shared reference to a listener (`Arc<Listener>`)

mod capability;
mod listener;

pub use capability::{Condition, Handler};
pub use listener::{Listener, ListenerRef};
