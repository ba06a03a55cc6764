//! # Caller-supplied capabilities: conditions and handlers.
//!
//! Both traits are object-safe and blanket-implemented for plain closures,
//! so most callers never implement them by hand:
//!
//! ```rust
//! use spinwatch::Listener;
//!
//! let listener = Listener::arc(|| true, || println!("fired"));
//! ```
//!
//! Implement the traits directly when the capability carries state:
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use spinwatch::Condition;
//!
//! struct Flag(AtomicBool);
//!
//! impl Condition for Flag {
//!     fn test(&self) -> bool {
//!         self.0.load(Ordering::Acquire)
//!     }
//! }
//! ```

/// # Synchronous predicate polled once per pass.
///
/// Tested by the polling worker for every pass in which its listener is
/// registered. No purity is assumed: a condition may observe external state
/// or have side effects, and it may return different answers on consecutive
/// passes.
///
/// Implementations should return quickly. The worker evaluates every
/// registered listener sequentially, so a slow condition delays the whole
/// pass and cancellation detection with it.
pub trait Condition: Send + Sync + 'static {
    /// Tests whether the paired handler should fire this pass.
    fn test(&self) -> bool;
}

impl<F> Condition for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn test(&self) -> bool {
        self()
    }
}

/// # Synchronous action fired when its condition holds.
///
/// Invoked on the polling worker, once per pass per listener whose condition
/// holds. There is no automatic de-registration: a handler that wants
/// one-shot behavior must remove its own listener from the loop.
///
/// A blocking or slow handler stalls evaluation of every other registered
/// listener for that pass.
pub trait Handler: Send + Sync + 'static {
    /// Performs the action.
    fn fire(&self);
}

impl<F> Handler for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn fire(&self) {
        self()
    }
}
