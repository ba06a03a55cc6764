//! # Listener: an immutable (condition, handler) pairing.
//!
//! A [`Listener`] binds one [`Condition`] to one [`Handler`] and carries a
//! process-unique id. Identity is reference-based: registering the same
//! [`ListenerRef`] twice yields two independent registry entries, and two
//! structurally identical listeners are still distinct.
//!
//! ## Example
//! ```rust
//! use spinwatch::Listener;
//!
//! let a = Listener::arc(|| false, || {});
//! let b = Listener::arc(|| false, || {});
//! assert_ne!(a.id(), b.id());
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::ListenerError;
use crate::listeners::{Condition, Handler};

/// Global counter for listener identities.
static LISTENER_SEQ: AtomicU64 = AtomicU64::new(0);

/// Shared reference to a listener, suitable for registering, sharing across
/// threads, and removing by identity.
pub type ListenerRef = Arc<Listener>;

/// Immutable pairing of one [`Condition`] and one [`Handler`].
///
/// Holds no mutable state of its own. The id is assigned at construction and
/// is used for identity in events and debug output.
pub struct Listener {
    id: u64,
    condition: Box<dyn Condition>,
    handler: Box<dyn Handler>,
}

impl Listener {
    /// Creates a new listener from a condition and a handler.
    ///
    /// Prefer [`Listener::arc`] when you immediately need a [`ListenerRef`].
    pub fn new<C, H>(condition: C, handler: H) -> Self
    where
        C: Condition,
        H: Handler,
    {
        Self {
            id: LISTENER_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            condition: Box::new(condition),
            handler: Box::new(handler),
        }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use spinwatch::{Listener, ListenerRef};
    ///
    /// let l: ListenerRef = Listener::arc(|| true, || {});
    /// ```
    pub fn arc<C, H>(condition: C, handler: H) -> ListenerRef
    where
        C: Condition,
        H: Handler,
    {
        Arc::new(Self::new(condition, handler))
    }

    /// Returns the process-unique identity of this listener.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Evaluates this listener once: tests the condition and, if it holds,
    /// fires the handler.
    ///
    /// Returns `Ok(true)` if the handler fired, `Ok(false)` if the condition
    /// did not hold. A panic in either capability is caught and returned as a
    /// [`ListenerError`] so one faulty listener cannot unwind the worker.
    pub(crate) fn poll(&self) -> Result<bool, ListenerError> {
        let ready = panic::catch_unwind(AssertUnwindSafe(|| self.condition.test()))
            .map_err(ListenerError::condition_panic)?;
        if !ready {
            return Ok(false);
        }

        panic::catch_unwind(AssertUnwindSafe(|| self.handler.fire()))
            .map_err(ListenerError::handler_panic)?;
        Ok(true)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn test_ids_are_distinct() {
        let a = Listener::new(|| true, || {});
        let b = Listener::new(|| true, || {});
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_poll_fires_handler_when_condition_holds() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let listener = Listener::new(|| true, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(matches!(listener.poll(), Ok(true)));
        assert!(matches!(listener.poll(), Ok(true)));
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_poll_skips_handler_when_condition_is_false() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let listener = Listener::new(|| false, move || {
            flag.store(true, Ordering::SeqCst);
        });

        assert!(matches!(listener.poll(), Ok(false)));
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_condition_panic_is_caught() {
        let listener = Listener::new(|| -> bool { panic!("bad predicate") }, || {});
        let err = listener.poll().unwrap_err();
        assert_eq!(err.as_label(), "condition_panic");
        assert!(err.as_message().contains("bad predicate"));
    }

    #[test]
    fn test_handler_panic_is_caught() {
        let listener = Listener::new(|| true, || panic!("bad action"));
        let err = listener.poll().unwrap_err();
        assert_eq!(err.as_label(), "handler_panic");
        assert!(err.as_message().contains("bad action"));
    }
}
