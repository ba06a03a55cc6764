//! Error types raised by listener evaluation.
//!
//! The polling worker evaluates caller-supplied conditions and handlers.
//! Those capabilities are opaque to the loop, so the only fault they can
//! produce is a panic. [`ListenerError`] captures a caught panic from either
//! half of a listener so the worker can report it and keep polling the rest
//! of the registry.

use std::any::Any;

use thiserror::Error;

/// # Faults raised while evaluating a single listener.
///
/// A fault is scoped to the listener that produced it: the worker publishes
/// the error on the bus, skips the listener for the current pass, and keeps
/// evaluating every other registered listener. The faulting listener stays
/// registered and is evaluated again on the next pass.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The listener's condition panicked while being tested.
    #[error("condition panicked: {reason}")]
    ConditionPanic {
        /// Stringified panic payload.
        reason: String,
    },

    /// The listener's handler panicked while being invoked.
    #[error("handler panicked: {reason}")]
    HandlerPanic {
        /// Stringified panic payload.
        reason: String,
    },
}

impl ListenerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use spinwatch::ListenerError;
    ///
    /// let err = ListenerError::HandlerPanic { reason: "boom".into() };
    /// assert_eq!(err.as_label(), "handler_panic");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::ConditionPanic { .. } => "condition_panic",
            ListenerError::HandlerPanic { .. } => "handler_panic",
        }
    }

    /// Returns a human-readable message with details about the fault.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::ConditionPanic { reason } => format!("condition panic: {reason}"),
            ListenerError::HandlerPanic { reason } => format!("handler panic: {reason}"),
        }
    }

    pub(crate) fn condition_panic(payload: Box<dyn Any + Send>) -> Self {
        ListenerError::ConditionPanic {
            reason: panic_reason(&*payload),
        }
    }

    pub(crate) fn handler_panic(payload: Box<dyn Any + Send>) -> Self {
        ListenerError::HandlerPanic {
            reason: panic_reason(&*payload),
        }
    }
}

/// Extracts a printable message from a caught panic payload.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let cond = ListenerError::ConditionPanic { reason: "x".into() };
        let hand = ListenerError::HandlerPanic { reason: "x".into() };
        assert_eq!(cond.as_label(), "condition_panic");
        assert_eq!(hand.as_label(), "handler_panic");
    }

    #[test]
    fn test_panic_reason_from_str_and_string() {
        let from_str: Box<dyn Any + Send> = Box::new("static payload");
        assert_eq!(panic_reason(&*from_str), "static payload");

        let from_string: Box<dyn Any + Send> = Box::new(String::from("owned payload"));
        assert_eq!(panic_reason(&*from_string), "owned payload");

        let opaque: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_reason(&*opaque), "non-string panic payload");
    }

    #[test]
    fn test_message_includes_reason() {
        let err = ListenerError::HandlerPanic { reason: "boom".into() };
        assert!(err.as_message().contains("boom"));
    }
}
