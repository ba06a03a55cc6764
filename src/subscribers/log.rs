//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [added] listener=3
//! [removed] listener=3
//! [cleared] reason="2 listeners"
//! [worker-started] worker=1
//! [worker-stopping] worker=1
//! [worker-stopped] worker=1 reason="registry drained"
//! [condition-panic] listener=3 reason="..."
//! [handler-panic] listener=3 reason="..."
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use -
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ListenerAdded => {
                println!("[added] listener={:?}", e.listener);
            }
            EventKind::ListenerRemoved => {
                println!("[removed] listener={:?}", e.listener);
            }
            EventKind::RegistryCleared => {
                println!("[cleared] reason={:?}", e.reason);
            }
            EventKind::WorkerStarted => {
                println!("[worker-started] worker={:?}", e.worker);
            }
            EventKind::WorkerStopping => {
                println!("[worker-stopping] worker={:?}", e.worker);
            }
            EventKind::WorkerStopped => {
                println!("[worker-stopped] worker={:?} reason={:?}", e.worker, e.reason);
            }
            EventKind::ConditionPanicked => {
                println!("[condition-panic] listener={:?} reason={:?}", e.listener, e.reason);
            }
            EventKind::HandlerPanicked => {
                println!("[handler-panic] listener={:?} reason={:?}", e.listener, e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
