//! # Example: with_logger
//!
//! Wire the built-in [`LogWriter`] subscriber and watch the loop's lifecycle
//! events on stdout.
//!
//! ## Run
//! ```bash
//! cargo run --example with_logger --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use spinwatch::{Config, EventLoop, LogWriter, Subscribe, WorkerState};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let mut cfg = Config::default();
    cfg.pass_interval = Duration::from_millis(5);

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let eloop = EventLoop::with_subscribers(cfg, subs);

    let listener = eloop
        .add_listener(|| false, || {})
        .expect("registration");

    tokio::time::sleep(Duration::from_millis(50)).await;

    eloop.remove_listener(&listener);
    while eloop.state() != WorkerState::NotRunning {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // Give the fan-out a moment to print the trailing worker-stopped event.
    tokio::time::sleep(Duration::from_millis(50)).await;
}
