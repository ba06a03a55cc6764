//! # Example: stop_resume
//!
//! `stop()` halts the worker without clearing the registry. A later
//! registration spawns a fresh worker that resumes every previously
//! registered listener, not just the newest one.
//!
//! ## Flow
//! ```text
//! add_listener(L1)  → worker #1 starts, L1 fires
//! stop()            → worker #1 exits, registry still holds L1
//! add_listener(L2)  → worker #2 starts, L1 and L2 both fire
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example stop_resume
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use spinwatch::{Config, EventLoop, WorkerState};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let mut cfg = Config::default();
    cfg.pass_interval = Duration::from_millis(5);

    let eloop = EventLoop::new(cfg);

    let first = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&first);
    eloop
        .add_listener(
            || true,
            move || {
                hits.fetch_add(1, Ordering::SeqCst);
            },
        )
        .expect("registration");

    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("[stop_resume] L1 fired {} times", first.load(Ordering::SeqCst));

    eloop.stop();
    while eloop.state() != WorkerState::NotRunning {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    println!(
        "[stop_resume] stopped; registry still holds {} listener(s)",
        eloop.listener_count()
    );

    let before_resume = first.load(Ordering::SeqCst);

    let second = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&second);
    eloop
        .add_listener(
            || true,
            move || {
                hits.fetch_add(1, Ordering::SeqCst);
            },
        )
        .expect("registration");

    tokio::time::sleep(Duration::from_millis(50)).await;
    println!(
        "[stop_resume] resumed: L1 +{} more, L2 fired {} times",
        first.load(Ordering::SeqCst) - before_resume,
        second.load(Ordering::SeqCst)
    );

    eloop.remove_all_listeners();
}
