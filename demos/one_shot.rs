//! # Example: one_shot
//!
//! There is no automatic de-registration: a listener that should fire once
//! removes itself from inside its own handler. Once the registry drains, the
//! worker exits on its own.
//!
//! ## Run
//! ```bash
//! cargo run --example one_shot
//! ```

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use spinwatch::{Config, EventLoop, ListenerRef, WorkerState};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let eloop = Arc::new(EventLoop::new(Config::default()));

    // The handler needs its own ListenerRef to remove itself; the slot is
    // filled right after registration returns.
    let slot: Arc<OnceLock<ListenerRef>> = Arc::new(OnceLock::new());

    let lp = Arc::clone(&eloop);
    let me = Arc::clone(&slot);
    let listener = eloop
        .add_listener(
            || true,
            move || {
                if let Some(l) = me.get() {
                    println!("[one_shot] fired, removing myself");
                    lp.remove_listener(l);
                }
            },
        )
        .expect("registration");
    let _ = slot.set(listener);

    // The worker discovers the drained registry and exits by itself.
    while eloop.state() != WorkerState::NotRunning {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    println!(
        "[one_shot] worker exited, {} listeners left",
        eloop.listener_count()
    );
}
