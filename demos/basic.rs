//! # Example: basic
//!
//! Poll a sensor-style flag that another task flips, and fire a handler on
//! every observed edge.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► spawn flipper task (sets the flag every 50ms)
//!   ├─► add_listener(flag.swap(false), print)   → worker starts
//!   ├─► sleep while the handler fires
//!   └─► remove_listener + stop
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use spinwatch::{Config, EventLoop};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let mut cfg = Config::default();
    cfg.pass_interval = Duration::from_millis(1);

    let eloop = EventLoop::new(cfg);

    let sensor = Arc::new(AtomicBool::new(false));
    let fired = Arc::new(AtomicUsize::new(0));

    // Flip the flag a few times from another task.
    {
        let sensor = Arc::clone(&sensor);
        tokio::spawn(async move {
            for _ in 0..5 {
                tokio::time::sleep(Duration::from_millis(50)).await;
                sensor.store(true, Ordering::Release);
            }
        });
    }

    let observed = Arc::clone(&sensor);
    let hits = Arc::clone(&fired);
    let listener = eloop
        .add_listener(
            // swap(false) consumes the edge, so each flip fires exactly once
            move || observed.swap(false, Ordering::AcqRel),
            move || {
                let n = hits.fetch_add(1, Ordering::SeqCst) + 1;
                println!("[basic] sensor high ({n})");
            },
        )
        .expect("registration");

    tokio::time::sleep(Duration::from_millis(400)).await;

    eloop.remove_listener(&listener);
    eloop.stop();

    println!("[basic] handler fired {} times", fired.load(Ordering::SeqCst));
}
