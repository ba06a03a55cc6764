//! # Global loop configuration.
//!
//! [`Config`] defines the event loop's behavior: the capacity of the
//! observability bus and the minimum interval between polling passes.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use spinwatch::Config;
//!
//! let mut cfg = Config::default();
//! cfg.pass_interval = Duration::from_millis(1);
//! cfg.bus_capacity = 64;
//!
//! assert_eq!(cfg.bus_capacity, 64);
//! ```

use std::time::Duration;

/// Configuration for an [`EventLoop`](crate::EventLoop).
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
    /// Minimum interval between polling passes.
    ///
    /// Zero means busy-spin: the worker only yields to the scheduler between
    /// passes, reacting to satisfied conditions with minimal latency at the
    /// cost of CPU. A non-zero interval caps the polling rate; cancellation
    /// still interrupts the inter-pass sleep.
    pub pass_interval: Duration,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `bus_capacity = 256`
    /// - `pass_interval = 0s` (busy-spin)
    fn default() -> Self {
        Self {
            bus_capacity: 256,
            pass_interval: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.bus_capacity, 256);
        assert!(cfg.pass_interval.is_zero());
    }
}
