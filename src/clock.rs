//! Injectable time source.
//!
//! Engine timing is expressed as `f64` milliseconds since an arbitrary
//! origin. The web layer feeds these from a monotonic clock; tests pass
//! literal values and never sleep.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock measured from construction. Backed by `web_time` on
/// wasm32 so it works inside the browser without touching `js_sys` here.
#[derive(Debug, Clone)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
