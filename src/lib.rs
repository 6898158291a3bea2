//! Client synchronization engine for a trainer control service.
//!
//! The browser front-end lives in the `velo_web` crate; everything here is
//! host-testable and free of UI dependencies. Time is injected as plain
//! milliseconds (what both `performance.now()` and a monotonic `Instant`
//! provide), so the poll scheduler and notice timers behave identically in
//! the browser and in tests.

pub mod activity;
pub mod clock;
pub mod error;
pub mod fmt;
pub mod history;
pub mod model;
pub mod notify;
pub mod runtime;
pub mod schedule;
pub mod wire;
