//! Browser-hosted WASM front-end for the trainer sync engine.
//!
//! This crate is intentionally a stub by default so the workspace builds on
//! native targets without requiring wasm toolchains. All synchronization
//! logic lives in the host-testable `velo` crate; this one only wires the
//! engine to fetch, timers, and the DOM.
//!
//! Enable the real app with: `--features web` (and a wasm32 target).

/// Placeholder function for non-web (or non-wasm) builds.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {
    // No-op.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
