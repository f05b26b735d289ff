//! Platform abstraction layer
//!
//! Frame clocks for the two hosts:
//! - `web`: `requestAnimationFrame` (wasm32 only)
//! - `headless`: manually pumped ticks for tests and the native driver

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;
