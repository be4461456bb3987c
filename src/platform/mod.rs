//! Platform abstraction layer
//!
//! Browser glue for the wasm32 build:
//! - LocalStorage-backed key-value store
//! - Canvas 2D renderer for draw commands
//!
//! Native builds run headless and need nothing from here.

#[cfg(target_arch = "wasm32")]
pub mod web;
