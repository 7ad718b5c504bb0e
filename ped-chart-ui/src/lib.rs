//! Shared Dioxus components and browser plumbing for the pedestrian dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for vega-embed via `js_sys::eval()`
//! - `browser`: a `fetch`-based `Backend` for the session orchestrator
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (selectors, containers, etc.)

pub mod browser;
pub mod components;
pub mod js_bridge;
pub mod state;
