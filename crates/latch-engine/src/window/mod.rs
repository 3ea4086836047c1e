//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Windows, gives each window its own input
//! aggregator, and ticks the application once per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
