//! Latch engine crate.
//!
//! Aggregates platform input into one immutable snapshot per tick, and owns
//! the thin window runtime that drives those ticks.

pub mod input;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
