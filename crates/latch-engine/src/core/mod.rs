//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application: one callback per tick carrying that tick's input snapshot.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{TickCtx, WindowCtx};
