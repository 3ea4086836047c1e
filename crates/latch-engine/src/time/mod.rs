//! Time subsystem.
//!
//! Tick timing kept separate from the runtime so it stays testable.
//! Intended usage:
//! - one `TickClock` per window, next to its input aggregator
//! - call `tick()` once per poll to obtain `Tick`

mod tick_clock;

pub use tick_clock::{Tick, TickClock};
