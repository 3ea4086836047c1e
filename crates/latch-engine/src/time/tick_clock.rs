use std::time::{Duration, Instant};

/// Timing for one input tick.
#[derive(Debug, Copy, Clone)]
pub struct Tick {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic tick counter. Matches the number of snapshots published
    /// before this one.
    pub index: u64,
}

/// Clock producing one `Tick` per poll.
///
/// One clock per window, next to that window's aggregator, so hold durations
/// (counted in ticks) can be converted to wall time by the application.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct TickClock {
    last: Instant,
    index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl TickClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns the new `Tick`.
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let tick = Tick {
            dt: dt.as_secs_f32(),
            now,
            index: self.index,
        };
        self.index = self.index.wrapping_add(1);
        tick
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
