/// Offset added to a hold duration at the moment of release.
///
/// A released entry publishes as `held_ticks + RELEASED`, which is negative for
/// any hold shorter than a billion ticks (over 190 days at 60 ticks per second),
/// so it never reads as a long hold. The held duration is `raw - RELEASED`.
pub const RELEASED: i32 = -1_000_000_000;

/// Hold record for a single code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hold {
    /// Currently down, for this many ticks.
    Held(u32),

    /// Released since the previous snapshot after being held this many ticks.
    Released(u32),
}

impl Hold {
    /// Published integer form: the duration while held, `duration + RELEASED`
    /// once released.
    pub fn raw(self) -> i32 {
        match self {
            Hold::Held(n) => clamp_ticks(n),
            Hold::Released(n) => clamp_ticks(n) + RELEASED,
        }
    }

    /// Decodes the published integer form.
    pub fn from_raw(raw: i32) -> Hold {
        if raw >= 0 {
            Hold::Held(raw as u32)
        } else {
            Hold::Released(raw.saturating_sub(RELEASED).max(0) as u32)
        }
    }

    /// Ticks held so far, or ticks held before the release.
    pub fn ticks(self) -> u32 {
        match self {
            Hold::Held(n) | Hold::Released(n) => n,
        }
    }

    pub fn is_held(self) -> bool {
        matches!(self, Hold::Held(_))
    }

    pub fn is_released(self) -> bool {
        matches!(self, Hold::Released(_))
    }
}

// Keeps `n + RELEASED` negative however long the hold.
fn clamp_ticks(n: u32) -> i32 {
    n.min((-RELEASED - 1) as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_publishes_plain_duration() {
        assert_eq!(Hold::Held(0).raw(), 0);
        assert_eq!(Hold::Held(42).raw(), 42);
    }

    #[test]
    fn released_preserves_duration() {
        let raw = Hold::Released(7).raw();
        assert!(raw < 0);
        assert_eq!(raw - RELEASED, 7);
        assert_eq!(Hold::from_raw(raw), Hold::Released(7));
    }

    #[test]
    fn released_zero_is_exactly_the_sentinel() {
        assert_eq!(Hold::Released(0).raw(), RELEASED);
        assert_eq!(Hold::from_raw(RELEASED), Hold::Released(0));
    }

    #[test]
    fn absurd_holds_stay_negative_when_released() {
        assert!(Hold::Released(u32::MAX).raw() < 0);
    }

    #[test]
    fn predicates() {
        assert!(Hold::Held(3).is_held());
        assert!(Hold::Released(3).is_released());
        assert_eq!(Hold::Released(3).ticks(), 3);
    }
}
