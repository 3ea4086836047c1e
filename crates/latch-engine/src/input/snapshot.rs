use std::collections::HashMap;

use super::code::Code;
use super::hold::Hold;

/// Immutable per-tick view of input state.
///
/// Produced once per tick by `Aggregator::poll`. Nothing here changes after
/// it is returned; the application may keep it for the whole tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pointer: (f32, f32),
    scroll: i32,
    focus: bool,
    resized: bool,
    holds: HashMap<Code, Hold>,
}

impl Snapshot {
    pub(super) fn new(
        pointer: (f32, f32),
        scroll: i32,
        focus: bool,
        resized: bool,
        holds: HashMap<Code, Hold>,
    ) -> Self {
        Self {
            pointer,
            scroll,
            focus,
            resized,
            holds,
        }
    }

    /// Pointer position in logical pixels.
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// Scroll accumulated since the previous snapshot.
    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    pub fn focus(&self) -> bool {
        self.focus
    }

    /// True if the window was resized or moved since the previous snapshot.
    pub fn resized(&self) -> bool {
        self.resized
    }

    pub fn hold(&self, code: Code) -> Option<Hold> {
        self.holds.get(&code).copied()
    }

    /// Published duration: ticks held, or `ticks + RELEASED` if released since
    /// the previous snapshot. `None` if the code is up.
    pub fn duration(&self, code: Code) -> Option<i32> {
        self.hold(code).map(Hold::raw)
    }

    /// Ticks held, if `code` is currently down.
    pub fn held(&self, code: Code) -> Option<u32> {
        match self.hold(code)? {
            Hold::Held(n) => Some(n),
            Hold::Released(_) => None,
        }
    }

    /// Ticks held before release, if `code` was released since the previous
    /// snapshot.
    pub fn released(&self, code: Code) -> Option<u32> {
        match self.hold(code)? {
            Hold::Released(n) => Some(n),
            Hold::Held(_) => None,
        }
    }

    pub fn is_down(&self, code: Code) -> bool {
        self.held(code).is_some()
    }

    /// True on the first snapshot that shows `code` held.
    pub fn just_pressed(&self, code: Code) -> bool {
        self.held(code) == Some(0)
    }

    pub fn contains(&self, code: Code) -> bool {
        self.holds.contains_key(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Code, Hold)> + '_ {
        self.holds.iter().map(|(&c, &h)| (c, h))
    }

    pub fn held_codes(&self) -> impl Iterator<Item = Code> + '_ {
        self.iter().filter(|(_, h)| h.is_held()).map(|(c, _)| c)
    }

    pub fn released_codes(&self) -> impl Iterator<Item = Code> + '_ {
        self.iter().filter(|(_, h)| h.is_released()).map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }
}
