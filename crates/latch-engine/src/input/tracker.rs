use std::collections::HashMap;

use super::code::Code;
use super::event::Edge;
use super::hold::Hold;
use super::snapshot::Snapshot;

#[derive(Debug, Copy, Clone)]
struct Entry {
    hold: Hold,
    /// Set once the entry has appeared in a snapshot. Entries pressed during
    /// the current tick are not advanced, so the first snapshot shows zero.
    published: bool,
}

/// Live press state for one window.
///
/// Owns the code → hold map and the one-shot fields, and turns canonical
/// edges into hold transitions:
///
/// `Up → Held(0) → Held(n + 1) … → Released(n) → Up`
///
/// A code leaves the map one publish after its release so the consumer always
/// sees the release before the code disappears.
#[derive(Debug)]
pub struct PressTracker {
    down: HashMap<Code, Entry>,

    /// Releases that arrived in the same tick as their press. Replayed right
    /// after the next snapshot so the press is never invisible.
    deferred: Vec<Code>,

    focus: bool,
    pointer: (f32, f32),
    scroll: i32,
    resized: bool,
}

impl PressTracker {
    pub fn new(focus: bool) -> Self {
        Self {
            down: HashMap::new(),
            deferred: Vec::new(),
            focus,
            pointer: (0.0, 0.0),
            scroll: 0,
            resized: false,
        }
    }

    /// Applies a single canonical edge.
    pub fn apply(&mut self, edge: Edge) {
        match edge {
            Edge::Press(code) => self.record_press(code),
            Edge::Release(code) => self.record_release(code),
            Edge::ReleaseAll => self.release_all(),
            Edge::Pointer { x, y } => self.set_pointer(x, y),
            Edge::Scroll(delta) => self.add_scroll(delta),
            Edge::Resized | Edge::Moved => self.mark_resized(),
            Edge::Focus(focus) => self.set_focus(focus),
        }
    }

    /// Starts tracking `code` as held. Ignored without focus or if the code is
    /// already held.
    pub fn record_press(&mut self, code: Code) {
        if !self.focus {
            log::trace!("ignoring press of {code} without focus");
            return;
        }

        // Pressed again before a deferred release was replayed: still held.
        if let Some(i) = self.deferred.iter().position(|&c| c == code) {
            self.deferred.swap_remove(i);
            return;
        }

        match self.down.get(&code) {
            Some(entry) if entry.hold.is_held() => {}
            _ => {
                self.down.insert(
                    code,
                    Entry {
                        hold: Hold::Held(0),
                        published: false,
                    },
                );
            }
        }
    }

    /// Marks `code` as released, keeping the duration it was held.
    pub fn record_release(&mut self, code: Code) {
        let Some(entry) = self.down.get_mut(&code) else {
            return;
        };

        match entry.hold {
            Hold::Released(_) => {}
            Hold::Held(0) if !entry.published => {
                if !self.deferred.contains(&code) {
                    self.deferred.push(code);
                }
            }
            Hold::Held(n) => entry.hold = Hold::Released(n),
        }
    }

    /// Releases every held code.
    pub fn release_all(&mut self) {
        let held: Vec<Code> = self
            .down
            .iter()
            .filter(|(_, e)| e.hold.is_held())
            .map(|(&code, _)| code)
            .collect();

        if !held.is_empty() {
            log::debug!("releasing {} held code(s)", held.len());
        }

        for code in held {
            self.record_release(code);
        }
    }

    /// Adds one tick to every held code that has already been published.
    pub fn advance_tick(&mut self) {
        for entry in self.down.values_mut() {
            if let Hold::Held(n) = entry.hold {
                if entry.published {
                    entry.hold = Hold::Held(n.saturating_add(1));
                }
            }
        }
    }

    pub fn set_focus(&mut self, focus: bool) {
        if self.focus != focus {
            log::debug!("focus {}", if focus { "gained" } else { "lost" });
        }
        self.focus = focus;
        if !focus {
            self.release_all();
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    pub fn add_scroll(&mut self, delta: i32) {
        self.scroll = self.scroll.saturating_add(delta);
    }

    pub fn mark_resized(&mut self) {
        self.resized = true;
    }

    /// Produces the snapshot for this tick.
    ///
    /// Advances durations, copies the live state, drops codes whose release
    /// has now been published, replays deferred same-tick releases, and clears
    /// the one-shot scroll and resize fields.
    pub fn publish(&mut self) -> Snapshot {
        self.advance_tick();

        let mut holds = HashMap::with_capacity(self.down.len());
        for (&code, entry) in self.down.iter_mut() {
            entry.published = true;
            holds.insert(code, entry.hold);
        }

        let snapshot = Snapshot::new(self.pointer, self.scroll, self.focus, self.resized, holds);

        self.down.retain(|_, e| e.hold.is_held());

        for code in std::mem::take(&mut self.deferred) {
            self.record_release(code);
        }

        self.scroll = 0;
        self.resized = false;

        snapshot
    }

    // Live-state queries, mostly for the aggregator and tests.

    pub fn hold(&self, code: Code) -> Option<Hold> {
        self.down.get(&code).map(|e| e.hold)
    }

    pub fn focus(&self) -> bool {
        self.focus
    }

    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    pub fn resized(&self) -> bool {
        self.resized
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::hold::RELEASED;

    fn durations(t: &mut PressTracker, code: Code, polls: usize) -> Vec<Option<i32>> {
        (0..polls).map(|_| t.publish().duration(code)).collect()
    }

    // ── press / release ───────────────────────────────────────────────────

    #[test]
    fn press_inserts_zero() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        assert_eq!(t.hold(Code::A), Some(Hold::Held(0)));
    }

    #[test]
    fn repeated_press_does_not_reset_duration() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        t.publish();
        t.publish();
        t.record_press(Code::A);
        t.record_press(Code::A);
        assert_eq!(t.hold(Code::A), Some(Hold::Held(1)));
        assert_eq!(t.publish().duration(Code::A), Some(2));
    }

    #[test]
    fn release_of_absent_code_is_noop() {
        let mut t = PressTracker::default();
        t.record_release(Code::B);
        assert_eq!(t.hold(Code::B), None);
        assert!(t.publish().is_empty());
    }

    #[test]
    fn press_without_focus_is_ignored() {
        let mut t = PressTracker::new(false);
        t.record_press(Code::A);
        assert_eq!(t.hold(Code::A), None);
    }

    #[test]
    fn double_release_keeps_first_duration() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        t.publish();
        t.publish();
        t.record_release(Code::A);
        t.record_release(Code::A);
        assert_eq!(t.hold(Code::A), Some(Hold::Released(1)));
    }

    // ── tick scenarios ────────────────────────────────────────────────────

    #[test]
    fn hold_then_release_sequence() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        let mut seen = durations(&mut t, Code::A, 4);
        t.record_release(Code::A);
        seen.extend(durations(&mut t, Code::A, 2));

        assert_eq!(
            seen,
            vec![Some(0), Some(1), Some(2), Some(3), Some(3 + RELEASED), None]
        );
    }

    #[test]
    fn released_entries_are_not_advanced() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        t.publish();
        t.record_release(Code::A);
        t.advance_tick();
        t.advance_tick();
        assert_eq!(t.hold(Code::A), Some(Hold::Released(0)));
    }

    #[test]
    fn press_and_release_in_one_tick_is_seen_once() {
        let mut t = PressTracker::default();
        t.record_press(Code::MouseLeft);
        t.record_release(Code::MouseLeft);

        let first = t.publish();
        assert_eq!(first.held(Code::MouseLeft), Some(0));

        let second = t.publish();
        assert_eq!(second.held(Code::MouseLeft), None);
        assert_eq!(second.released(Code::MouseLeft), Some(0));

        for _ in 0..3 {
            assert!(!t.publish().contains(Code::MouseLeft));
        }
    }

    #[test]
    fn repress_cancels_deferred_release() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        t.record_release(Code::A);
        t.record_press(Code::A);

        assert_eq!(t.publish().held(Code::A), Some(0));
        assert_eq!(t.publish().held(Code::A), Some(1));
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_releases_everything_once() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        t.record_press(Code::Shift);
        t.publish();
        t.publish();

        t.set_focus(false);

        let snap = t.publish();
        assert_eq!(snap.released(Code::A), Some(1));
        assert_eq!(snap.released(Code::Shift), Some(1));
        assert!(snap.held_codes().next().is_none());
        assert!(!snap.focus());

        let snap = t.publish();
        assert!(snap.is_empty());
    }

    #[test]
    fn presses_resume_after_focus_returns() {
        let mut t = PressTracker::default();
        t.set_focus(false);
        t.record_press(Code::A);
        t.set_focus(true);
        t.record_press(Code::B);

        let snap = t.publish();
        assert!(!snap.contains(Code::A));
        assert_eq!(snap.held(Code::B), Some(0));
    }

    #[test]
    fn release_all_clears_every_held_code() {
        let mut t = PressTracker::default();
        for code in [Code::A, Code::B, Code::MouseRight] {
            t.record_press(code);
        }
        t.publish();
        t.release_all();

        let snap = t.publish();
        assert_eq!(snap.held_codes().count(), 0);
        assert_eq!(snap.len(), 3);
    }

    // ── one-shot fields ───────────────────────────────────────────────────

    #[test]
    fn scroll_accumulates_and_resets() {
        let mut t = PressTracker::default();
        t.add_scroll(3);
        t.add_scroll(-1);
        assert_eq!(t.publish().scroll(), 2);
        assert_eq!(t.scroll(), 0);
        assert_eq!(t.publish().scroll(), 0);
    }

    #[test]
    fn resized_is_one_shot() {
        let mut t = PressTracker::default();
        t.apply(Edge::Resized);
        assert!(t.publish().resized());
        assert!(!t.resized());
        assert!(!t.publish().resized());
    }

    #[test]
    fn pointer_persists_across_publishes() {
        let mut t = PressTracker::default();
        t.apply(Edge::Pointer { x: 4.0, y: 5.0 });
        assert_eq!(t.publish().pointer(), (4.0, 5.0));
        assert_eq!(t.publish().pointer(), (4.0, 5.0));
    }

    #[test]
    fn snapshot_is_detached_from_live_state() {
        let mut t = PressTracker::default();
        t.record_press(Code::A);
        let snap = t.publish();
        t.record_release(Code::A);
        t.publish();
        assert_eq!(snap.held(Code::A), Some(0));
    }
}
