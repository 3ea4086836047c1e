use super::code::Code;
use super::event::{Edge, RawEvent, RawKind};
use super::mods::MODIFIER_CODES;

/// Per-platform translation from native codes to canonical codes.
///
/// Keys and buttons live in separate native namespaces on most platforms,
/// so they are looked up separately. Returning `None` drops the input.
pub trait KeyTable {
    fn key(&self, native: u32) -> Option<Code>;

    fn button(&self, native: u32) -> Option<Code>;

    /// Native modifier mask bits and the code each one stands for.
    fn modifier_bits(&self) -> &[(u32, Code)] {
        &MODIFIER_CODES
    }
}

/// Table for sources that already speak canonical codes and `ModMask` bits.
#[derive(Debug, Copy, Clone, Default)]
pub struct CanonicalTable;

impl KeyTable for CanonicalTable {
    fn key(&self, native: u32) -> Option<Code> {
        canonical(native).filter(|c| !c.is_pointer())
    }

    fn button(&self, native: u32) -> Option<Code> {
        canonical(native).filter(|c| c.is_pointer())
    }
}

fn canonical(native: u32) -> Option<Code> {
    u16::try_from(native).ok().and_then(Code::from_raw)
}

/// Turns raw events into canonical edges.
///
/// Holds the last observed modifier mask so that combined masks can be split
/// into individual press and release edges.
pub struct Normalizer {
    table: Box<dyn KeyTable>,
    last_mods: u32,
}

impl Normalizer {
    pub fn new(table: Box<dyn KeyTable>) -> Self {
        Self { table, last_mods: 0 }
    }

    /// Appends the edges produced by `ev` to `out`.
    pub fn normalize(&mut self, ev: &RawEvent, out: &mut Vec<Edge>) {
        if ev.kind.is_window_level() {
            self.window_level(ev.kind, out);
            return;
        }

        self.decompose_mods(ev.mods, out);

        if ev.kind.carries_pointer() {
            out.push(Edge::Pointer { x: ev.x, y: ev.y });
        }

        match ev.kind {
            RawKind::KeyPressed => {
                if let Some(code) = self.lookup_key(ev.code) {
                    out.push(Edge::Press(code));
                }
            }
            RawKind::KeyReleased => {
                if let Some(code) = self.lookup_key(ev.code) {
                    out.push(Edge::Release(code));
                }
            }
            RawKind::MousePressed => {
                if let Some(code) = self.lookup_button(ev.code) {
                    out.push(Edge::Press(code));
                }
            }
            RawKind::MouseReleased => {
                if let Some(code) = self.lookup_button(ev.code) {
                    out.push(Edge::Release(code));
                }
            }
            RawKind::TouchBegan => out.push(Edge::Press(Code::Touch)),
            RawKind::TouchEnded => out.push(Edge::Release(Code::Touch)),
            RawKind::Scrolled if ev.scroll != 0 => out.push(Edge::Scroll(ev.scroll)),
            _ => {}
        }
    }

    fn window_level(&mut self, kind: RawKind, out: &mut Vec<Edge>) {
        match kind {
            RawKind::Resized => out.push(Edge::Resized),
            RawKind::Moved => out.push(Edge::Moved),
            RawKind::FocusGained | RawKind::Uniconified => out.push(Edge::Focus(true)),
            RawKind::FocusLost | RawKind::Iconified => {
                // Modifiers are released with everything else; forget the mask so
                // they are pressed again once events carry them after refocus.
                self.last_mods = 0;
                out.push(Edge::Focus(false));
            }
            RawKind::EventsLost => {
                self.last_mods = 0;
                out.push(Edge::ReleaseAll);
            }
            _ => {}
        }
    }

    fn decompose_mods(&mut self, mods: u32, out: &mut Vec<Edge>) {
        let changed = mods ^ self.last_mods;
        if changed == 0 {
            return;
        }

        for &(bit, code) in self.table.modifier_bits() {
            if changed & bit == 0 {
                continue;
            }
            if mods & bit != 0 {
                out.push(Edge::Press(code));
            } else {
                out.push(Edge::Release(code));
            }
        }

        self.last_mods = mods;
    }

    fn lookup_key(&self, native: u32) -> Option<Code> {
        let code = self.table.key(native);
        if code.is_none() {
            log::trace!("dropping unmapped key code {native:#x}");
        }
        code
    }

    fn lookup_button(&self, native: u32) -> Option<Code> {
        let code = self.table.button(native);
        if code.is_none() {
            log::trace!("dropping unmapped button code {native:#x}");
        }
        code
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Box::new(CanonicalTable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::mods::ModMask;

    fn edges(n: &mut Normalizer, ev: RawEvent) -> Vec<Edge> {
        let mut out = Vec::new();
        n.normalize(&ev, &mut out);
        out
    }

    fn key(kind: RawKind, code: Code) -> RawEvent {
        RawEvent::new(kind).with_code(code.raw() as u32)
    }

    // ── codes ─────────────────────────────────────────────────────────────

    #[test]
    fn key_press_and_release() {
        let mut n = Normalizer::default();
        assert_eq!(edges(&mut n, key(RawKind::KeyPressed, Code::A)), vec![Edge::Press(Code::A)]);
        assert_eq!(edges(&mut n, key(RawKind::KeyReleased, Code::A)), vec![Edge::Release(Code::A)]);
    }

    #[test]
    fn unmapped_codes_are_dropped() {
        let mut n = Normalizer::default();
        let ev = RawEvent::new(RawKind::KeyPressed).with_code(0xFFFF_FF00);
        assert!(edges(&mut n, ev).is_empty());
    }

    #[test]
    fn buttons_do_not_resolve_as_keys() {
        let mut n = Normalizer::default();
        assert!(edges(&mut n, key(RawKind::KeyPressed, Code::MouseLeft)).is_empty());

        let out = edges(&mut n, key(RawKind::MousePressed, Code::MouseLeft).at(3.0, 4.0));
        assert_eq!(out, vec![Edge::Pointer { x: 3.0, y: 4.0 }, Edge::Press(Code::MouseLeft)]);
    }

    #[test]
    fn touch_maps_to_touch_code() {
        let mut n = Normalizer::default();
        let out = edges(&mut n, RawEvent::new(RawKind::TouchBegan).at(1.0, 2.0));
        assert_eq!(out, vec![Edge::Pointer { x: 1.0, y: 2.0 }, Edge::Press(Code::Touch)]);
        let out = edges(&mut n, RawEvent::new(RawKind::TouchEnded).at(1.0, 2.0));
        assert_eq!(out[1], Edge::Release(Code::Touch));
    }

    // ── modifiers ─────────────────────────────────────────────────────────

    #[test]
    fn modifier_edges_precede_the_key() {
        let mut n = Normalizer::default();
        let ev = key(RawKind::KeyPressed, Code::A).with_mods(ModMask::SHIFT.bits());
        assert_eq!(edges(&mut n, ev), vec![Edge::Press(Code::Shift), Edge::Press(Code::A)]);
    }

    #[test]
    fn only_changed_bits_produce_edges() {
        let mut n = Normalizer::default();
        let both = (ModMask::SHIFT | ModMask::CONTROL).bits();
        let out = edges(&mut n, RawEvent::new(RawKind::ModifiersChanged).with_mods(both));
        assert_eq!(out, vec![Edge::Press(Code::Control), Edge::Press(Code::Shift)]);

        // Same mask again: nothing.
        assert!(edges(&mut n, RawEvent::new(RawKind::ModifiersChanged).with_mods(both)).is_empty());

        let out = edges(
            &mut n,
            RawEvent::new(RawKind::ModifiersChanged).with_mods(ModMask::CONTROL.bits()),
        );
        assert_eq!(out, vec![Edge::Release(Code::Shift)]);
    }

    #[test]
    fn focus_loss_forgets_modifier_mask() {
        let mut n = Normalizer::default();
        let shift = ModMask::SHIFT.bits();
        edges(&mut n, RawEvent::new(RawKind::ModifiersChanged).with_mods(shift));
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::FocusLost)), vec![Edge::Focus(false)]);

        // Shift still physically down when the next event arrives.
        let out = edges(&mut n, RawEvent::new(RawKind::MouseMoved).with_mods(shift).at(0.0, 0.0));
        assert_eq!(out, vec![Edge::Press(Code::Shift), Edge::Pointer { x: 0.0, y: 0.0 }]);
    }

    // ── window level ──────────────────────────────────────────────────────

    #[test]
    fn window_events_bypass_code_tracking() {
        let mut n = Normalizer::default();
        let shift = ModMask::SHIFT.bits();
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::Resized).with_mods(shift)), vec![Edge::Resized]);
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::Moved)), vec![Edge::Moved]);
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::Iconified)), vec![Edge::Focus(false)]);
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::Uniconified)), vec![Edge::Focus(true)]);
        assert_eq!(edges(&mut n, RawEvent::new(RawKind::EventsLost)), vec![Edge::ReleaseAll]);
        assert!(edges(&mut n, RawEvent::new(RawKind::Closed)).is_empty());
    }

    #[test]
    fn move_only_updates_pointer() {
        let mut n = Normalizer::default();
        let out = edges(&mut n, RawEvent::new(RawKind::MouseMoved).at(10.0, 20.0));
        assert_eq!(out, vec![Edge::Pointer { x: 10.0, y: 20.0 }]);
    }

    #[test]
    fn zero_scroll_is_ignored() {
        let mut n = Normalizer::default();
        let out = edges(&mut n, RawEvent::new(RawKind::Scrolled).at(0.0, 0.0));
        assert_eq!(out, vec![Edge::Pointer { x: 0.0, y: 0.0 }]);
        let out = edges(&mut n, RawEvent::new(RawKind::Scrolled).with_scroll(-2).at(0.0, 0.0));
        assert_eq!(out[1], Edge::Scroll(-2));
    }
}
