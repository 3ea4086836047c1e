use super::event::RawEvent;

/// Producer side of the pipeline, as seen by the aggregator.
///
/// `drain` must never block: an empty drain simply means no input this tick.
/// Some platforms only allow draining on the thread that owns the window;
/// honoring that is the implementor's concern.
pub trait EventSource {
    /// Moves every pending event into `out`, oldest first.
    fn drain(&mut self, out: &mut Vec<RawEvent>);

    /// Current pointer position, if the source can query it directly.
    fn cursor(&self) -> Option<(f32, f32)> {
        None
    }
}

/// Unlocked buffer for sources confined to the consumer's thread.
///
/// Events are pushed from native callbacks running on the same thread as
/// `poll` and drained at the start of the tick.
#[derive(Debug, Default)]
pub struct LocalSource {
    events: Vec<RawEvent>,
    cursor: Option<(f32, f32)>,
}

impl LocalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ev: RawEvent) {
        if ev.kind.carries_pointer() {
            self.cursor = Some((ev.x, ev.y));
        }
        self.events.push(ev);
    }

    pub fn set_cursor(&mut self, pos: Option<(f32, f32)>) {
        self.cursor = pos;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for LocalSource {
    fn drain(&mut self, out: &mut Vec<RawEvent>) {
        out.append(&mut self.events);
    }

    fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::RawKind;

    #[test]
    fn drain_empties_in_order() {
        let mut src = LocalSource::new();
        src.push(RawEvent::new(RawKind::KeyPressed).with_code(1));
        src.push(RawEvent::new(RawKind::KeyReleased).with_code(1));

        let mut out = Vec::new();
        src.drain(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, RawKind::KeyPressed);
        assert!(src.is_empty());

        out.clear();
        src.drain(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn cursor_follows_pointer_events() {
        let mut src = LocalSource::new();
        assert_eq!(src.cursor(), None);
        src.push(RawEvent::new(RawKind::MouseMoved).at(5.0, 6.0));
        src.push(RawEvent::new(RawKind::KeyPressed).at(99.0, 99.0));
        assert_eq!(src.cursor(), Some((5.0, 6.0)));
    }
}
