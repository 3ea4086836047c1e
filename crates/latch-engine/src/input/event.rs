use super::code::Code;

/// Kind of a raw notification coming from a platform event source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RawKind {
    // Window-level notifications.
    Closed,
    Resized,
    Moved,
    Iconified,
    Uniconified,
    FocusGained,
    FocusLost,

    // Pointer.
    MousePressed,
    MouseReleased,
    MouseDragged,
    MouseMoved,
    Scrolled,

    // Touch contacts are tracked as a single pointer code.
    TouchBegan,
    TouchMoved,
    TouchEnded,

    // Keyboard.
    KeyPressed,
    KeyReleased,
    ModifiersChanged,

    /// The producer dropped events; press state can no longer be trusted.
    EventsLost,
}

impl RawKind {
    /// Window-level kinds bypass code tracking and modifier decomposition.
    pub fn is_window_level(self) -> bool {
        matches!(
            self,
            RawKind::Closed
                | RawKind::Resized
                | RawKind::Moved
                | RawKind::Iconified
                | RawKind::Uniconified
                | RawKind::FocusGained
                | RawKind::FocusLost
                | RawKind::EventsLost
        )
    }

    /// Kinds whose `x`/`y` fields describe the pointer.
    pub fn carries_pointer(self) -> bool {
        matches!(
            self,
            RawKind::MousePressed
                | RawKind::MouseReleased
                | RawKind::MouseDragged
                | RawKind::MouseMoved
                | RawKind::Scrolled
                | RawKind::TouchBegan
                | RawKind::TouchMoved
                | RawKind::TouchEnded
        )
    }
}

/// One raw notification, before normalization.
///
/// `code` is a native key or button code interpreted through the source's
/// `KeyTable`; `mods` is the native modifier mask observed with the event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawEvent {
    pub kind: RawKind,
    pub code: u32,
    pub mods: u32,
    pub scroll: i32,
    pub x: f32,
    pub y: f32,
}

impl RawEvent {
    pub fn new(kind: RawKind) -> Self {
        Self {
            kind,
            code: 0,
            mods: 0,
            scroll: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = code;
        self
    }

    pub fn with_mods(mut self, mods: u32) -> Self {
        self.mods = mods;
        self
    }

    pub fn with_scroll(mut self, scroll: i32) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// Canonical edge emitted by the normalizer and applied to the tracker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Edge {
    Press(Code),
    Release(Code),
    ReleaseAll,
    Pointer { x: f32, y: f32 },
    Scroll(i32),
    Resized,
    /// The window moved without changing size. Raises the same one-shot flag
    /// as [`Edge::Resized`] but never releases held codes.
    Moved,
    Focus(bool),
}

/// Out-of-band resize or move, delivered synchronously rather than per tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResizeNotice {
    pub width: u32,
    pub height: u32,
}
