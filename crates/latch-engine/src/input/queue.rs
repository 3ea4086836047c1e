use std::sync::Arc;

use parking_lot::Mutex;

use super::event::{RawEvent, RawKind, ResizeNotice};
use super::source::EventSource;

type ResizeHook = Arc<dyn Fn(ResizeNotice) + Send + Sync>;

#[derive(Debug)]
struct Shared {
    events: Vec<RawEvent>,
    capacity: usize,
    overflowed: bool,
    cursor: Option<(f32, f32)>,
}

/// Creates a bounded queue for sources that deliver events from OS callbacks
/// on another thread.
///
/// The lock is held only while pushing one event or swapping the buffer out;
/// the press tracker itself never leaves the consumer thread.
pub fn event_queue(capacity: usize) -> (QueueProducer, EventQueue) {
    let capacity = capacity.max(1);
    let shared = Arc::new(Mutex::new(Shared {
        events: Vec::with_capacity(capacity),
        capacity,
        overflowed: false,
        cursor: None,
    }));

    (
        QueueProducer {
            shared: Arc::clone(&shared),
            resize_hook: None,
        },
        EventQueue { shared },
    )
}

/// Producer handle. Cheap to clone and safe to move into native callbacks.
#[derive(Clone)]
pub struct QueueProducer {
    shared: Arc<Mutex<Shared>>,
    resize_hook: Option<ResizeHook>,
}

impl QueueProducer {
    /// Installs a callback run synchronously, on the producer's thread, for
    /// every resize or move. Used where deferring the resize to the next tick
    /// would leave the rendering surface and the window out of step.
    pub fn with_resize_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ResizeNotice) + Send + Sync + 'static,
    {
        self.resize_hook = Some(Arc::new(hook));
        self
    }

    /// Queues one event. Returns `false` if the queue was full and the event
    /// was dropped.
    pub fn push(&self, ev: RawEvent) -> bool {
        let mut shared = self.shared.lock();

        if ev.kind.carries_pointer() {
            shared.cursor = Some((ev.x, ev.y));
        }

        if shared.events.len() >= shared.capacity {
            if !shared.overflowed {
                log::warn!(
                    "input queue full ({} events); dropping input until the next tick",
                    shared.capacity
                );
                shared.overflowed = true;
            }
            return false;
        }

        shared.events.push(ev);
        true
    }

    /// Services a resize immediately through the hook, then queues it so the
    /// next snapshot reports `resized`.
    pub fn resize(&self, notice: ResizeNotice) -> bool {
        if let Some(hook) = &self.resize_hook {
            hook(notice);
        }
        self.push(RawEvent::new(RawKind::Resized))
    }

    pub fn set_cursor(&self, pos: (f32, f32)) {
        self.shared.lock().cursor = Some(pos);
    }
}

/// Consumer half of [`event_queue`]. Drained by `Aggregator::poll`.
pub struct EventQueue {
    shared: Arc<Mutex<Shared>>,
}

impl EventQueue {
    pub fn pending(&self) -> usize {
        self.shared.lock().events.len()
    }
}

impl EventSource for EventQueue {
    fn drain(&mut self, out: &mut Vec<RawEvent>) {
        let (mut events, overflowed) = {
            let mut shared = self.shared.lock();
            let capacity = shared.capacity;
            let events = std::mem::replace(&mut shared.events, Vec::with_capacity(capacity));
            let overflowed = std::mem::replace(&mut shared.overflowed, false);
            (events, overflowed)
        };

        out.append(&mut events);

        // Dropped events may have included releases.
        if overflowed {
            out.push(RawEvent::new(RawKind::EventsLost));
        }
    }

    fn cursor(&self) -> Option<(f32, f32)> {
        self.shared.lock().cursor
    }
}
