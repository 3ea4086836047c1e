use super::queue::{event_queue, EventQueue, QueueProducer};

/// Input aggregation settings.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Bound on events buffered between ticks by [`InputConfig::event_queue`].
    pub queue_capacity: usize,

    /// Release every held code on resize. Some platforms swallow key-up events
    /// while a window is being resized. Moves only raise the resized flag.
    pub release_on_resize: bool,

    /// Focus state assumed before the first focus notification arrives.
    pub initial_focus: bool,

    /// Pixel-precise scroll deltas are converted to scroll lines at this rate.
    pub pixels_per_line: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            release_on_resize: true,
            initial_focus: true,
            pixels_per_line: 20.0,
        }
    }
}

impl InputConfig {
    /// Creates a push-model queue bounded by `queue_capacity`.
    pub fn event_queue(&self) -> (QueueProducer, EventQueue) {
        event_queue(self.queue_capacity)
    }
}
