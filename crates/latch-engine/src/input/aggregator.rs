use super::config::InputConfig;
use super::event::{Edge, RawEvent, ResizeNotice};
use super::normalize::{KeyTable, Normalizer};
use super::snapshot::Snapshot;
use super::source::EventSource;
use super::tracker::PressTracker;

/// Input aggregator for one window.
///
/// Owned by the window (never global). Raw events reach it either through an
/// [`EventSource`] drained at the start of [`poll`](Self::poll), or directly via
/// [`handle`](Self::handle) on the thread that owns it.
pub struct Aggregator {
    config: InputConfig,
    normalizer: Normalizer,
    tracker: PressTracker,

    // Reused between ticks.
    raw: Vec<RawEvent>,
    edges: Vec<Edge>,
}

impl Aggregator {
    pub fn new(config: InputConfig, table: Box<dyn KeyTable>) -> Self {
        let tracker = PressTracker::new(config.initial_focus);
        Self {
            config,
            normalizer: Normalizer::new(table),
            tracker,
            raw: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Normalizes one raw event and applies its edges to the live state.
    pub fn handle(&mut self, ev: &RawEvent) {
        self.edges.clear();
        self.normalizer.normalize(ev, &mut self.edges);

        for i in 0..self.edges.len() {
            let edge = self.edges[i];
            self.apply(edge);
        }
    }

    /// Services a resize immediately instead of waiting for the tick.
    ///
    /// Events already buffered in `source` happened before the resize, so they
    /// are applied first and a key pressed earlier in the tick is released with
    /// the rest.
    pub fn dispatch_resize<S>(&mut self, source: &mut S, notice: ResizeNotice)
    where
        S: EventSource + ?Sized,
    {
        log::debug!("resized to {}x{}", notice.width, notice.height);
        self.drain(source);
        self.apply(Edge::Resized);
    }

    /// Drains `source`, then publishes this tick's snapshot.
    ///
    /// Call once per tick. Extra calls are harmless but split the scroll and
    /// resize information between the snapshots they return.
    pub fn poll<S>(&mut self, source: &mut S) -> Snapshot
    where
        S: EventSource + ?Sized,
    {
        self.drain(source);

        if let Some((x, y)) = source.cursor() {
            self.tracker.set_pointer(x, y);
        }

        self.tracker.publish()
    }

    /// Live state. The application should read snapshots instead.
    pub fn tracker(&self) -> &PressTracker {
        &self.tracker
    }

    fn drain<S>(&mut self, source: &mut S)
    where
        S: EventSource + ?Sized,
    {
        let mut raw = std::mem::take(&mut self.raw);
        source.drain(&mut raw);
        for ev in raw.drain(..) {
            self.handle(&ev);
        }
        self.raw = raw;
    }

    fn apply(&mut self, edge: Edge) {
        self.tracker.apply(edge);

        if edge == Edge::Resized && self.config.release_on_resize {
            self.tracker.release_all();
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(InputConfig::default(), Box::new(super::normalize::CanonicalTable))
    }
}
