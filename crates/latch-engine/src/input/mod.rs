//! Input subsystem.
//!
//! Turns raw platform notifications into one immutable [`Snapshot`] per tick:
//!
//! - [`Normalizer`] maps native codes and modifier masks onto canonical [`Code`]s
//! - [`PressTracker`] owns the live code → [`Hold`] map
//! - [`PressTracker::publish`] copies it out once per tick and expires releases
//! - [`Aggregator`] ties them together behind `poll`
//!
//! Public API is platform-agnostic. Adapters under [`platform`] translate
//! native events into [`RawEvent`]s.

mod aggregator;
mod code;
mod config;
mod event;
mod hold;
mod mods;
mod normalize;
mod queue;
mod snapshot;
mod source;
mod tracker;

pub mod platform;

pub use aggregator::Aggregator;
pub use code::{Code, CodeRange};
pub use config::InputConfig;
pub use event::{Edge, RawEvent, RawKind, ResizeNotice};
pub use hold::{Hold, RELEASED};
pub use mods::{ModMask, MODIFIER_CODES};
pub use normalize::{CanonicalTable, KeyTable, Normalizer};
pub use queue::{event_queue, EventQueue, QueueProducer};
pub use snapshot::Snapshot;
pub use source::{EventSource, LocalSource};
pub use tracker::PressTracker;
