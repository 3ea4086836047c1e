use winit::window::{Window, WindowId};

use crate::input::Snapshot;
use crate::time::Tick;
use crate::window::RuntimeCtx;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys  = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-tick context passed to `core::App::on_tick`.
///
/// `input` is the snapshot published for this tick. It is read-only and stays
/// valid for the whole callback; the live state keeps changing underneath it.
pub struct TickCtx<'a> {
    pub window:  WindowCtx<'a>,
    pub input:   &'a Snapshot,
    pub time:    Tick,
    pub runtime: &'a mut RuntimeCtx,
}
