use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::input::ResizeNotice;

use super::ctx::TickCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for every raw window event, before it reaches the input layer.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called synchronously when a window is resized, without waiting for the
    /// next tick. Surfaces tied to the window size should be rebuilt here.
    fn on_resize(&mut self, window_id: WindowId, notice: ResizeNotice) {
        let _ = (window_id, notice);
    }

    /// Called once per tick per window with that tick's input snapshot.
    fn on_tick(&mut self, ctx: &mut TickCtx<'_>) -> AppControl;
}
