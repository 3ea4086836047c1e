use std::collections::HashMap;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, TickCtx, WindowCtx};
use crate::input::platform::winit::{WinitKeyTable, WinitSource};
use crate::input::{Aggregator, InputConfig, ResizeNotice};
use crate::time::TickClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub input: InputConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "latch".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            input: InputConfig::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn create_window(&mut self, config: RuntimeConfig) {
        self.commands.push(Command::CreateWindow(config));
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.commands.push(Command::CloseWindow(id));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    CreateWindow(RuntimeConfig),
    CloseWindow(WindowId),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(initial: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// Everything owned per window. The aggregator lives and dies with its window.
struct WindowEntry {
    window: Window,
    source: WinitSource,
    aggregator: Aggregator,
    clock: TickClock,
}

impl WindowEntry {
    fn new(window: Window, input: InputConfig) -> Self {
        Self {
            window,
            source: WinitSource::new(&input),
            aggregator: Aggregator::new(input, Box::new(WinitKeyTable::new())),
            clock: TickClock::new(),
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    app: A,

    windows: HashMap<WindowId, WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, app: A) -> Self {
        Self {
            initial,
            app,
            windows: HashMap::new(),
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: RuntimeConfig,
    ) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        log::debug!("window {id:?} created");

        self.windows.insert(id, WindowEntry::new(window, config.input));
        Ok(id)
    }

    fn destroy_window_entry(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::debug!("window {id:?} closed");
        }
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::CreateWindow(cfg) => {
                    if let Err(e) = self.create_window_entry(event_loop, cfg) {
                        log::error!("failed to create window: {e:#}");
                        self.request_exit();
                    }
                }
                Command::CloseWindow(id) => self.destroy_window_entry(id),
                Command::Exit => self.request_exit(),
            }
        }

        if self.windows.is_empty() {
            self.request_exit();
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    /// Services a size change immediately: input buffered so far is applied,
    /// the resize flag is set on the window's aggregator, and the application
    /// rebuilds size-dependent state before anything is drawn at the new size.
    fn dispatch_resize(&mut self, window_id: WindowId, size: PhysicalSize<u32>) {
        let Some(entry) = self.windows.get_mut(&window_id) else {
            return;
        };

        let notice = ResizeNotice {
            width: size.width,
            height: size.height,
        };
        entry.aggregator.dispatch_resize(&mut entry.source, notice);
        self.app.on_resize(window_id, notice);
        entry.window.request_redraw();
    }

    /// Drives one tick for `window_id`: poll input, then hand the snapshot to
    /// the application.
    fn tick(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        // Split borrows so the app and the window entry can be used together.
        let (app, windows) = (&mut self.app, &mut self.windows);

        if let Some(entry) = windows.get_mut(&window_id) {
            let snapshot = entry.aggregator.poll(&mut entry.source);
            let time = entry.clock.tick();

            let mut ctx = TickCtx {
                window: WindowCtx {
                    id: window_id,
                    window: &entry.window,
                },
                input: &snapshot,
                time,
                runtime: &mut runtime_ctx,
            };

            app_control = app.on_tick(&mut ctx);
        }

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop, self.initial.clone()) {
            log::error!("failed to create initial window: {e:#}");
            self.request_exit();
            event_loop.exit();
            return;
        }

        for entry in self.windows.values() {
            entry.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // One tick per redraw; keep ticking continuously.
        for entry in self.windows.values() {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if !self.windows.contains_key(&window_id) {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.destroy_window_entry(window_id);
                if self.windows.is_empty() {
                    self.request_exit();
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => self.dispatch_resize(window_id, *new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.windows.get(&window_id).map(|e| e.window.inner_size());
                if let Some(size) = size {
                    self.dispatch_resize(window_id, size);
                }
            }

            WindowEvent::RedrawRequested => self.tick(event_loop, window_id),

            _ => {
                if let Some(entry) = self.windows.get_mut(&window_id) {
                    let scale = entry.window.scale_factor();
                    entry.source.push_window_event(scale, &event);
                }
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
