use anyhow::Result;
use latch_engine::core::{App, AppControl, TickCtx};
use latch_engine::input::{Code, ResizeNotice};
use latch_engine::logging::{init_logging, LoggingConfig};
use latch_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;
use winit::window::WindowId;

/// Input monitor: logs every press, release, scroll and resize the aggregator
/// publishes, and mirrors the held codes in the window title.
#[derive(Default)]
struct Studio {
    last_title: String,
}

impl App for Studio {
    fn on_resize(&mut self, window_id: WindowId, notice: ResizeNotice) {
        log::info!("{window_id:?} resized to {}x{}", notice.width, notice.height);
    }

    fn on_tick(&mut self, ctx: &mut TickCtx<'_>) -> AppControl {
        let input = ctx.input;

        if input.just_pressed(Code::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        for code in input.held_codes().filter(|&c| input.just_pressed(c)) {
            let (x, y) = input.pointer();
            log::info!("tick {:>6}  down {code:<5} at ({x:.0}, {y:.0})", ctx.time.index);
        }

        for code in input.released_codes() {
            let ticks = input.released(code).unwrap_or(0);
            log::info!("tick {:>6}  up   {code:<5} after {ticks} ticks", ctx.time.index);
        }

        if input.scroll() != 0 {
            log::info!("tick {:>6}  scroll {:+}", ctx.time.index, input.scroll());
        }

        if input.resized() {
            let (w, h) = ctx.window.logical_size();
            log::debug!("tick {:>6}  resized, now {w:.0}x{h:.0}", ctx.time.index);
        }

        let mut held: Vec<Code> = input.held_codes().collect();
        held.sort();
        let labels: Vec<&str> = held.iter().map(|c| c.label()).collect();
        let title = if labels.is_empty() {
            "latch studio".to_string()
        } else {
            format!("latch studio [{}]", labels.join(" "))
        };
        if title != self.last_title {
            ctx.window.set_title(&title);
            self.last_title = title;
        }

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "latch studio".to_string(),
        initial_size: LogicalSize::new(640.0, 400.0),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Studio::default())
}
