//! Terminal scene runner (default binary).
//!
//! Reads `SCENE_*` configuration, then either takes over the terminal and
//! runs until the user quits, or (with `SCENE_HEADLESS_TICKS`) runs a scripted
//! scene off-screen and prints the final frame.

use anyhow::{Context, Result};

use tui_scene::core::{
    Flow, InputSource, SceneController, SceneState, ScriptedInput, Surface, Tick,
};
use tui_scene::engine::{logging, RunReport, SceneConfig, Scheduler};
use tui_scene::input::TerminalInput;
use tui_scene::term::{restore_terminal, FrameSurface, TerminalRenderer};
use tui_scene::types::SceneAction;

fn main() -> Result<()> {
    let cfg = SceneConfig::from_env();
    logging::init(cfg.log_path.as_deref())
        .with_context(|| format!("open log file {:?}", cfg.log_path))?;
    cfg.validate().context("invalid SCENE_* configuration")?;
    tracing::info!(?cfg, "starting scene");

    match cfg.headless_ticks {
        Some(ticks) => run_headless(&cfg, ticks),
        None => run_terminal(&cfg),
    }
}

fn run_terminal(cfg: &SceneConfig) -> Result<()> {
    let mut renderer = TerminalRenderer::stdout();
    renderer.enter().context("enter terminal")?;

    let surface = FrameSurface::terminal(renderer).with_cap(cfg.max_width, cfg.max_height);
    let controller = SceneController::new(
        SceneState::new(cfg.scene_settings()),
        TerminalInput::new(),
        surface,
    );

    let scheduler = Scheduler::new(cfg.tick_interval())?;
    match scheduler.run(controller) {
        Ok((controller, report)) => {
            let (state, _, mut surface) = controller.into_parts();
            // Always try to restore terminal state.
            if let Some(mut renderer) = surface.take_renderer() {
                renderer.exit().context("restore terminal")?;
            }
            log_summary(&state, report);
            Ok(())
        }
        Err(err) => {
            // The renderer went down with the tick thread.
            let _ = restore_terminal();
            Err(err).context("scene loop failed")
        }
    }
}

fn run_headless(cfg: &SceneConfig, ticks: u64) -> Result<()> {
    let mut script = ScriptedInput::new();
    script
        .push(SceneAction::SpawnSquare)
        .push(SceneAction::MoveRight)
        .push(SceneAction::MoveRight)
        .push(SceneAction::MoveRight)
        .push(SceneAction::MoveRight)
        .push(SceneAction::MoveDown)
        .push(SceneAction::SpawnMarker);

    let (width, height) = (
        cfg.max_width.unwrap_or(60),
        cfg.max_height.unwrap_or(24),
    );
    let controller = SceneController::new(
        SceneState::new(cfg.scene_settings()),
        script,
        FrameSurface::headless(width, height),
    );

    let (limited, report) = Scheduler::new(cfg.tick_interval())?
        .run(TickLimit::new(controller, ticks))
        .context("headless run failed")?;
    let (state, _, surface) = limited.inner.into_parts();

    let frame = surface.frame();
    for y in 0..frame.height() {
        println!("{}", frame.row_text(y));
    }
    log_summary(&state, report);
    Ok(())
}

fn log_summary(state: &SceneState, report: RunReport) {
    tracing::info!(
        ticks = report.ticks,
        overruns = report.overruns,
        markers = state.markers.len(),
        squares = state.squares.len(),
        age = state.squares.current_age(),
        "scene finished"
    );
}

/// Stops the wrapped controller after a fixed number of ticks.
struct TickLimit<I, S> {
    inner: SceneController<I, S>,
    remaining: u64,
}

impl<I, S> TickLimit<I, S> {
    fn new(inner: SceneController<I, S>, ticks: u64) -> Self {
        Self {
            inner,
            remaining: ticks,
        }
    }
}

impl<I: InputSource, S: Surface> Tick for TickLimit<I, S> {
    fn tick(&mut self) -> Flow {
        if self.remaining == 0 {
            return Flow::Stop;
        }
        self.remaining -= 1;
        match self.inner.tick() {
            Flow::Continue if self.remaining > 0 => Flow::Continue,
            _ => Flow::Stop,
        }
    }
}
