//! Scene controller - one call per tick
//!
//! All mutable simulation state lives in [`SceneState`]. The controller reads
//! at most one action per tick, applies it with [`apply`], ages both entity
//! collections and redraws the whole frame with [`render`].
//!
//! # Tick order
//!
//! 1. Poll one input action (absence is a no-op)
//! 2. Apply it: move/clamp the cursor, change time speed, spawn, or quit
//! 3. If still running: advance both collections by the time speed, then
//!    clear, border, markers, squares, status line, cursor, flush
//!
//! A quit skips step 3 entirely, so nothing is drawn on the exiting tick.

use crate::aged::AgedCollection;
use crate::entity::{DecayingMarker, Layer, RotatingSquare};
use crate::surface::{InputSource, Surface, Viewport};
use crate::types::{
    ColorBand, Point, SceneAction, CURSOR_GLYPH, CURSOR_START, DEFAULT_ROTATION_SPEED,
    DEFAULT_SQUARE_SIZE, MARKER_LIFETIME_TICKS, TIME_SPEED_MAX, TIME_SPEED_MIN,
};

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal; the scheduler stops after this tick.
    Exiting,
}

/// Multiplier applied to aging, kept within `[TIME_SPEED_MIN, TIME_SPEED_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSpeed(u32);

impl TimeSpeed {
    pub const MIN: TimeSpeed = TimeSpeed(TIME_SPEED_MIN);
    pub const MAX: TimeSpeed = TimeSpeed(TIME_SPEED_MAX);

    /// Build a time speed, clamping into range.
    pub fn new(value: u32) -> Self {
        TimeSpeed(value.clamp(TIME_SPEED_MIN, TIME_SPEED_MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for TimeSpeed {
    fn default() -> Self {
        Self::MIN
    }
}

/// Tunables for a new scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSettings {
    pub marker_lifetime: u64,
    pub square_size: i32,
    pub rotation_speed: i32,
    pub time_speed: TimeSpeed,
    pub cursor: Point,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            marker_lifetime: MARKER_LIFETIME_TICKS,
            square_size: DEFAULT_SQUARE_SIZE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            time_speed: TimeSpeed::MIN,
            cursor: CURSOR_START,
        }
    }
}

/// Everything the simulation mutates.
#[derive(Debug)]
pub struct SceneState {
    pub cursor: Point,
    pub time_speed: TimeSpeed,
    /// Controller invocations so far.
    pub tick: u64,
    pub markers: AgedCollection<DecayingMarker>,
    pub squares: AgedCollection<RotatingSquare>,
    pub square_size: i32,
    pub rotation_speed: i32,
}

impl SceneState {
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            cursor: settings.cursor,
            time_speed: settings.time_speed,
            tick: 0,
            markers: AgedCollection::expiring_after(settings.marker_lifetime),
            squares: AgedCollection::persistent(),
            square_size: settings.square_size,
            rotation_speed: settings.rotation_speed,
        }
    }

    /// Age both collections by the current time speed.
    pub fn advance(&mut self) {
        let delta = u64::from(self.time_speed.get());
        let expired = self.markers.advance(delta);
        self.squares.advance(delta);
        if expired > 0 {
            tracing::trace!(expired, tick = self.tick, "markers expired");
        }
    }

    fn layers(&self) -> [&dyn Layer; 2] {
        [&self.markers, &self.squares]
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}

/// Apply one action to the state.
///
/// Movement is clamped to the interior of `viewport` on both bounds of the
/// moved axis.
pub fn apply(state: &mut SceneState, action: SceneAction, viewport: Viewport) -> Phase {
    if let Some((dx, dy)) = action.movement() {
        state.cursor = viewport.clamp_interior(state.cursor.offset(dx, dy));
        return Phase::Running;
    }

    match action {
        SceneAction::Quit => return Phase::Exiting,
        SceneAction::SpeedUp => state.time_speed = state.time_speed.faster(),
        SceneAction::SpeedDown => state.time_speed = state.time_speed.slower(),
        SceneAction::SpawnMarker => {
            state.markers.add(DecayingMarker::new(state.cursor));
            tracing::debug!(at = ?state.cursor, birth = state.markers.current_age(), "spawned marker");
        }
        SceneAction::SpawnSquare => {
            state.squares.add(RotatingSquare::new(
                state.cursor,
                state.square_size,
                state.rotation_speed,
            ));
            tracing::debug!(at = ?state.cursor, birth = state.squares.current_age(), "spawned square");
        }
        SceneAction::MoveLeft
        | SceneAction::MoveRight
        | SceneAction::MoveUp
        | SceneAction::MoveDown => {}
    }
    Phase::Running
}

/// Draw one full frame (without flushing).
pub fn render(state: &SceneState, surface: &mut dyn Surface) {
    let vp = surface.viewport();
    surface.clear();
    surface.draw_border();

    for layer in state.layers() {
        layer.render_layer(surface);
    }

    render_status(state, surface, vp);

    if vp.interior_contains(state.cursor) {
        surface.put_glyph(state.cursor, CURSOR_GLYPH, ColorBand::FIRST);
    }
}

/// Status line on the top border: iteration, speed and entity counts.
fn render_status(state: &SceneState, surface: &mut dyn Surface, vp: Viewport) {
    let mut line = StatusLine::default();
    line.push_str(" tick ");
    line.push_u64(state.tick);
    line.push_str(" | speed ");
    line.push_u64(u64::from(state.time_speed.get()));
    line.push_str("x | markers ");
    line.push_u64(state.markers.len() as u64);
    line.push_str(" | squares ");
    line.push_u64(state.squares.len() as u64);
    line.push_str(" ");

    // Leave the border corners and one dash on each side visible.
    let room = (vp.width() - 4).max(0) as usize;
    let text = line.as_str();
    let end = text.char_indices().nth(room).map_or(text.len(), |(i, _)| i);
    surface.put_text(Point::new(vp.min_x + 2, vp.min_y), &text[..end], ColorBand::FIRST);
}

/// Fixed-capacity text buffer so the status line never allocates.
struct StatusLine {
    buf: [u8; 96],
    len: usize,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            buf: [0; 96],
            len: 0,
        }
    }
}

impl StatusLine {
    fn push_str(&mut self, s: &str) {
        let n = s.len().min(self.buf.len() - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
    }

    fn push_u64(&mut self, mut v: u64) {
        let mut digits = [0u8; 20];
        let mut i = digits.len();
        loop {
            i -= 1;
            digits[i] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        // Digits are ASCII.
        if let Ok(s) = std::str::from_utf8(&digits[i..]) {
            self.push_str(s);
        }
    }

    fn as_str(&self) -> &str {
        // Only ASCII is ever pushed, so truncation cannot split a char.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

/// Owns the state plus its I/O collaborators and runs one tick per call.
pub struct SceneController<I, S> {
    state: SceneState,
    phase: Phase,
    input: I,
    surface: S,
}

impl<I: InputSource, S: Surface> SceneController<I, S> {
    pub fn new(state: SceneState, input: I, surface: S) -> Self {
        Self {
            state,
            phase: Phase::Running,
            input,
            surface,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn into_parts(self) -> (SceneState, I, S) {
        (self.state, self.input, self.surface)
    }

    /// Run a single tick. I/O failures end the scene instead of propagating.
    pub fn step(&mut self) -> Phase {
        if self.phase == Phase::Exiting {
            return Phase::Exiting;
        }
        self.state.tick += 1;

        let action = match self.input.poll_action() {
            Ok(action) => action,
            Err(err) => {
                tracing::error!(%err, "input failed; leaving scene");
                self.phase = Phase::Exiting;
                return self.phase;
            }
        };

        let viewport = self.surface.sync_viewport();
        // Keep the cursor valid across terminal resizes.
        self.state.cursor = viewport.clamp_interior(self.state.cursor);

        if let Some(action) = action {
            if apply(&mut self.state, action, viewport) == Phase::Exiting {
                tracing::info!(tick = self.state.tick, "quit requested");
                self.phase = Phase::Exiting;
                return self.phase;
            }
        }

        self.state.advance();
        render(&self.state, &mut self.surface);
        if let Err(err) = self.surface.flush() {
            tracing::error!(%err, "flush failed; leaving scene");
            self.phase = Phase::Exiting;
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ScriptedInput;
    use proptest::prelude::*;
    use std::io;

    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        glyphs: Vec<(Point, char)>,
        flushes: usize,
        fail_flush: bool,
    }

    impl Surface for CountingSurface {
        fn viewport(&self) -> Viewport {
            Viewport::from_size(40, 20)
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.glyphs.clear();
        }
        fn draw_border(&mut self) {}
        fn put_glyph(&mut self, point: Point, ch: char, _band: ColorBand) {
            self.glyphs.push((point, ch));
        }
        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            if self.fail_flush {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            } else {
                Ok(())
            }
        }
    }

    fn vp() -> Viewport {
        Viewport::from_size(20, 10)
    }

    #[test]
    fn time_speed_saturates_at_both_ends() {
        let mut s = TimeSpeed::MIN;
        s = s.slower();
        assert_eq!(s, TimeSpeed::MIN);
        for _ in 0..500 {
            s = s.faster();
        }
        assert_eq!(s, TimeSpeed::MAX);
        assert_eq!(TimeSpeed::new(0).get(), 1);
        assert_eq!(TimeSpeed::new(1_000).get(), 100);
    }

    #[test]
    fn movement_clamps_to_interior() {
        let mut state = SceneState::default();
        state.cursor = Point::new(1, 1);
        apply(&mut state, SceneAction::MoveLeft, vp());
        apply(&mut state, SceneAction::MoveUp, vp());
        assert_eq!(state.cursor, Point::new(1, 1));

        state.cursor = Point::new(18, 8);
        apply(&mut state, SceneAction::MoveRight, vp());
        apply(&mut state, SceneAction::MoveDown, vp());
        assert_eq!(state.cursor, Point::new(18, 8));
    }

    #[test]
    fn spawn_uses_cursor_and_current_age() {
        let mut state = SceneState::default();
        state.cursor = Point::new(4, 4);
        state.advance();
        state.advance();
        apply(&mut state, SceneAction::SpawnMarker, vp());
        apply(&mut state, SceneAction::SpawnSquare, vp());

        let marker = &state.markers.entries()[0];
        assert_eq!(marker.birth_tick, 2);
        assert_eq!(marker.payload.position, Point::new(4, 4));
        let square = &state.squares.entries()[0];
        assert_eq!(square.payload.center, Point::new(4, 4));
        assert_eq!(square.payload.size, DEFAULT_SQUARE_SIZE);
    }

    #[test]
    fn time_speed_scales_aging() {
        let mut state = SceneState::default();
        state.time_speed = TimeSpeed::new(10);
        apply(&mut state, SceneAction::SpawnMarker, vp());
        for _ in 0..10 {
            state.advance();
        }
        assert_eq!(state.markers.len(), 1);
        state.advance();
        assert!(state.markers.is_empty());
        assert_eq!(state.squares.current_age(), 110);
    }

    #[test]
    fn quit_skips_rendering() {
        let input: ScriptedInput = [SceneAction::Quit].into_iter().collect();
        let mut ctl = SceneController::new(SceneState::default(), input, CountingSurface::default());

        assert_eq!(ctl.step(), Phase::Exiting);
        assert_eq!(ctl.surface().clears, 0);
        assert_eq!(ctl.surface().flushes, 0);
        // Exiting is terminal.
        assert_eq!(ctl.step(), Phase::Exiting);
        assert_eq!(ctl.surface().flushes, 0);
    }

    #[test]
    fn cursor_is_drawn_last() {
        let input: ScriptedInput = [SceneAction::SpawnMarker].into_iter().collect();
        let mut ctl = SceneController::new(SceneState::default(), input, CountingSurface::default());

        assert_eq!(ctl.step(), Phase::Running);
        let last = ctl.surface().glyphs.last().copied();
        assert_eq!(last, Some((CURSOR_START, CURSOR_GLYPH)));
        assert!(ctl.surface().glyphs.contains(&(CURSOR_START, '*')));
        assert_eq!(ctl.surface().flushes, 1);
    }

    #[test]
    fn status_line_reports_tick_and_speed() {
        let mut ctl = SceneController::new(
            SceneState::default(),
            ScriptedInput::new(),
            CountingSurface::default(),
        );
        ctl.step();
        let top: String = ctl
            .surface()
            .glyphs
            .iter()
            .filter(|(p, _)| p.y == 0)
            .map(|(_, c)| *c)
            .collect();
        assert!(top.starts_with(" tick 1 | speed 1x"), "{top}");
    }

    #[test]
    fn flush_failure_ends_scene() {
        let surface = CountingSurface {
            fail_flush: true,
            ..CountingSurface::default()
        };
        let mut ctl = SceneController::new(SceneState::default(), ScriptedInput::new(), surface);
        assert_eq!(ctl.step(), Phase::Exiting);
    }

    fn any_action() -> impl Strategy<Value = SceneAction> {
        prop_oneof![
            Just(SceneAction::MoveLeft),
            Just(SceneAction::MoveRight),
            Just(SceneAction::MoveUp),
            Just(SceneAction::MoveDown),
            Just(SceneAction::SpeedUp),
            Just(SceneAction::SpeedDown),
            Just(SceneAction::SpawnMarker),
            Just(SceneAction::SpawnSquare),
        ]
    }

    proptest! {
        #[test]
        fn cursor_and_speed_stay_in_range(actions in proptest::collection::vec(any_action(), 0..400)) {
            let viewport = vp();
            let mut state = SceneState::default();
            state.cursor = viewport.clamp_interior(state.cursor);
            for action in actions {
                prop_assert_eq!(apply(&mut state, action, viewport), Phase::Running);
                prop_assert!(state.cursor.x >= viewport.min_x + 1 && state.cursor.x <= viewport.max_x - 2);
                prop_assert!(state.cursor.y >= viewport.min_y + 1 && state.cursor.y <= viewport.max_y - 2);
                prop_assert!((TIME_SPEED_MIN..=TIME_SPEED_MAX).contains(&state.time_speed.get()));
            }
        }
    }
}
