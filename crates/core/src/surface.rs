//! Boundary traits between the simulation and the outside world.
//!
//! The core never talks to a terminal directly. It reads logical actions from
//! an [`InputSource`] and draws through a [`Surface`]; the terminal crates
//! implement both. Tests use [`ScriptedInput`] and in-memory surfaces.

use std::collections::VecDeque;
use std::io;

use crate::types::{ColorBand, Point, SceneAction};

/// Drawable area of a surface.
///
/// `max_x`/`max_y` are exclusive, matching a terminal of `max_x - min_x`
/// columns. The outermost ring is reserved for the border, so the interior
/// is `[min_x + 1, max_x - 2] x [min_y + 1, max_y - 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Viewport {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Viewport anchored at the origin.
    pub fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, i32::from(width), i32::from(height))
    }

    pub fn width(&self) -> i32 {
        (self.max_x - self.min_x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max_y - self.min_y).max(0)
    }

    /// Shrink to at most `max_width` x `max_height`, keeping the origin.
    pub fn capped(self, max_width: Option<u16>, max_height: Option<u16>) -> Self {
        let mut out = self;
        if let Some(w) = max_width {
            out.max_x = out.max_x.min(out.min_x + i32::from(w));
        }
        if let Some(h) = max_height {
            out.max_y = out.max_y.min(out.min_y + i32::from(h));
        }
        out
    }

    /// Whether `p` is anywhere on the surface, border included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }

    /// Whether `p` lies strictly inside the border.
    pub fn interior_contains(&self, p: Point) -> bool {
        p.x > self.min_x && p.x < self.max_x - 1 && p.y > self.min_y && p.y < self.max_y - 1
    }

    /// Pull `p` into the interior.
    ///
    /// On a viewport too small to have an interior the low bound wins, so
    /// the result is well-defined even mid-resize.
    pub fn clamp_interior(&self, p: Point) -> Point {
        Point::new(
            clamp_axis(p.x, self.min_x + 1, self.max_x - 2),
            clamp_axis(p.y, self.min_y + 1, self.max_y - 2),
        )
    }
}

fn clamp_axis(v: i32, lo: i32, hi: i32) -> i32 {
    v.min(hi).max(lo)
}

/// Render target for one frame.
pub trait Surface {
    /// Bounds of the frame being drawn.
    fn viewport(&self) -> Viewport;

    /// Pick up a size change from the display and return the new bounds.
    ///
    /// Called once at the start of every tick; [`Surface::viewport`] must
    /// report the same value until the next call.
    fn sync_viewport(&mut self) -> Viewport {
        self.viewport()
    }

    fn clear(&mut self);

    /// Draw a frame around the outermost ring of the viewport.
    fn draw_border(&mut self);

    /// Plot one glyph. Callers keep `point` inside [`Surface::viewport`].
    fn put_glyph(&mut self, point: Point, ch: char, band: ColorBand);

    /// Write `text` left to right starting at `origin`, stopping at the right edge.
    fn put_text(&mut self, origin: Point, text: &str, band: ColorBand) {
        let vp = self.viewport();
        let mut p = origin;
        for ch in text.chars() {
            if !vp.contains(p) {
                break;
            }
            self.put_glyph(p, ch, band);
            p.x += 1;
        }
    }

    /// Present the frame.
    fn flush(&mut self) -> io::Result<()>;
}

/// Non-blocking source of logical input events.
pub trait InputSource {
    /// Next pending action, or `Ok(None)` when nothing is waiting.
    fn poll_action(&mut self) -> io::Result<Option<SceneAction>>;
}

/// Input that replays a fixed list of actions, one per poll, then goes idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Option<SceneAction>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for a future poll.
    pub fn push(&mut self, action: SceneAction) -> &mut Self {
        self.queue.push_back(Some(action));
        self
    }

    /// Queue a poll that reports no input.
    pub fn idle(&mut self) -> &mut Self {
        self.queue.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl FromIterator<SceneAction> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = SceneAction>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().map(Some).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_action(&mut self) -> io::Result<Option<SceneAction>> {
        Ok(self.queue.pop_front().flatten())
    }
}
