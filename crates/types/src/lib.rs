//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the scene
//! simulator. All types are plain data with no external dependencies, so they
//! can be used from the simulation core, the terminal layer and tests alike.
//!
//! # Grid Model
//!
//! The display is a grid of fixed-width character cells addressed by
//! [`Point`] `(x, y)` = `(column, row)`, with `y` growing downwards. The
//! outermost ring of the viewport holds the border, so entities and the cursor
//! live in the interior.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Scheduler interval (20 ticks per second) |
//! | `MARKER_LIFETIME_TICKS` | 100 | Age after which a marker is evicted |
//! | `BAND_TICKS` | 10 | Ticks of age per palette band |
//! | `TIME_SPEED_MIN` | 1 | Slowest time speed |
//! | `TIME_SPEED_MAX` | 100 | Fastest time speed |
//!
//! # Examples
//!
//! ```
//! use tui_scene_types::{ColorBand, Point, SceneAction};
//!
//! let p = Point::new(3, 4);
//! assert_eq!(p.offset(1, -1), Point::new(4, 3));
//!
//! assert_eq!(SceneAction::MoveUp.movement(), Some((0, -1)));
//! assert_eq!(SceneAction::SpawnMarker.movement(), None);
//!
//! // Bands saturate at the last palette entry.
//! assert_eq!(ColorBand::from_age(250), ColorBand::LAST);
//! ```

/// Scheduler interval in milliseconds (50ms = 20 ticks per second).
pub const TICK_MS: u64 = 50;

/// Markers survive while their age is at most this many ticks.
pub const MARKER_LIFETIME_TICKS: u64 = 100;

/// Number of bands in the fixed color palette.
pub const PALETTE_BANDS: u8 = 10;

/// Ticks of age covered by one palette band.
pub const BAND_TICKS: u64 = 10;

/// Slowest time speed (one age unit per tick).
pub const TIME_SPEED_MIN: u32 = 1;

/// Fastest time speed.
pub const TIME_SPEED_MAX: u32 = 100;

/// Default square rotation in degrees per simulated tick.
pub const DEFAULT_ROTATION_SPEED: i32 = 10;

/// Default square half-width in cells.
pub const DEFAULT_SQUARE_SIZE: i32 = 2;

/// Smallest accepted square half-width.
pub const MIN_SQUARE_SIZE: i32 = 1;

/// Largest accepted square half-width (the widest possible terminal).
pub const MAX_SQUARE_SIZE: i32 = u16::MAX as i32;

/// Where the cursor starts before the first clamp.
pub const CURSOR_START: Point = Point::new(10, 10);

/// Glyph used for decaying markers.
pub const MARKER_GLYPH: char = '*';

/// Glyph used for square edges.
pub const SQUARE_GLYPH: char = '#';

/// Glyph used for rotated square corners.
pub const CORNER_GLYPH: char = '+';

/// Glyph drawn at the cursor position.
pub const CURSOR_GLYPH: char = 'X';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_full_marker_lifetime() {
        // Ages 0..=100 must map onto the ten bands, the final tick landing in the last one.
        assert_eq!(PALETTE_BANDS as u64 * BAND_TICKS, MARKER_LIFETIME_TICKS);
        assert_eq!(ColorBand::from_age(MARKER_LIFETIME_TICKS), ColorBand::LAST);
    }

    #[test]
    fn only_move_actions_displace_the_cursor() {
        let moves = [
            SceneAction::MoveLeft,
            SceneAction::MoveRight,
            SceneAction::MoveUp,
            SceneAction::MoveDown,
        ];
        let others = [
            SceneAction::Quit,
            SceneAction::SpeedUp,
            SceneAction::SpeedDown,
            SceneAction::SpawnMarker,
            SceneAction::SpawnSquare,
        ];
        let total: (i32, i32) = moves
            .iter()
            .filter_map(SceneAction::movement)
            .fold((0, 0), |(x, y), (dx, dy)| (x + dx, y + dy));
        assert_eq!(total, (0, 0));
        assert!(moves.iter().all(|a| a.movement().is_some()));
        assert!(others.iter().all(|a| a.movement().is_none()));
    }

    #[test]
    fn square_size_bounds_are_ordered() {
        assert!(MIN_SQUARE_SIZE <= DEFAULT_SQUARE_SIZE && DEFAULT_SQUARE_SIZE <= MAX_SQUARE_SIZE);
    }

    #[test]
    fn corner_and_edge_glyphs_differ() {
        assert_ne!(CORNER_GLYPH, SQUARE_GLYPH);
    }
}

/// A cell position on the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Index into the fixed 10-band palette.
///
/// Band 0 is the brightest ("fresh") color and [`ColorBand::LAST`] the
/// dimmest. The terminal layer decides what the bands actually look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColorBand(u8);

impl ColorBand {
    pub const FIRST: ColorBand = ColorBand(0);
    pub const LAST: ColorBand = ColorBand(PALETTE_BANDS - 1);

    /// Build a band, saturating at [`ColorBand::LAST`].
    pub const fn new(index: u8) -> Self {
        if index >= PALETTE_BANDS {
            Self::LAST
        } else {
            ColorBand(index)
        }
    }

    /// Band for an entity that is `age` ticks old.
    ///
    /// ```
    /// use tui_scene_types::ColorBand;
    ///
    /// assert_eq!(ColorBand::from_age(0), ColorBand::FIRST);
    /// assert_eq!(ColorBand::from_age(19), ColorBand::new(1));
    /// assert_eq!(ColorBand::from_age(100), ColorBand::LAST);
    /// ```
    pub const fn from_age(age: u64) -> Self {
        let band = age / BAND_TICKS;
        if band >= PALETTE_BANDS as u64 {
            Self::LAST
        } else {
            ColorBand(band as u8)
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Logical input events understood by the scene controller.
///
/// Raw key codes are mapped onto these by the input layer, so the controller
/// never sees terminal-specific types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneAction {
    /// Leave the simulation
    Quit,
    /// Move the cursor one column left
    MoveLeft,
    /// Move the cursor one column right
    MoveRight,
    /// Move the cursor one row up
    MoveUp,
    /// Move the cursor one row down
    MoveDown,
    /// Increase time speed by one
    SpeedUp,
    /// Decrease time speed by one
    SpeedDown,
    /// Drop a decaying marker at the cursor
    SpawnMarker,
    /// Create a rotating square centered on the cursor
    SpawnSquare,
}

impl SceneAction {
    /// Cursor displacement for movement actions.
    pub fn movement(&self) -> Option<(i32, i32)> {
        match self {
            SceneAction::MoveLeft => Some((-1, 0)),
            SceneAction::MoveRight => Some((1, 0)),
            SceneAction::MoveUp => Some((0, -1)),
            SceneAction::MoveDown => Some((0, 1)),
            _ => None,
        }
    }
}
