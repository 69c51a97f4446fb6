//! Entity model - the things that live in the scene
//!
//! Entities are plain payloads stored in an [`AgedCollection`]; the collection
//! knows when each one was born. Drawing goes through the [`Drawable`]
//! capability so the controller can render any collection as a [`Layer`]
//! without knowing what it holds.

use crate::aged::AgedCollection;
use crate::geometry::{rasterize_line, rotate};
use crate::surface::{Surface, Viewport};
use crate::types::{ColorBand, Point, CORNER_GLYPH, MARKER_GLYPH, SQUARE_GLYPH};

/// Something that can draw itself given how old it is.
pub trait Drawable {
    /// Draw onto `surface`; `age` is ticks since the entity was added.
    fn render(&self, surface: &mut dyn Surface, age: u64);
}

/// A whole collection of drawables, rendered in insertion order.
pub trait Layer {
    fn render_layer(&self, surface: &mut dyn Surface);

    fn entity_count(&self) -> usize;
}

impl<T: Drawable> Layer for AgedCollection<T> {
    fn render_layer(&self, surface: &mut dyn Surface) {
        let now = self.current_age();
        for entry in self.iter() {
            entry.payload.render(surface, entry.age_at(now));
        }
    }

    fn entity_count(&self) -> usize {
        self.len()
    }
}

/// Plot `p` only if it is inside the border.
///
/// Entities near the edge (rotating squares especially) routinely reach past
/// it; those cells are skipped rather than handed to the surface.
fn plot(surface: &mut dyn Surface, viewport: &Viewport, p: Point, ch: char, band: ColorBand) {
    if viewport.interior_contains(p) {
        surface.put_glyph(p, ch, band);
    }
}

/// A single glyph that fades through the palette as it ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayingMarker {
    pub glyph: char,
    pub position: Point,
}

impl DecayingMarker {
    pub fn new(position: Point) -> Self {
        Self {
            glyph: MARKER_GLYPH,
            position,
        }
    }
}

impl Drawable for DecayingMarker {
    fn render(&self, surface: &mut dyn Surface, age: u64) {
        let vp = surface.viewport();
        plot(surface, &vp, self.position, self.glyph, ColorBand::from_age(age));
    }
}

/// Outline of a square spinning about its center.
///
/// The rotation angle is not stored; it is derived from the entity's age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatingSquare {
    pub glyph: char,
    pub corner_glyph: char,
    pub center: Point,
    /// Half-width in cells.
    pub size: i32,
    /// Degrees per simulated tick.
    pub rotation_speed: i32,
    pub band: ColorBand,
}

impl RotatingSquare {
    pub fn new(center: Point, size: i32, rotation_speed: i32) -> Self {
        Self {
            glyph: SQUARE_GLYPH,
            corner_glyph: CORNER_GLYPH,
            center,
            size,
            rotation_speed,
            band: ColorBand::new(2),
        }
    }

    /// Rotation in degrees after `age` ticks.
    pub fn angle_at(&self, age: u64) -> f64 {
        f64::from(self.rotation_speed) * age as f64
    }

    /// Unrotated corners: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.center;
        let s = self.size;
        let (left, right) = (x.saturating_sub(s), x.saturating_add(s));
        let (top, bottom) = (y.saturating_sub(s), y.saturating_add(s));
        [
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ]
    }

    /// Corners rotated about the center, in the same order as [`Self::corners`].
    pub fn rotated_corners(&self, angle_degrees: f64) -> [Point; 4] {
        self.corners()
            .map(|corner| rotate(corner, self.center, angle_degrees))
    }

    /// Top, right, bottom and left edges as segments between rotated corners.
    pub fn edges(&self, angle_degrees: f64) -> [(Point, Point); 4] {
        let [tl, tr, br, bl] = self.rotated_corners(angle_degrees);
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}

impl Drawable for RotatingSquare {
    fn render(&self, surface: &mut dyn Surface, age: u64) {
        let vp = surface.viewport();
        let angle = self.angle_at(age);

        for (from, to) in self.edges(angle) {
            for p in rasterize_line(from, to) {
                plot(surface, &vp, p, self.glyph, self.band);
            }
        }
        for corner in self.rotated_corners(angle) {
            plot(surface, &vp, corner, self.corner_glyph, self.band);
        }
    }
}
