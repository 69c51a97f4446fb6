//! Framebuffer and style types for terminal rendering.
//!
//! A frame is a flat row-major grid of [`Cell`]s addressed in terminal
//! coordinates (column, row). Scene points are `i32`; anything outside the
//! grid is rejected by [`FrameBuffer::cell_at`] and ignored by
//! [`FrameBuffer::set_at`].

use crate::types::Point;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t` is in 0..=255.
    pub const fn mix(self, other: Rgb, t: u8) -> Rgb {
        const fn lerp(a: u8, b: u8, t: u8) -> u8 {
            let a = a as u16;
            let b = b as u16;
            let t = t as u16;
            ((a * (255 - t) + b * t) / 255) as u8
        }
        Rgb::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }
}

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', CellStyle::default())
    }
}

/// Box-drawing glyphs for [`FrameBuffer::draw_border`].
const BORDER_H: char = '─';
const BORDER_V: char = '│';
const BORDER_TL: char = '┌';
const BORDER_TR: char = '┐';
const BORDER_BL: char = '└';
const BORDER_BR: char = '┘';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, blanking every cell. Keeps the allocation when the
    /// new frame fits in it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }

    fn index_of(&self, p: Point) -> Option<usize> {
        let x = u16::try_from(p.x).ok()?;
        let y = u16::try_from(p.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.index_of(p).is_some()
    }

    pub fn cell_at(&self, p: Point) -> Option<Cell> {
        self.index_of(p).map(|i| self.cells[i])
    }

    pub fn set_at(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index_of(p) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Frame the outermost ring with box-drawing characters.
    pub fn draw_border(&mut self, style: CellStyle) {
        let (w, h) = (i32::from(self.width), i32::from(self.height));
        if w == 0 || h == 0 {
            return;
        }
        let (right, bottom) = (w - 1, h - 1);

        for x in 1..right {
            self.set_at(Point::new(x, 0), Cell::new(BORDER_H, style));
            self.set_at(Point::new(x, bottom), Cell::new(BORDER_H, style));
        }
        for y in 1..bottom {
            self.set_at(Point::new(0, y), Cell::new(BORDER_V, style));
            self.set_at(Point::new(right, y), Cell::new(BORDER_V, style));
        }
        self.set_at(Point::new(0, 0), Cell::new(BORDER_TL, style));
        self.set_at(Point::new(right, 0), Cell::new(BORDER_TR, style));
        self.set_at(Point::new(0, bottom), Cell::new(BORDER_BL, style));
        self.set_at(Point::new(right, bottom), Cell::new(BORDER_BR, style));
    }

    /// The characters of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_points_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        let cell = Cell::new('x', CellStyle::default());
        fb.set_at(Point::new(-1, 0), cell);
        fb.set_at(Point::new(4, 0), cell);
        fb.set_at(Point::new(0, 3), cell);
        assert!(fb.row(0).iter().chain(fb.row(1)).chain(fb.row(2)).all(|c| c.ch == ' '));
        assert_eq!(fb.cell_at(Point::new(4, 0)), None);
        assert!(fb.in_bounds(Point::new(3, 2)));
    }

    #[test]
    fn border_outlines_the_frame() {
        let mut fb = FrameBuffer::new(5, 3);
        fb.draw_border(CellStyle::default());
        assert_eq!(fb.row_text(0), "┌───┐");
        assert_eq!(fb.row_text(1), "│   │");
        assert_eq!(fb.row_text(2), "└───┘");
    }

    #[test]
    fn resize_blanks_cells() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.fill(Cell::new('#', CellStyle::default()));
        fb.resize(2, 4);
        assert_eq!(fb.width(), 2);
        assert_eq!(fb.height(), 4);
        assert_eq!(fb.row_text(3), "  ");
        assert!(fb.row(4).is_empty());
    }

    #[test]
    fn mix_hits_both_ends() {
        let a = Rgb::new(200, 100, 0);
        let b = Rgb::new(0, 100, 200);
        assert_eq!(a.mix(b, 0), a);
        assert_eq!(a.mix(b, 255), b);
    }
}
