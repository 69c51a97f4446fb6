//! [`Surface`] implementation backed by a [`FrameBuffer`].
//!
//! Each tick the scene draws into the framebuffer; `flush` hands it to the
//! [`TerminalRenderer`] for diffing. A surface without a renderer keeps the
//! finished frame in place so tests (and headless runs) can inspect it.

use std::io::{self, Write};

use crate::core::{Surface, Viewport};
use crate::fb::{Cell, FrameBuffer};
use crate::palette::Palette;
use crate::renderer::TerminalRenderer;
use crate::types::{ColorBand, Point};

/// Where the surface gets its size from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// Ask the terminal on every [`Surface::sync_viewport`].
    Terminal,
    Fixed { width: u16, height: u16 },
}

impl SizeSource {
    fn query(self) -> (u16, u16) {
        match self {
            SizeSource::Fixed { width, height } => (width, height),
            SizeSource::Terminal => match crossterm::terminal::size() {
                Ok(size) => size,
                Err(err) => {
                    tracing::warn!(%err, "terminal size unavailable; using 80x24");
                    (80, 24)
                }
            },
        }
    }
}

pub struct FrameSurface<W: Write = io::Stdout> {
    fb: FrameBuffer,
    palette: Palette,
    size: SizeSource,
    cap: (Option<u16>, Option<u16>),
    viewport: Viewport,
    renderer: Option<TerminalRenderer<W>>,
    frames: u64,
}

impl FrameSurface<io::Stdout> {
    /// Off-screen surface of a fixed size.
    pub fn headless(width: u16, height: u16) -> Self {
        Self::build(SizeSource::Fixed { width, height }, None)
    }

    /// Surface that follows the terminal size and draws to stdout.
    ///
    /// The renderer should already have entered the alternate screen.
    pub fn terminal(renderer: TerminalRenderer) -> Self {
        Self::build(SizeSource::Terminal, Some(renderer))
    }
}

impl<W: Write> FrameSurface<W> {
    pub fn with_renderer(size: SizeSource, renderer: TerminalRenderer<W>) -> Self {
        Self::build(size, Some(renderer))
    }

    fn build(size: SizeSource, renderer: Option<TerminalRenderer<W>>) -> Self {
        let mut surface = Self {
            fb: FrameBuffer::new(0, 0),
            palette: Palette::default(),
            size,
            cap: (None, None),
            viewport: Viewport::from_size(0, 0),
            renderer,
            frames: 0,
        };
        surface.resync();
        surface
    }

    /// Never draw more than `max_width` x `max_height` cells.
    pub fn with_cap(mut self, max_width: Option<u16>, max_height: Option<u16>) -> Self {
        self.cap = (max_width, max_height);
        self.resync();
        self
    }

    pub fn set_size(&mut self, size: SizeSource) {
        self.size = size;
    }

    /// The frame being drawn, or the last finished frame when headless.
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Frames flushed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer_mut(&mut self) -> Option<&mut TerminalRenderer<W>> {
        self.renderer.as_mut()
    }

    /// Detach the renderer, e.g. to restore the terminal after the run.
    pub fn take_renderer(&mut self) -> Option<TerminalRenderer<W>> {
        self.renderer.take()
    }

    fn resync(&mut self) -> Viewport {
        let (w, h) = self.size.query();
        let (max_w, max_h) = self.cap;
        let vp = Viewport::from_size(w, h).capped(max_w, max_h);

        if vp != self.viewport {
            tracing::debug!(width = vp.width(), height = vp.height(), "viewport changed");
            self.viewport = vp;
        }
        // Viewport dims come from u16 sizes, so they fit back.
        let (fw, fh) = (vp.width() as u16, vp.height() as u16);
        if (self.fb.width(), self.fb.height()) != (fw, fh) {
            self.fb.resize(fw, fh);
        }
        vp
    }
}

impl<W: Write> Surface for FrameSurface<W> {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn sync_viewport(&mut self) -> Viewport {
        self.resync()
    }

    fn clear(&mut self) {
        self.fb.fill(Cell::default());
    }

    fn draw_border(&mut self) {
        self.fb.draw_border(self.palette.border);
    }

    fn put_glyph(&mut self, point: Point, ch: char, band: ColorBand) {
        debug_assert!(
            self.fb.in_bounds(point),
            "glyph {ch:?} at {point:?} outside {}x{} frame",
            self.fb.width(),
            self.fb.height()
        );
        self.fb.set_at(point, Cell::new(ch, self.palette.style(band)));
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw_swap(&mut self.fb).map_err(io::Error::other)?;
        }
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CURSOR_GLYPH;

    #[test]
    fn headless_surface_keeps_finished_frame() {
        let mut s = FrameSurface::headless(6, 4);
        assert_eq!(s.sync_viewport(), Viewport::from_size(6, 4));
        s.clear();
        s.draw_border();
        s.put_glyph(Point::new(2, 1), CURSOR_GLYPH, ColorBand::FIRST);
        s.flush().unwrap();

        assert_eq!(s.frame().row_text(0), "┌────┐");
        assert_eq!(s.frame().row_text(1), "│ X  │");
        assert_eq!(s.frames(), 1);
        let cell = s.frame().cell_at(Point::new(2, 1)).unwrap();
        assert!(cell.style.bold);
    }

    #[test]
    fn cap_limits_viewport_and_frame() {
        let s = FrameSurface::headless(120, 40).with_cap(Some(50), Some(50));
        assert_eq!(s.viewport(), Viewport::from_size(50, 40));
        assert_eq!((s.frame().width(), s.frame().height()), (50, 40));
    }

    #[test]
    fn size_change_is_picked_up_on_sync() {
        let mut s = FrameSurface::headless(10, 10);
        s.set_size(SizeSource::Fixed {
            width: 20,
            height: 5,
        });
        assert_eq!(s.viewport(), Viewport::from_size(10, 10));
        assert_eq!(s.sync_viewport(), Viewport::from_size(20, 5));
        assert_eq!(s.frame().width(), 20);
    }

    #[test]
    fn flush_with_renderer_writes_frame() {
        let renderer = TerminalRenderer::new(Vec::<u8>::new());
        let mut s = FrameSurface::with_renderer(
            SizeSource::Fixed {
                width: 4,
                height: 3,
            },
            renderer,
        );
        s.clear();
        s.draw_border();
        s.flush().unwrap();

        let out = s.renderer_mut().map(|r| r.writer().clone()).unwrap();
        assert!(String::from_utf8_lossy(&out).contains('┌'));
    }
}
