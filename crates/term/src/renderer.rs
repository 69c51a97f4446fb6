//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after a size change) is a full redraw;
//! after that only runs of changed cells are written. Frames are encoded into
//! a reusable byte buffer and written with a single `write_all`.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        tracing::debug!("terminal entered");
        Ok(())
    }

    /// Undo [`Self::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        encode_restore_into(&mut self.buf)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        tracing::debug!("terminal restored");
        Ok(())
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds the frame before this one (or a blank frame of the
    /// same size), ready to be cleared and drawn into again without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    /// Bytes most recently sent to the terminal.
    pub fn last_output(&self) -> &[u8] {
        &self.buf
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf).context("write frame")?;
        self.out.flush().context("flush terminal")?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(%err, "terminal restore on drop failed");
        }
    }
}

/// Put the terminal back in cooked mode on the main screen.
///
/// For use when the renderer that entered it is unreachable (a panicked tick
/// thread took it down).
pub fn restore_terminal() -> Result<()> {
    let mut buf = Vec::new();
    encode_restore_into(&mut buf)?;
    let mut out = io::stdout();
    out.write_all(&buf)?;
    out.flush()?;
    terminal::disable_raw_mode().context("disable raw mode")?;
    Ok(())
}

fn encode_restore_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in fb.row(y) {
            pen.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    pen.reset(out)
}

/// Encode only the cells that differ between `prev` and `next` into `out`.
///
/// Both frames must have the same size; use [`encode_full_into`] otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    let mut wrote = false;

    for run in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        let row = next.row(run.y);
        for cell in &row[usize::from(run.x)..usize::from(run.x + run.len)] {
            pen.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        wrote = true;
    }

    if wrote {
        pen.reset(out)?;
    }
    Ok(())
}

/// A horizontal run of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Iterator over maximal runs of cells that differ between two equal-size frames.
pub struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    pub fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        debug_assert_eq!(
            (prev.width(), prev.height()),
            (next.width(), next.height())
        );
        Self {
            prev,
            next,
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let width = self.next.width().min(self.prev.width());
        let height = self.next.height().min(self.prev.height());

        while self.y < height {
            let a = self.prev.row(self.y);
            let b = self.next.row(self.y);

            while self.x < width && a[usize::from(self.x)] == b[usize::from(self.x)] {
                self.x += 1;
            }
            if self.x < width {
                let start = self.x;
                while self.x < width && a[usize::from(self.x)] != b[usize::from(self.x)] {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }

            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Tracks the active style so unchanged attributes are not re-sent.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        self.current = None;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
