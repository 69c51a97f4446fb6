//! Terminal rendering for the scene.
//!
//! The scene draws into a simple framebuffer rather than through a widget
//! toolkit; the framebuffer is diffed against the previous frame and only
//! changed cells reach the terminal.
//!
//! - [`fb`]: cells, styles and the framebuffer itself
//! - [`palette`]: color bands to cell styles
//! - [`renderer`]: crossterm encoding, terminal enter/exit
//! - [`surface`]: the `Surface` the scene controller draws through

pub mod fb;
pub mod palette;
pub mod renderer;
pub mod surface;

pub use tui_scene_core as core;
pub use tui_scene_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use palette::Palette;
pub use renderer::{
    encode_diff_into, encode_full_into, restore_terminal, ChangedRuns, Run, TerminalRenderer,
};
pub use surface::{FrameSurface, SizeSource};
