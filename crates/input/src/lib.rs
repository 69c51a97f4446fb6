//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`types::SceneAction`] and exposes them
//! through the core's [`core::InputSource`] boundary, so the scene controller
//! never sees terminal-specific types.
//!
//! | Keys | Action |
//! |------|--------|
//! | arrows, `h` `j` `k` `l` | move cursor |
//! | `+` `=` / `-` `_` | time speed up / down |
//! | space | spawn decaying marker |
//! | `r`, Enter | spawn rotating square |
//! | `x`, `q`, Esc, Ctrl-C | quit |

pub mod map;
pub mod source;

pub use tui_scene_core as core;
pub use tui_scene_types as types;

pub use map::{is_quit, map_key};
pub use source::TerminalInput;
