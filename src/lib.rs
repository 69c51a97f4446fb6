//! TUI scene simulator (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can write `tui_scene::{core, engine, input, term, types}`.

pub use tui_scene_core as core;
pub use tui_scene_engine as engine;
pub use tui_scene_input as input;
pub use tui_scene_term as term;
pub use tui_scene_types as types;
