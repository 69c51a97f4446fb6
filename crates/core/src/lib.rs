//! Core simulation module - pure, deterministic, and testable
//!
//! This crate holds everything the scene simulator computes. It has **no
//! terminal dependencies**: input arrives as [`types::SceneAction`] through an
//! [`InputSource`] and output leaves through a [`Surface`], which makes it:
//!
//! - **Deterministic**: the same action sequence always produces the same frames
//! - **Testable**: scripted input and in-memory surfaces cover every rule
//! - **Allocation-free per frame**: rendering walks entities with iterators
//!
//! # Module Structure
//!
//! - [`aged`]: insertion-ordered collections that track birth ticks and evict
//! - [`geometry`]: point rotation and Bresenham line rasterization
//! - [`entity`]: decaying markers, rotating squares and the `Drawable` capability
//! - [`scene`]: scene state, action handling and the per-tick controller
//! - [`surface`]: viewport, render surface and input source boundaries
//! - [`tick`]: the `Tick`/`Flow` contract the scheduler drives
//!
//! # Example
//!
//! ```
//! use tui_scene_core::{apply, Phase, SceneState, Viewport};
//! use tui_scene_types::SceneAction;
//!
//! let mut state = SceneState::default();
//! let vp = Viewport::from_size(40, 20);
//!
//! apply(&mut state, SceneAction::SpawnMarker, vp);
//! assert_eq!(state.markers.len(), 1);
//!
//! // Markers expire once they are more than 100 ticks old.
//! for _ in 0..101 {
//!     state.advance();
//! }
//! assert!(state.markers.is_empty());
//!
//! assert_eq!(apply(&mut state, SceneAction::Quit, vp), Phase::Exiting);
//! ```

pub mod aged;
pub mod entity;
pub mod geometry;
pub mod scene;
pub mod surface;
pub mod tick;

pub use tui_scene_types as types;

// Re-export commonly used types for convenience
pub use aged::{AgedCollection, AgedEntry, Retention};
pub use entity::{DecayingMarker, Drawable, Layer, RotatingSquare};
pub use geometry::{rasterize_line, rotate, LineIter};
pub use scene::{apply, render, Phase, SceneController, SceneSettings, SceneState, TimeSpeed};
pub use surface::{InputSource, ScriptedInput, Surface, Viewport};
pub use tick::{Flow, Tick};
