//! Runtime layer: scheduling, configuration and logging.
//!
//! The simulation itself lives in `tui-scene-core` and knows nothing about
//! threads or the environment. This crate supplies the pieces that make it a
//! running program:
//!
//! - [`scheduler`]: drift-corrected fixed-interval ticking on a dedicated thread
//! - [`config`]: `SCENE_*` environment variables with validation
//! - [`logging`]: opt-in `tracing` output to a file
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_scene_engine::{Flow, Scheduler};
//!
//! let mut remaining = 3;
//! let scheduler = Scheduler::new(Duration::from_millis(1)).unwrap();
//! let (_, report) = scheduler
//!     .run(move || {
//!         remaining -= 1;
//!         if remaining == 0 { Flow::Stop } else { Flow::Continue }
//!     })
//!     .unwrap();
//! assert_eq!(report.ticks, 3);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod scheduler;

pub use tui_scene_core as core;
pub use tui_scene_types as types;

pub use config::SceneConfig;
pub use error::{ConfigError, SchedulerError};
pub use scheduler::{RunReport, Scheduler, SchedulerHandle, StopHandle};
pub use tui_scene_core::{Flow, Tick};
