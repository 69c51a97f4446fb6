//! Error types for the runtime layer.

use std::io;

/// Failures starting or joining the scheduler.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler interval must be greater than zero")]
    InvalidInterval,

    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("tick panicked on the scheduler thread")]
    TickPanicked,
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SCENE_TICK_MS must be greater than zero")]
    ZeroInterval,

    #[error("SCENE_MARKER_LIFETIME must be greater than zero")]
    ZeroMarkerLifetime,

    #[error("SCENE_SQUARE_SIZE must be within {min}..={max} (got {value})")]
    SquareSize { value: i32, min: i32, max: i32 },

    #[error("SCENE_TIME_SPEED must be within {min}..={max} (got {value})")]
    TimeSpeed { value: u32, min: u32, max: u32 },
}
