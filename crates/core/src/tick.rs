//! The contract between the scheduler and whatever it drives.

use crate::scene::{Phase, SceneController};
use crate::surface::{InputSource, Surface};

/// What a tick wants the scheduler to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl From<Phase> for Flow {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Running => Flow::Continue,
            Phase::Exiting => Flow::Stop,
        }
    }
}

/// Work performed once per scheduler interval.
///
/// Implementations must not panic on ordinary failures; they report them by
/// returning [`Flow::Stop`].
pub trait Tick {
    fn tick(&mut self) -> Flow;
}

impl<F: FnMut() -> Flow> Tick for F {
    fn tick(&mut self) -> Flow {
        self()
    }
}

impl<I: InputSource, S: Surface> Tick for SceneController<I, S> {
    fn tick(&mut self) -> Flow {
        self.step().into()
    }
}
