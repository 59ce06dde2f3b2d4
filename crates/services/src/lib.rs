#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use exercise_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    ExerciseLoopService, ExerciseSession, Phase, ProgressEntry, ProgressSummary, SessionConfig,
    SessionSnapshot, SubmitOutcome, can_jump,
};
