mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{ProgressEntry, ProgressSummary, can_jump};
pub use service::{ExerciseSession, Phase, SessionConfig, SessionSnapshot};
pub use workflow::{ExerciseLoopService, SubmitOutcome};
