pub mod content;
mod ids;
mod settings;
mod variation;
mod verdict;

pub use content::{ExerciseContent, ExerciseKind, MalformedContent};
pub use ids::{CompletionKey, ExerciseId, PackageId, ParseIdError, UserId};

pub use settings::{ResolverSettings, SettingsError};
pub use variation::Variation;
pub use verdict::Verdict;
