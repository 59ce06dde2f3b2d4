use std::sync::Arc;

use exercise_core::Resolver;
use exercise_core::model::content::ExerciseContent;
use exercise_core::model::{CompletionKey, Verdict};
use storage::repository::{CompletionRecord, CompletionRepository};

use super::service::{ExerciseSession, SessionConfig};
use crate::Clock;
use crate::error::SessionError;

/// Result of submitting an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub verdict: Verdict,
    /// Whether the completion reached storage. A failed write never changes
    /// the verdict or reopens the attempt.
    pub persisted: bool,
}

/// Orchestrates session start, grading and completion recording.
#[derive(Clone)]
pub struct ExerciseLoopService {
    clock: Clock,
    resolver: Resolver,
    completions: Arc<dyn CompletionRepository>,
}

impl ExerciseLoopService {
    #[must_use]
    pub fn new(clock: Clock, completions: Arc<dyn CompletionRepository>) -> Self {
        Self {
            clock,
            resolver: Resolver::default(),
            completions,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Start a session for already-parsed content.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the content cannot back a session.
    pub fn start(
        &self,
        content: ExerciseContent,
        config: SessionConfig,
    ) -> Result<ExerciseSession, SessionError> {
        let session = ExerciseSession::with_resolver(content, config, &self.resolver)?;
        Ok(session.with_clock(self.clock))
    }

    /// Parse a JSON payload and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the payload does not parse or the
    /// content cannot back a session.
    pub fn start_json(
        &self,
        payload: &str,
        config: SessionConfig,
    ) -> Result<ExerciseSession, SessionError> {
        self.start(ExerciseContent::from_json(payload)?, config)
    }

    /// Check the attempt and record the completion under `key`.
    ///
    /// Storage failures are logged and reported through
    /// [`SubmitOutcome::persisted`]; the checked verdict stands either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyChecked` if the attempt was already
    /// submitted.
    pub async fn submit(
        &self,
        session: &mut ExerciseSession,
        key: CompletionKey,
    ) -> Result<SubmitOutcome, SessionError> {
        let verdict = session.check()?.clone();
        let record = CompletionRecord {
            key,
            correct: verdict.overall_correct(),
            attempts: session.attempt_count(),
            completed_at: session.checked_at().unwrap_or_else(|| self.clock.now()),
        };

        let persisted = match self.completions.mark_complete(&record).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%key, error = %err, "failed to record exercise completion");
                false
            }
        };

        Ok(SubmitOutcome { verdict, persisted })
    }

    /// Reset a checked attempt with a fresh shuffle. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotChecked` if the attempt is still open.
    pub fn redo(&self, session: &mut ExerciseSession) -> Result<(), SessionError> {
        session.redo()
    }

    /// Read back a recorded completion.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the read fails.
    pub async fn completion(
        &self,
        key: CompletionKey,
    ) -> Result<Option<CompletionRecord>, SessionError> {
        Ok(self.completions.get_completion(key).await?)
    }
}
