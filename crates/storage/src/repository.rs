use async_trait::async_trait;
use chrono::{DateTime, Utc};
use exercise_core::model::{CompletionKey, PackageId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A learner's completion of one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub key: CompletionKey,
    /// Whether the checked attempt was fully correct.
    pub correct: bool,
    /// Attempt number the completion was recorded on, starting at 1.
    pub attempts: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletionRecord {
    /// Combine a new completion with what is already stored under the same key.
    ///
    /// A key once completed correctly stays correct; the rest follows the
    /// newer record, keeping the higher attempt count.
    #[must_use]
    pub fn merge(self, existing: Option<&CompletionRecord>) -> Self {
        match existing {
            None => self,
            Some(old) => Self {
                correct: self.correct || old.correct,
                attempts: self.attempts.max(old.attempts),
                ..self
            },
        }
    }
}

/// Repository contract for exercise completions.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Record a completion. Repeating the same call leaves the stored state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the completion cannot be stored.
    async fn mark_complete(&self, record: &CompletionRecord) -> Result<(), StorageError>;

    /// Fetch the completion stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_completion(
        &self,
        key: CompletionKey,
    ) -> Result<Option<CompletionRecord>, StorageError>;

    /// List a learner's completions inside one package, ordered by exercise.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_completions(
        &self,
        package_id: PackageId,
        user_id: UserId,
    ) -> Result<Vec<CompletionRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    completions: Arc<Mutex<HashMap<CompletionKey, CompletionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn mark_complete(&self, record: &CompletionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let merged = record.clone().merge(guard.get(&record.key));
        guard.insert(record.key, merged);
        Ok(())
    }

    async fn get_completion(
        &self,
        key: CompletionKey,
    ) -> Result<Option<CompletionRecord>, StorageError> {
        let guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn list_completions(
        &self,
        package_id: PackageId,
        user_id: UserId,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        let guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut found: Vec<CompletionRecord> = guard
            .values()
            .filter(|r| r.key.package_id == package_id && r.key.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.key.exercise_id);
        Ok(found)
    }
}

/// Completion repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub completions: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            completions: Arc::new(InMemoryRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exercise_core::model::ExerciseId;
    use exercise_core::time::fixed_now;

    fn record(exercise: u64, correct: bool, attempts: u32) -> CompletionRecord {
        CompletionRecord {
            key: CompletionKey::new(PackageId::new(1), ExerciseId::new(exercise), UserId::new(7)),
            correct,
            attempts,
            completed_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn mark_complete_is_idempotent() {
        let repo = InMemoryRepository::new();
        let rec = record(3, true, 1);
        repo.mark_complete(&rec).await.unwrap();
        repo.mark_complete(&rec).await.unwrap();

        let stored = repo.get_completion(rec.key).await.unwrap();
        assert_eq!(stored, Some(rec));
    }

    #[tokio::test]
    async fn correct_completion_is_not_downgraded() {
        let repo = InMemoryRepository::new();
        repo.mark_complete(&record(3, true, 1)).await.unwrap();
        repo.mark_complete(&record(3, false, 2)).await.unwrap();

        let stored = repo.get_completion(record(3, true, 1).key).await.unwrap().unwrap();
        assert!(stored.correct);
        assert_eq!(stored.attempts, 2);
    }

    #[tokio::test]
    async fn lists_by_package_and_user() {
        let repo = InMemoryRepository::new();
        repo.mark_complete(&record(5, true, 1)).await.unwrap();
        repo.mark_complete(&record(2, false, 1)).await.unwrap();
        let mut other_user = record(4, true, 1);
        other_user.key.user_id = UserId::new(8);
        repo.mark_complete(&other_user).await.unwrap();

        let listed = repo
            .list_completions(PackageId::new(1), UserId::new(7))
            .await
            .unwrap();
        let exercises: Vec<u64> = listed.iter().map(|r| r.key.exercise_id.value()).collect();
        assert_eq!(exercises, vec![2, 5]);
    }
}
