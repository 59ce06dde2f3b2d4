use exercise_core::model::{CompletionKey, PackageId, UserId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, key_to_i64s, map_completion_row};
use crate::repository::{CompletionRecord, CompletionRepository, StorageError};

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn mark_complete(&self, record: &CompletionRecord) -> Result<(), StorageError> {
        let (package_id, exercise_id, user_id) = key_to_i64s(record.key)?;

        sqlx::query(
            r"
            INSERT INTO completions (package_id, exercise_id, user_id, correct, attempts, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(package_id, exercise_id, user_id) DO UPDATE SET
                correct = MAX(completions.correct, excluded.correct),
                attempts = MAX(completions.attempts, excluded.attempts),
                completed_at = excluded.completed_at
            ",
        )
        .bind(package_id)
        .bind(exercise_id)
        .bind(user_id)
        .bind(i64::from(record.correct))
        .bind(i64::from(record.attempts))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_completion(
        &self,
        key: CompletionKey,
    ) -> Result<Option<CompletionRecord>, StorageError> {
        let (package_id, exercise_id, user_id) = key_to_i64s(key)?;

        let row = sqlx::query(
            r"
            SELECT package_id, exercise_id, user_id, correct, attempts, completed_at
            FROM completions
            WHERE package_id = ?1 AND exercise_id = ?2 AND user_id = ?3
            ",
        )
        .bind(package_id)
        .bind(exercise_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_completion_row).transpose()
    }

    async fn list_completions(
        &self,
        package_id: PackageId,
        user_id: UserId,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT package_id, exercise_id, user_id, correct, attempts, completed_at
            FROM completions
            WHERE package_id = ?1 AND user_id = ?2
            ORDER BY exercise_id ASC
            ",
        )
        .bind(id_to_i64("package_id", package_id.value())?)
        .bind(id_to_i64("user_id", user_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_completion_row).collect()
    }
}
