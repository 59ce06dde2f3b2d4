use exercise_core::model::{CompletionKey, ExerciseId, PackageId, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{CompletionRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

/// Key columns in bind order: package, exercise, user.
pub(crate) fn key_to_i64s(key: CompletionKey) -> Result<(i64, i64, i64), StorageError> {
    Ok((
        id_to_i64("package_id", key.package_id.value())?,
        id_to_i64("exercise_id", key.exercise_id.value())?,
        id_to_i64("user_id", key.user_id.value())?,
    ))
}

pub(crate) fn map_completion_row(row: &SqliteRow) -> Result<CompletionRecord, StorageError> {
    let key = CompletionKey::new(
        PackageId::new(i64_to_u64(
            "package_id",
            row.try_get::<i64, _>("package_id").map_err(ser)?,
        )?),
        ExerciseId::new(i64_to_u64(
            "exercise_id",
            row.try_get::<i64, _>("exercise_id").map_err(ser)?,
        )?),
        UserId::new(i64_to_u64(
            "user_id",
            row.try_get::<i64, _>("user_id").map_err(ser)?,
        )?),
    );

    let attempts_i64: i64 = row.try_get("attempts").map_err(ser)?;
    let attempts = u32::try_from(attempts_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid attempts: {attempts_i64}")))?;

    Ok(CompletionRecord {
        key,
        correct: row.try_get::<i64, _>("correct").map_err(ser)? != 0,
        attempts,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}
