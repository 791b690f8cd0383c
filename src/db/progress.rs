//! Lesson progress database repository
//!
//! The dashboard API only reads progress; writes come from the host
//! application's event pipeline (and from test fixtures).

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Per-lesson completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::NotStarted => "not_started",
            ProgressState::InProgress => "in_progress",
            ProgressState::Completed => "completed",
        }
    }
}

impl From<&str> for ProgressState {
    fn from(s: &str) -> Self {
        match s {
            "in_progress" => ProgressState::InProgress,
            "completed" => ProgressState::Completed,
            _ => ProgressState::NotStarted,
        }
    }
}

/// Progress record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressRecord {
    pub user_id: String,
    pub course_slug: String,
    pub unit_id: String,
    pub lesson_id: String,
    pub state: String,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn progress_state(&self) -> ProgressState {
        ProgressState::from(self.state.as_str())
    }
}

/// Input for creating/updating a progress row
#[derive(Debug, Clone)]
pub struct UpsertProgress {
    pub user_id: String,
    pub course_slug: String,
    pub unit_id: String,
    pub lesson_id: String,
    pub state: ProgressState,
}

pub struct ProgressRepository {
    pool: SqlitePool,
}

impl ProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All progress rows for one viewer in one course
    pub async fn for_course(&self, user_id: &str, course_slug: &str) -> Result<Vec<ProgressRecord>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT user_id, course_slug, unit_id, lesson_id, state, updated_at
            FROM lesson_progress
            WHERE user_id = ? AND course_slug = ?
            "#,
        )
        .bind(user_id)
        .bind(course_slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Progress for a single lesson, if any has been recorded
    pub async fn get(
        &self,
        user_id: &str,
        course_slug: &str,
        unit_id: &str,
        lesson_id: &str,
    ) -> Result<Option<ProgressRecord>> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT user_id, course_slug, unit_id, lesson_id, state, updated_at
            FROM lesson_progress
            WHERE user_id = ? AND course_slug = ? AND unit_id = ? AND lesson_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_slug)
        .bind(unit_id)
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create or update a progress row (upsert by primary key)
    pub async fn upsert(&self, input: UpsertProgress) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO lesson_progress (user_id, course_slug, unit_id, lesson_id, state, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id, course_slug, unit_id, lesson_id)
            DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at
            "#,
        )
        .bind(&input.user_id)
        .bind(&input.course_slug)
        .bind(&input.unit_id)
        .bind(&input.lesson_id)
        .bind(input.state.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn upsert_then_read_back() {
        let db = test_db().await;
        let repo = db.progress();

        repo.upsert(UpsertProgress {
            user_id: "u-1".into(),
            course_slug: "intro".into(),
            unit_id: "unit-1".into(),
            lesson_id: "lesson-1".into(),
            state: ProgressState::InProgress,
        })
        .await
        .unwrap();

        let record = repo
            .get("u-1", "intro", "unit-1", "lesson-1")
            .await
            .unwrap()
            .expect("row should exist");
        assert_eq!(record.progress_state(), ProgressState::InProgress);

        // Second upsert overwrites the state
        repo.upsert(UpsertProgress {
            user_id: "u-1".into(),
            course_slug: "intro".into(),
            unit_id: "unit-1".into(),
            lesson_id: "lesson-1".into(),
            state: ProgressState::Completed,
        })
        .await
        .unwrap();

        let rows = repo.for_course("u-1", "intro").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].progress_state(), ProgressState::Completed);
    }

    #[tokio::test]
    async fn missing_rows_are_absent() {
        let db = test_db().await;
        let repo = db.progress();
        assert!(repo.get("u-1", "intro", "u", "l").await.unwrap().is_none());
        assert!(repo.for_course("u-1", "intro").await.unwrap().is_empty());
    }

    #[test]
    fn unknown_state_falls_back_to_not_started() {
        assert_eq!(ProgressState::from("garbage"), ProgressState::NotStarted);
        assert_eq!(ProgressState::from("completed"), ProgressState::Completed);
    }
}
