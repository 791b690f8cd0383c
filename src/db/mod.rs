//! Database connection and operations

pub mod progress;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub use progress::{ProgressRecord, ProgressRepository, ProgressState, UpsertProgress};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool and ensure the schema exists
    pub async fn connect(url: &str) -> Result<Self> {
        // An in-memory SQLite database exists per connection; pooling more
        // than one would give each query a different empty database.
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            Self::get_max_connections()
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Access progress operations
    pub fn progress(&self) -> ProgressRepository {
        ProgressRepository::new(self.pool.clone())
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lesson_progress (
                user_id     TEXT NOT NULL,
                course_slug TEXT NOT NULL,
                unit_id     TEXT NOT NULL,
                lesson_id   TEXT NOT NULL,
                state       TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                PRIMARY KEY (user_id, course_slug, unit_id, lesson_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
