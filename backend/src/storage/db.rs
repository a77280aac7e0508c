use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:attendance.db";

/// DbConnection manages the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Foreign keys are off by default in SQLite; the cascade semantics
        // of the schema depend on them
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Courses; deleting one cascades to its slots and records
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                required_attendance REAL NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Weekly schedule slots; weekday is the ISO number (Monday = 1)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedule_slots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_id INTEGER NOT NULL
                    REFERENCES courses(id) ON DELETE CASCADE,
                weekday INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Dated occurrences. schedule_id is nulled when a slot is deleted so
        // that already-recorded history stays in the course
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_id INTEGER NOT NULL
                    REFERENCES courses(id) ON DELETE CASCADE,
                schedule_id INTEGER
                    REFERENCES schedule_slots(id) ON DELETE SET NULL,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                kind TEXT NOT NULL DEFAULT 'regular',
                status TEXT NOT NULL DEFAULT 'unset'
            );
            "#,
        )
        .execute(pool)
        .await?;

        // One record per (slot, date); extra classes have a NULL schedule_id
        // and are unconstrained
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_records_slot_date
            ON attendance_records(schedule_id, date)
            WHERE schedule_id IS NOT NULL;
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_records_course_date
            ON attendance_records(course_id, date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
