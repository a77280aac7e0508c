use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::course::Course;
use crate::storage::db::DbConnection;
use crate::storage::traits::CourseStorage;

/// SQLite-backed course repository
#[derive(Clone)]
pub struct CourseRepository {
    db: DbConnection,
}

impl CourseRepository {
    /// Create a new course repository
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn course_from_row(row: &SqliteRow) -> Result<Course> {
        let created_at: String = row.get("created_at");
        Ok(Course {
            id: row.get("id"),
            name: row.get("name"),
            required_attendance: row.get("required_attendance"),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .context("Failed to parse course created_at")?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl CourseStorage for CourseRepository {
    async fn store_course(&self, name: &str, required_attendance: f64) -> Result<Course> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO courses (name, required_attendance, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(required_attendance)
        .bind(created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let course = Course {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            required_attendance,
            created_at,
        };
        info!("Stored course '{}' with id {}", course.name, course.id);
        Ok(course)
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, required_attendance, created_at
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(course_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::course_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, required_attendance, created_at
            FROM courses
            ORDER BY name
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::course_from_row).collect()
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(course_id)
            .execute(self.db.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted course {}", course_id);
        } else {
            warn!("Attempted to delete a non-existent course: {}", course_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_repo() -> CourseRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        CourseRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_course() {
        let repo = setup_test_repo().await;

        let course = repo.store_course("Mathematics", 75.0).await.expect("Failed to store course");
        assert!(course.id > 0);

        let retrieved = repo.get_course(course.id).await.expect("Failed to get course");
        assert_eq!(retrieved, Some(course));
    }

    #[tokio::test]
    async fn test_get_nonexistent_course() {
        let repo = setup_test_repo().await;
        let result = repo.get_course(12345).await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_courses_ordered_by_name() {
        let repo = setup_test_repo().await;

        repo.store_course("Physics", 75.0).await.expect("Failed to store course");
        repo.store_course("Algorithms", 80.0).await.expect("Failed to store course");

        let courses = repo.list_courses().await.expect("Failed to list courses");
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "Algorithms");
        assert_eq!(courses[1].name, "Physics");
    }

    #[tokio::test]
    async fn test_delete_course() {
        let repo = setup_test_repo().await;

        let course = repo.store_course("Chemistry", 70.0).await.expect("Failed to store course");

        assert!(repo.delete_course(course.id).await.expect("Failed to delete course"));
        assert!(repo.get_course(course.id).await.expect("Query failed").is_none());

        // Deleting again reports not found
        assert!(!repo.delete_course(course.id).await.expect("Failed to re-delete course"));
    }
}
