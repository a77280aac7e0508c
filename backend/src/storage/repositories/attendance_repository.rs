use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::attendance::{AttendanceRecord, ClassKind, ClassStatus};
use crate::storage::db::DbConnection;
use crate::storage::traits::AttendanceStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// SQLite-backed occurrence/attendance record repository
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    /// Create a new attendance repository
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn record_from_row(row: &SqliteRow) -> Result<AttendanceRecord> {
        let date: String = row.get("date");
        let start_time: String = row.get("start_time");
        let end_time: String = row.get("end_time");
        let kind: String = row.get("kind");
        let status: String = row.get("status");
        Ok(AttendanceRecord {
            id: row.get("id"),
            course_id: row.get("course_id"),
            schedule_id: row.get("schedule_id"),
            date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .context("Failed to parse record date")?,
            start_time: NaiveTime::parse_from_str(&start_time, TIME_FORMAT)
                .context("Failed to parse record start_time")?,
            end_time: NaiveTime::parse_from_str(&end_time, TIME_FORMAT)
                .context("Failed to parse record end_time")?,
            kind: kind.parse::<ClassKind>()?,
            status: status.parse::<ClassStatus>()?,
        })
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn store_record(
        &self,
        course_id: i64,
        schedule_id: Option<i64>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        kind: ClassKind,
        status: ClassStatus,
    ) -> Result<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records
                (course_id, schedule_id, date, start_time, end_time, kind, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(course_id)
        .bind(schedule_id)
        .bind(date.format(DATE_FORMAT).to_string())
        .bind(start_time.format(TIME_FORMAT).to_string())
        .bind(end_time.format(TIME_FORMAT).to_string())
        .bind(kind.as_str())
        .bind(status.as_str())
        .execute(self.db.pool())
        .await?;

        let record = AttendanceRecord {
            id: result.last_insert_rowid(),
            course_id,
            schedule_id,
            date,
            start_time,
            end_time,
            kind,
            status,
        };
        info!(
            "Stored {} record {} for course {} on {}",
            kind.as_str(),
            record.id,
            course_id,
            date
        );
        Ok(record)
    }

    async fn get_record(&self, record_id: i64) -> Result<Option<AttendanceRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, course_id, schedule_id, date, start_time, end_time, kind, status
            FROM attendance_records
            WHERE id = ?
            "#,
        )
        .bind(record_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::record_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn get_record_for_slot_date(
        &self,
        schedule_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, course_id, schedule_id, date, start_time, end_time, kind, status
            FROM attendance_records
            WHERE schedule_id = ? AND date = ?
            "#,
        )
        .bind(schedule_id)
        .bind(date.format(DATE_FORMAT).to_string())
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::record_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn update_record_status(&self, record_id: i64, status: ClassStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE attendance_records SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(record_id)
            .execute(self.db.pool())
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Record {} marked {}", record_id, status);
        } else {
            warn!("Attempted to update a non-existent record: {}", record_id);
        }
        Ok(updated)
    }

    async fn list_records_for_course(&self, course_id: i64) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, schedule_id, date, start_time, end_time, kind, status
            FROM attendance_records
            WHERE course_id = ?
            ORDER BY date DESC, start_time DESC
            "#,
        )
        .bind(course_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn list_statuses_for_course(&self, course_id: i64) -> Result<Vec<ClassStatus>> {
        let rows = sqlx::query("SELECT status FROM attendance_records WHERE course_id = ?")
            .bind(course_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter()
            .map(|row| {
                let status: String = row.get("status");
                Ok(status.parse::<ClassStatus>()?)
            })
            .collect()
    }

    async fn list_records_on_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, schedule_id, date, start_time, end_time, kind, status
            FROM attendance_records
            WHERE date = ?
            ORDER BY start_time
            "#,
        )
        .bind(date.format(DATE_FORMAT).to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::record_from_row).collect()
    }
}
