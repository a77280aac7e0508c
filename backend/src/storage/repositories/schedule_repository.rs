use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};
use log::{info, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::schedule::{weekday_from_number, ScheduleSlot};
use crate::storage::db::DbConnection;
use crate::storage::traits::ScheduleStorage;

const TIME_FORMAT: &str = "%H:%M";

/// SQLite-backed weekly schedule slot repository
#[derive(Clone)]
pub struct ScheduleRepository {
    db: DbConnection,
}

impl ScheduleRepository {
    /// Create a new schedule repository
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn slot_from_row(row: &SqliteRow) -> Result<ScheduleSlot> {
        let weekday_number: i64 = row.get("weekday");
        let start_time: String = row.get("start_time");
        let end_time: String = row.get("end_time");
        Ok(ScheduleSlot {
            id: row.get("id"),
            course_id: row.get("course_id"),
            weekday: weekday_from_number(weekday_number as u32)
                .ok_or_else(|| anyhow!("Invalid weekday number in database: {}", weekday_number))?,
            start_time: NaiveTime::parse_from_str(&start_time, TIME_FORMAT)
                .context("Failed to parse slot start_time")?,
            end_time: NaiveTime::parse_from_str(&end_time, TIME_FORMAT)
                .context("Failed to parse slot end_time")?,
        })
    }
}

#[async_trait]
impl ScheduleStorage for ScheduleRepository {
    async fn store_slot(
        &self,
        course_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<ScheduleSlot> {
        let result = sqlx::query(
            r#"
            INSERT INTO schedule_slots (course_id, weekday, start_time, end_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(course_id)
        .bind(weekday.number_from_monday() as i64)
        .bind(start_time.format(TIME_FORMAT).to_string())
        .bind(end_time.format(TIME_FORMAT).to_string())
        .execute(self.db.pool())
        .await?;

        let slot = ScheduleSlot {
            id: result.last_insert_rowid(),
            course_id,
            weekday,
            start_time,
            end_time,
        };
        info!(
            "Stored slot {} for course {} on {:?} {}-{}",
            slot.id, course_id, weekday, start_time, end_time
        );
        Ok(slot)
    }

    async fn get_slot(&self, slot_id: i64) -> Result<Option<ScheduleSlot>> {
        let row = sqlx::query(
            r#"
            SELECT id, course_id, weekday, start_time, end_time
            FROM schedule_slots
            WHERE id = ?
            "#,
        )
        .bind(slot_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::slot_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_slots_for_course(&self, course_id: i64) -> Result<Vec<ScheduleSlot>> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, weekday, start_time, end_time
            FROM schedule_slots
            WHERE course_id = ?
            ORDER BY weekday, start_time
            "#,
        )
        .bind(course_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::slot_from_row).collect()
    }

    async fn list_slots_on_weekday(&self, weekday: Weekday) -> Result<Vec<ScheduleSlot>> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, weekday, start_time, end_time
            FROM schedule_slots
            WHERE weekday = ?
            ORDER BY start_time
            "#,
        )
        .bind(weekday.number_from_monday() as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::slot_from_row).collect()
    }

    async fn delete_slot(&self, slot_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM schedule_slots WHERE id = ?")
            .bind(slot_id)
            .execute(self.db.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted slot {}", slot_id);
        } else {
            warn!("Attempted to delete a non-existent slot: {}", slot_id);
        }
        Ok(deleted)
    }
}
