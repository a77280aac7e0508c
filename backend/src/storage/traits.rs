//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow the domain
//! layer to work against repository interfaces rather than a concrete
//! storage backend.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::domain::models::attendance::{AttendanceRecord, ClassKind, ClassStatus};
use crate::domain::models::course::Course;
use crate::domain::models::preferences::AppPreferences;
use crate::domain::models::schedule::ScheduleSlot;

/// Trait defining the interface for course storage operations
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Store a new course and return it with its assigned id
    async fn store_course(&self, name: &str, required_attendance: f64) -> Result<Course>;

    /// Retrieve a specific course by id
    async fn get_course(&self, course_id: i64) -> Result<Option<Course>>;

    /// List all courses ordered by name
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// Delete a course by id; cascades to slots and records
    /// Returns true if the course was found and deleted
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
}

/// Trait defining the interface for weekly schedule slot storage operations
#[async_trait]
pub trait ScheduleStorage: Send + Sync {
    /// Store a new slot and return it with its assigned id
    async fn store_slot(
        &self,
        course_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<ScheduleSlot>;

    /// Retrieve a specific slot by id
    async fn get_slot(&self, slot_id: i64) -> Result<Option<ScheduleSlot>>;

    /// List the slots of a course ordered by weekday then start time
    async fn list_slots_for_course(&self, course_id: i64) -> Result<Vec<ScheduleSlot>>;

    /// List every slot falling on a weekday, across all courses
    async fn list_slots_on_weekday(&self, weekday: Weekday) -> Result<Vec<ScheduleSlot>>;

    /// Delete a slot by id without touching recorded history
    /// Returns true if the slot was found and deleted
    async fn delete_slot(&self, slot_id: i64) -> Result<bool>;
}

/// Trait defining the interface for occurrence/attendance record storage
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Store a new occurrence record and return it with its assigned id
    #[allow(clippy::too_many_arguments)]
    async fn store_record(
        &self,
        course_id: i64,
        schedule_id: Option<i64>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        kind: ClassKind,
        status: ClassStatus,
    ) -> Result<AttendanceRecord>;

    /// Retrieve a specific record by id
    async fn get_record(&self, record_id: i64) -> Result<Option<AttendanceRecord>>;

    /// The regular occurrence of a slot on a date, if recorded
    async fn get_record_for_slot_date(
        &self,
        schedule_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>>;

    /// Update the status of an existing record
    /// Returns true if the record was found and updated
    async fn update_record_status(&self, record_id: i64, status: ClassStatus) -> Result<bool>;

    /// Full dated history of a course, newest first
    async fn list_records_for_course(&self, course_id: i64) -> Result<Vec<AttendanceRecord>>;

    /// Just the statuses of a course's records, for statistics
    async fn list_statuses_for_course(&self, course_id: i64) -> Result<Vec<ClassStatus>>;

    /// All records on a given date, across courses
    async fn list_records_on_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>>;
}

/// Trait defining the interface for preference storage operations
pub trait PreferenceStorage: Send + Sync {
    /// Load the preferences, creating defaults if none are stored yet
    fn load_preferences(&self) -> Result<AppPreferences>;

    /// Persist the preferences
    fn save_preferences(&self, preferences: &AppPreferences) -> Result<()>;
}
