use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use std::collections::HashMap;

use crate::domain::commands::attendance::{
    CreateExtraClassCommand, CreateExtraClassResult, ListRecordsResult, MarkScheduleClassCommand,
    MarkScheduleClassResult, ScheduleDateCommand, ScheduleDateResult, SetRecordStatusCommand,
    SetRecordStatusResult, TodayClassItem, TodayResult,
};
use crate::domain::models::attendance::{AttendanceRecord, ClassKind, ClassStatus};
use crate::domain::week;
use crate::storage::traits::{AttendanceStorage, CourseStorage, ScheduleStorage};
use crate::storage::{AttendanceRepository, CourseRepository, DbConnection, ScheduleRepository};

/// Service for marking attendance, creating extra classes, and building the
/// dated views over occurrence records
#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    schedule_repository: ScheduleRepository,
    course_repository: CourseRepository,
}

impl AttendanceService {
    /// Create a new AttendanceService
    pub fn new(db: DbConnection) -> Self {
        Self {
            attendance_repository: AttendanceRepository::new(db.clone()),
            schedule_repository: ScheduleRepository::new(db.clone()),
            course_repository: CourseRepository::new(db),
        }
    }

    /// Mark (or re-mark) the occurrence of a schedule slot on a date.
    /// Marking the same (slot, date) twice keeps a single record with the
    /// latest status.
    pub async fn mark_schedule_class(
        &self,
        command: MarkScheduleClassCommand,
    ) -> Result<MarkScheduleClassResult> {
        info!(
            "Marking slot {} on {} as {}",
            command.schedule_id, command.date, command.status
        );

        let slot = self
            .schedule_repository
            .get_slot(command.schedule_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Schedule slot not found: {}", command.schedule_id))?;

        if command.date.weekday() != slot.weekday {
            return Err(anyhow::anyhow!(
                "Date {} is a {}, but the slot is on {}",
                command.date,
                command.date.weekday(),
                slot.weekday
            ));
        }

        let record = match self
            .attendance_repository
            .get_record_for_slot_date(slot.id, command.date)
            .await?
        {
            Some(existing) => {
                self.attendance_repository
                    .update_record_status(existing.id, command.status)
                    .await?;
                AttendanceRecord {
                    status: command.status,
                    ..existing
                }
            }
            None => {
                self.attendance_repository
                    .store_record(
                        slot.course_id,
                        Some(slot.id),
                        command.date,
                        slot.start_time,
                        slot.end_time,
                        ClassKind::Regular,
                        command.status,
                    )
                    .await?
            }
        };

        Ok(MarkScheduleClassResult { record })
    }

    /// Update the status of any existing occurrence record
    pub async fn set_record_status(
        &self,
        command: SetRecordStatusCommand,
    ) -> Result<SetRecordStatusResult> {
        info!("Setting record {} to {}", command.record_id, command.status);

        let record = self
            .attendance_repository
            .get_record(command.record_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Attendance record not found: {}", command.record_id))?;

        self.attendance_repository
            .update_record_status(record.id, command.status)
            .await?;

        Ok(SetRecordStatusResult {
            record: AttendanceRecord {
                status: command.status,
                ..record
            },
        })
    }

    /// Create a one-off extra class outside the weekly pattern.
    /// An invalid time range is rejected before anything is stored.
    pub async fn create_extra_class(
        &self,
        command: CreateExtraClassCommand,
    ) -> Result<CreateExtraClassResult> {
        info!(
            "Creating extra class for course {} on {} {}-{}",
            command.course_id,
            command.timings.date,
            command.timings.start_time,
            command.timings.end_time
        );

        self.course_repository
            .get_course(command.course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", command.course_id))?;

        if !command.timings.is_valid() {
            return Err(anyhow::anyhow!("End time should be after start time"));
        }

        let record = self
            .attendance_repository
            .store_record(
                command.course_id,
                None,
                command.timings.date,
                command.timings.start_time,
                command.timings.end_time,
                ClassKind::Extra,
                command.status.unwrap_or(ClassStatus::Unset),
            )
            .await?;

        Ok(CreateExtraClassResult { record })
    }

    /// Full dated history of a course, newest first
    pub async fn list_course_records(&self, course_id: i64) -> Result<ListRecordsResult> {
        info!("Listing records for course {}", course_id);

        self.course_repository
            .get_course(course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", course_id))?;

        let records = self
            .attendance_repository
            .list_records_for_course(course_id)
            .await?;

        info!("Found {} records for course {}", records.len(), course_id);

        Ok(ListRecordsResult { records })
    }

    /// Resolve a schedule slot to the concrete date of its weekday in a
    /// given week (weeks counted from the epoch week)
    pub async fn schedule_date(&self, command: ScheduleDateCommand) -> Result<ScheduleDateResult> {
        let slot = self
            .schedule_repository
            .get_slot(command.schedule_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Schedule slot not found: {}", command.schedule_id))?;

        let date = week::date_in_week(slot.weekday, command.week_offset);

        Ok(ScheduleDateResult {
            schedule_id: slot.id,
            week_offset: command.week_offset,
            date,
            weekday: slot.weekday,
        })
    }

    /// Every class on the given date: the weekly slots falling on its
    /// weekday (with their recorded status, `Unset` when unmarked) plus any
    /// standalone occurrences recorded for that date
    pub async fn classes_on_date(&self, date: NaiveDate) -> Result<TodayResult> {
        info!("Building class list for {}", date);

        let slots = self
            .schedule_repository
            .list_slots_on_weekday(date.weekday())
            .await?;
        let records = self.attendance_repository.list_records_on_date(date).await?;
        let course_names: HashMap<i64, String> = self
            .course_repository
            .list_courses()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut classes = Vec::new();
        let mut consumed = vec![false; records.len()];

        for slot in &slots {
            let course_name = match course_names.get(&slot.course_id) {
                Some(name) => name.clone(),
                None => {
                    warn!("Slot {} references missing course {}", slot.id, slot.course_id);
                    continue;
                }
            };
            let recorded = records
                .iter()
                .position(|r| r.schedule_id == Some(slot.id));
            if let Some(idx) = recorded {
                consumed[idx] = true;
            }
            let record = recorded.map(|idx| &records[idx]);
            classes.push(TodayClassItem {
                course_id: slot.course_id,
                course_name,
                schedule_id: Some(slot.id),
                record_id: record.map(|r| r.id),
                start_time: slot.start_time,
                end_time: slot.end_time,
                kind: ClassKind::Regular,
                status: record.map(|r| r.status).unwrap_or(ClassStatus::Unset),
            });
        }

        // Extra classes and records orphaned by slot deletion
        for (idx, record) in records.iter().enumerate() {
            if consumed[idx] || record.schedule_id.is_some() {
                continue;
            }
            let course_name = match course_names.get(&record.course_id) {
                Some(name) => name.clone(),
                None => continue,
            };
            classes.push(TodayClassItem {
                course_id: record.course_id,
                course_name,
                schedule_id: None,
                record_id: Some(record.id),
                start_time: record.start_time,
                end_time: record.end_time,
                kind: record.kind,
                status: record.status,
            });
        }

        classes.sort_by_key(|c| c.start_time);

        Ok(TodayResult {
            date,
            weekday: date.weekday(),
            classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::courses::{CreateCourseCommand, NewScheduleSlot};
    use crate::domain::course_service::CourseService;
    use crate::domain::models::attendance::ExtraClassTimings;
    use chrono::{NaiveTime, Weekday};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup_test() -> (AttendanceService, CourseService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        (AttendanceService::new(db.clone()), CourseService::new(db))
    }

    async fn create_course_with_slot(
        courses: &CourseService,
        weekday: Weekday,
    ) -> (i64, i64) {
        let created = courses
            .create_course(CreateCourseCommand {
                name: "Maths".to_string(),
                required_attendance: 75.0,
                slots: vec![NewScheduleSlot {
                    weekday,
                    start_time: time(9, 0),
                    end_time: time(10, 0),
                }],
            })
            .await
            .unwrap();
        (created.course.id, created.slots[0].id)
    }

    #[tokio::test]
    async fn test_mark_schedule_class_creates_then_updates() {
        let (service, courses) = setup_test().await;
        let (course_id, slot_id) = create_course_with_slot(&courses, Weekday::Mon).await;
        let monday = date(2024, 1, 8);

        let first = service
            .mark_schedule_class(MarkScheduleClassCommand {
                schedule_id: slot_id,
                date: monday,
                status: ClassStatus::Present,
            })
            .await
            .unwrap();
        assert_eq!(first.record.status, ClassStatus::Present);
        assert_eq!(first.record.course_id, course_id);

        // Re-marking the same occurrence keeps one record, latest status wins
        let second = service
            .mark_schedule_class(MarkScheduleClassCommand {
                schedule_id: slot_id,
                date: monday,
                status: ClassStatus::Absent,
            })
            .await
            .unwrap();
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.status, ClassStatus::Absent);

        let records = service.list_course_records(course_id).await.unwrap();
        assert_eq!(records.records.len(), 1);
        assert_eq!(records.records[0].status, ClassStatus::Absent);
    }

    #[tokio::test]
    async fn test_mark_schedule_class_rejects_weekday_mismatch() {
        let (service, courses) = setup_test().await;
        let (_, slot_id) = create_course_with_slot(&courses, Weekday::Mon).await;

        // 2024-01-09 is a Tuesday
        let result = service
            .mark_schedule_class(MarkScheduleClassCommand {
                schedule_id: slot_id,
                date: date(2024, 1, 9),
                status: ClassStatus::Present,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mark_for_past_week_via_schedule_date() {
        let (service, courses) = setup_test().await;
        let (course_id, slot_id) = create_course_with_slot(&courses, Weekday::Wed).await;

        let resolved = service
            .schedule_date(ScheduleDateCommand {
                schedule_id: slot_id,
                week_offset: 2820,
            })
            .await
            .unwrap();
        assert_eq!(resolved.weekday, Weekday::Wed);
        assert_eq!(resolved.date.weekday(), Weekday::Wed);

        service
            .mark_schedule_class(MarkScheduleClassCommand {
                schedule_id: slot_id,
                date: resolved.date,
                status: ClassStatus::Cancelled,
            })
            .await
            .unwrap();

        let records = service.list_course_records(course_id).await.unwrap();
        assert_eq!(records.records.len(), 1);
        assert_eq!(records.records[0].date, resolved.date);
    }

    #[tokio::test]
    async fn test_create_extra_class() {
        let (service, courses) = setup_test().await;
        let (course_id, _) = create_course_with_slot(&courses, Weekday::Mon).await;

        let result = service
            .create_extra_class(CreateExtraClassCommand {
                course_id,
                timings: ExtraClassTimings {
                    date: date(2024, 1, 10),
                    start_time: time(14, 0),
                    end_time: time(15, 0),
                },
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(result.record.kind, ClassKind::Extra);
        assert_eq!(result.record.schedule_id, None);
        assert_eq!(result.record.status, ClassStatus::Unset);
    }

    #[tokio::test]
    async fn test_create_extra_class_rejects_bad_range_without_state_change() {
        let (service, courses) = setup_test().await;
        let (course_id, _) = create_course_with_slot(&courses, Weekday::Mon).await;

        for end in [time(13, 0), time(14, 0)] {
            let result = service
                .create_extra_class(CreateExtraClassCommand {
                    course_id,
                    timings: ExtraClassTimings {
                        date: date(2024, 1, 10),
                        start_time: time(14, 0),
                        end_time: end,
                    },
                    status: None,
                })
                .await;
            assert!(result.is_err());
        }

        // Nothing was stored
        let records = service.list_course_records(course_id).await.unwrap();
        assert!(records.records.is_empty());
    }

    #[tokio::test]
    async fn test_set_record_status() {
        let (service, courses) = setup_test().await;
        let (course_id, _) = create_course_with_slot(&courses, Weekday::Mon).await;

        let created = service
            .create_extra_class(CreateExtraClassCommand {
                course_id,
                timings: ExtraClassTimings {
                    date: date(2024, 1, 10),
                    start_time: time(14, 0),
                    end_time: time(15, 0),
                },
                status: None,
            })
            .await
            .unwrap();

        let updated = service
            .set_record_status(SetRecordStatusCommand {
                record_id: created.record.id,
                status: ClassStatus::Present,
            })
            .await
            .unwrap();
        assert_eq!(updated.record.status, ClassStatus::Present);

        assert!(service
            .set_record_status(SetRecordStatusCommand {
                record_id: 99999,
                status: ClassStatus::Present,
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_classes_on_date_merges_slots_and_extras() {
        let (service, courses) = setup_test().await;
        let (course_id, slot_id) = create_course_with_slot(&courses, Weekday::Mon).await;
        let monday = date(2024, 1, 8);

        // An extra class earlier the same day
        service
            .create_extra_class(CreateExtraClassCommand {
                course_id,
                timings: ExtraClassTimings {
                    date: monday,
                    start_time: time(7, 0),
                    end_time: time(8, 0),
                },
                status: None,
            })
            .await
            .unwrap();

        let unmarked = service.classes_on_date(monday).await.unwrap();
        assert_eq!(unmarked.weekday, Weekday::Mon);
        assert_eq!(unmarked.classes.len(), 2);
        // Sorted by start time: extra first
        assert_eq!(unmarked.classes[0].kind, ClassKind::Extra);
        assert_eq!(unmarked.classes[1].schedule_id, Some(slot_id));
        assert_eq!(unmarked.classes[1].record_id, None);
        assert_eq!(unmarked.classes[1].status, ClassStatus::Unset);

        // Marking the scheduled class surfaces its record and status
        service
            .mark_schedule_class(MarkScheduleClassCommand {
                schedule_id: slot_id,
                date: monday,
                status: ClassStatus::Present,
            })
            .await
            .unwrap();

        let marked = service.classes_on_date(monday).await.unwrap();
        assert_eq!(marked.classes.len(), 2);
        assert!(marked.classes[1].record_id.is_some());
        assert_eq!(marked.classes[1].status, ClassStatus::Present);

        // A different weekday shows nothing
        let tuesday = service.classes_on_date(date(2024, 1, 9)).await.unwrap();
        assert!(tuesday.classes.is_empty());
    }
}
