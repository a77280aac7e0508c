use anyhow::Result;
use log::{info, warn};

use crate::domain::commands::courses::{
    AddScheduleSlotCommand, AddScheduleSlotResult, CourseWithStats, CreateCourseCommand,
    CreateCourseResult, DeleteCourseResult, DeleteScheduleSlotResult, GetCourseResult,
    ListCoursesResult, NewScheduleSlot,
};
use crate::domain::models::course::Course;
use crate::domain::models::preferences::UnsetClassesPolicy;
use crate::domain::statistics::AttendanceStats;
use crate::storage::traits::{AttendanceStorage, CourseStorage, ScheduleStorage};
use crate::storage::{AttendanceRepository, CourseRepository, DbConnection, ScheduleRepository};

/// Service for managing courses and their weekly schedules
#[derive(Clone)]
pub struct CourseService {
    course_repository: CourseRepository,
    schedule_repository: ScheduleRepository,
    attendance_repository: AttendanceRepository,
}

impl CourseService {
    /// Create a new CourseService
    pub fn new(db: DbConnection) -> Self {
        Self {
            course_repository: CourseRepository::new(db.clone()),
            schedule_repository: ScheduleRepository::new(db.clone()),
            attendance_repository: AttendanceRepository::new(db),
        }
    }

    /// Create a new course together with its weekly schedule
    pub async fn create_course(&self, command: CreateCourseCommand) -> Result<CreateCourseResult> {
        info!(
            "Creating course: name={}, required_attendance={}, slots={}",
            command.name,
            command.required_attendance,
            command.slots.len()
        );

        self.validate_create_command(&command)?;

        let course = self
            .course_repository
            .store_course(command.name.trim(), command.required_attendance)
            .await?;

        let mut slots = Vec::with_capacity(command.slots.len());
        for slot in &command.slots {
            let stored = self
                .schedule_repository
                .store_slot(course.id, slot.weekday, slot.start_time, slot.end_time)
                .await?;
            slots.push(stored);
        }

        info!("Created course '{}' with id {}", course.name, course.id);

        Ok(CreateCourseResult { course, slots })
    }

    /// Get a course with its slots and live statistics
    pub async fn get_course(
        &self,
        course_id: i64,
        policy: UnsetClassesPolicy,
    ) -> Result<GetCourseResult> {
        info!("Getting course: {}", course_id);

        let course = match self.course_repository.get_course(course_id).await? {
            Some(course) => course,
            None => {
                warn!("Course not found: {}", course_id);
                return Ok(GetCourseResult { course: None });
            }
        };

        let with_stats = self.with_stats(course, policy).await?;
        Ok(GetCourseResult {
            course: Some(with_stats),
        })
    }

    /// List all courses with their live statistics
    pub async fn list_courses(&self, policy: UnsetClassesPolicy) -> Result<ListCoursesResult> {
        info!("Listing all courses");

        let courses = self.course_repository.list_courses().await?;
        let mut with_stats = Vec::with_capacity(courses.len());
        for course in courses {
            with_stats.push(self.with_stats(course, policy).await?);
        }

        info!("Found {} courses", with_stats.len());

        Ok(ListCoursesResult {
            courses: with_stats,
        })
    }

    /// Delete a course; its slots and records go with it
    pub async fn delete_course(&self, course_id: i64) -> Result<DeleteCourseResult> {
        info!("Deleting course: {}", course_id);

        let course = self
            .course_repository
            .get_course(course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", course_id))?;

        self.course_repository.delete_course(course_id).await?;

        info!("Deleted course '{}' with id {}", course.name, course.id);

        Ok(DeleteCourseResult {
            success_message: format!("Course '{}' deleted successfully", course.name),
        })
    }

    /// Add a weekly slot to an existing course
    pub async fn add_schedule_slot(
        &self,
        command: AddScheduleSlotCommand,
    ) -> Result<AddScheduleSlotResult> {
        info!(
            "Adding slot to course {}: {:?} {}-{}",
            command.course_id, command.slot.weekday, command.slot.start_time, command.slot.end_time
        );

        self.course_repository
            .get_course(command.course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", command.course_id))?;

        Self::validate_slot(&command.slot)?;

        let slot = self
            .schedule_repository
            .store_slot(
                command.course_id,
                command.slot.weekday,
                command.slot.start_time,
                command.slot.end_time,
            )
            .await?;

        Ok(AddScheduleSlotResult { slot })
    }

    /// Delete a weekly slot. Attendance already recorded from the slot is
    /// kept in the course's history.
    pub async fn delete_schedule_slot(&self, slot_id: i64) -> Result<DeleteScheduleSlotResult> {
        info!("Deleting slot: {}", slot_id);

        let deleted = self.schedule_repository.delete_slot(slot_id).await?;
        if !deleted {
            return Err(anyhow::anyhow!("Schedule slot not found: {}", slot_id));
        }

        Ok(DeleteScheduleSlotResult {
            success_message: "Schedule slot deleted; recorded classes were kept".to_string(),
        })
    }

    async fn with_stats(
        &self,
        course: Course,
        policy: UnsetClassesPolicy,
    ) -> Result<CourseWithStats> {
        let slots = self
            .schedule_repository
            .list_slots_for_course(course.id)
            .await?;
        let statuses = self
            .attendance_repository
            .list_statuses_for_course(course.id)
            .await?;
        let stats = AttendanceStats::tally(statuses);
        let attendance_percentage = stats.percentage(policy);

        Ok(CourseWithStats {
            course,
            slots,
            stats,
            attendance_percentage,
        })
    }

    /// Validate a create course command
    fn validate_create_command(&self, command: &CreateCourseCommand) -> Result<()> {
        if command.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Course name cannot be empty"));
        }

        if command.name.len() > 100 {
            return Err(anyhow::anyhow!("Course name cannot exceed 100 characters"));
        }

        if !(0.0..=100.0).contains(&command.required_attendance) {
            return Err(anyhow::anyhow!(
                "Required attendance must be between 0 and 100"
            ));
        }

        for slot in &command.slots {
            Self::validate_slot(slot)?;
        }

        Ok(())
    }

    /// Validate a slot's time range
    fn validate_slot(slot: &NewScheduleSlot) -> Result<()> {
        if slot.end_time <= slot.start_time {
            return Err(anyhow::anyhow!("End time must be after start time"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> NewScheduleSlot {
        NewScheduleSlot {
            weekday,
            start_time: start,
            end_time: end,
        }
    }

    async fn setup_test() -> CourseService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        CourseService::new(db)
    }

    #[tokio::test]
    async fn test_create_course_with_slots() {
        let service = setup_test().await;

        let result = service
            .create_course(CreateCourseCommand {
                name: "  Mathematics ".to_string(),
                required_attendance: 75.0,
                slots: vec![
                    slot(Weekday::Mon, time(9, 0), time(10, 0)),
                    slot(Weekday::Wed, time(9, 0), time(10, 0)),
                ],
            })
            .await
            .unwrap();

        assert_eq!(result.course.name, "Mathematics");
        assert_eq!(result.course.required_attendance, 75.0);
        assert_eq!(result.slots.len(), 2);
        assert!(result.slots.iter().all(|s| s.course_id == result.course.id));
    }

    #[tokio::test]
    async fn test_create_course_validation() {
        let service = setup_test().await;

        let cmd_empty_name = CreateCourseCommand {
            name: " ".to_string(),
            required_attendance: 75.0,
            slots: vec![],
        };
        assert!(service.create_course(cmd_empty_name).await.is_err());

        let cmd_long_name = CreateCourseCommand {
            name: "a".repeat(101),
            required_attendance: 75.0,
            slots: vec![],
        };
        assert!(service.create_course(cmd_long_name).await.is_err());

        let cmd_bad_threshold = CreateCourseCommand {
            name: "Maths".to_string(),
            required_attendance: 120.0,
            slots: vec![],
        };
        assert!(service.create_course(cmd_bad_threshold).await.is_err());

        let cmd_bad_slot = CreateCourseCommand {
            name: "Maths".to_string(),
            required_attendance: 75.0,
            slots: vec![slot(Weekday::Mon, time(10, 0), time(9, 0))],
        };
        assert!(service.create_course(cmd_bad_slot).await.is_err());
    }

    #[tokio::test]
    async fn test_get_course_with_fresh_stats() {
        let service = setup_test().await;
        let created = service
            .create_course(CreateCourseCommand {
                name: "Maths".to_string(),
                required_attendance: 75.0,
                slots: vec![slot(Weekday::Mon, time(9, 0), time(10, 0))],
            })
            .await
            .unwrap();

        let result = service
            .get_course(created.course.id, UnsetClassesPolicy::Ignore)
            .await
            .unwrap();
        let course = result.course.unwrap();

        assert_eq!(course.course.name, "Maths");
        assert_eq!(course.slots.len(), 1);
        assert_eq!(course.stats, AttendanceStats::default());
        // Nothing recorded yet: cannot be below the requirement
        assert_eq!(course.attendance_percentage, 100.0);
    }

    #[tokio::test]
    async fn test_get_nonexistent_course() {
        let service = setup_test().await;
        let result = service
            .get_course(999, UnsetClassesPolicy::Ignore)
            .await
            .unwrap();
        assert!(result.course.is_none());
    }

    #[tokio::test]
    async fn test_delete_course_cascades() {
        let service = setup_test().await;
        let created = service
            .create_course(CreateCourseCommand {
                name: "Maths".to_string(),
                required_attendance: 75.0,
                slots: vec![slot(Weekday::Mon, time(9, 0), time(10, 0))],
            })
            .await
            .unwrap();
        let slot_id = created.slots[0].id;

        service.delete_course(created.course.id).await.unwrap();

        let listed = service
            .list_courses(UnsetClassesPolicy::Ignore)
            .await
            .unwrap();
        assert!(listed.courses.is_empty());
        assert!(service
            .schedule_repository
            .get_slot(slot_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_course() {
        let service = setup_test().await;
        assert!(service.delete_course(999).await.is_err());
    }

    #[tokio::test]
    async fn test_add_and_delete_slot() {
        let service = setup_test().await;
        let created = service
            .create_course(CreateCourseCommand {
                name: "Maths".to_string(),
                required_attendance: 75.0,
                slots: vec![],
            })
            .await
            .unwrap();

        let added = service
            .add_schedule_slot(AddScheduleSlotCommand {
                course_id: created.course.id,
                slot: slot(Weekday::Fri, time(11, 0), time(12, 0)),
            })
            .await
            .unwrap();
        assert_eq!(added.slot.weekday, Weekday::Fri);

        service.delete_schedule_slot(added.slot.id).await.unwrap();
        assert!(service.delete_schedule_slot(added.slot.id).await.is_err());
    }

    #[tokio::test]
    async fn test_add_slot_rejects_bad_range_and_missing_course() {
        let service = setup_test().await;
        let created = service
            .create_course(CreateCourseCommand {
                name: "Maths".to_string(),
                required_attendance: 75.0,
                slots: vec![],
            })
            .await
            .unwrap();

        let bad_range = service
            .add_schedule_slot(AddScheduleSlotCommand {
                course_id: created.course.id,
                slot: slot(Weekday::Fri, time(12, 0), time(12, 0)),
            })
            .await;
        assert!(bad_range.is_err());

        let missing_course = service
            .add_schedule_slot(AddScheduleSlotCommand {
                course_id: 999,
                slot: slot(Weekday::Fri, time(11, 0), time(12, 0)),
            })
            .await;
        assert!(missing_course.is_err());
    }
}
