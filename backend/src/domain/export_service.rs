//! Export service domain logic for the attendance tracker.
//!
//! Builds a CSV rendition of a course's full attendance history, including
//! the generated filename, so interface layers only have to hand the bytes
//! to the user.

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::domain::commands::export::ExportCourseResult;
use crate::storage::traits::{AttendanceStorage, CourseStorage};
use crate::storage::{AttendanceRepository, CourseRepository, DbConnection};

/// Service that handles CSV export of attendance history
#[derive(Clone)]
pub struct ExportService {
    course_repository: CourseRepository,
    attendance_repository: AttendanceRepository,
}

impl ExportService {
    /// Create a new ExportService
    pub fn new(db: DbConnection) -> Self {
        Self {
            course_repository: CourseRepository::new(db.clone()),
            attendance_repository: AttendanceRepository::new(db),
        }
    }

    /// Export a course's attendance history as CSV
    pub async fn export_course_csv(&self, course_id: i64) -> Result<ExportCourseResult> {
        info!("Exporting attendance history for course {}", course_id);

        let course = self
            .course_repository
            .get_course(course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", course_id))?;

        let records = self
            .attendance_repository
            .list_records_for_course(course_id)
            .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["date", "weekday", "start_time", "end_time", "kind", "status"])?;
        for record in &records {
            writer.write_record([
                record.date.format("%Y-%m-%d").to_string(),
                record.date.format("%A").to_string(),
                record.start_time.format("%H:%M").to_string(),
                record.end_time.format("%H:%M").to_string(),
                record.kind.as_str().to_string(),
                record.status.as_str().to_string(),
            ])?;
        }
        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e))?;
        let csv_content = String::from_utf8(bytes)?;

        let filename = format!(
            "attendance_{}_{}.csv",
            Self::safe_file_stem(&course.name),
            Utc::now().format("%Y%m%d")
        );

        info!(
            "Exported {} records for course '{}' as {}",
            records.len(),
            course.name,
            filename
        );

        Ok(ExportCourseResult {
            filename,
            csv_content,
            record_count: records.len(),
        })
    }

    /// Reduce a course name to a safe filename stem
    fn safe_file_stem(name: &str) -> String {
        let mut stem = String::new();
        let mut last_was_underscore = false;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
                last_was_underscore = false;
            } else if !last_was_underscore {
                stem.push('_');
                last_was_underscore = true;
            }
        }
        stem.trim_matches('_').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance_service::AttendanceService;
    use crate::domain::commands::attendance::CreateExtraClassCommand;
    use crate::domain::commands::courses::CreateCourseCommand;
    use crate::domain::course_service::CourseService;
    use crate::domain::models::attendance::{ClassStatus, ExtraClassTimings};
    use chrono::{NaiveDate, NaiveTime};

    async fn setup_test() -> (ExportService, CourseService, AttendanceService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        (
            ExportService::new(db.clone()),
            CourseService::new(db.clone()),
            AttendanceService::new(db),
        )
    }

    #[tokio::test]
    async fn test_export_course_csv() {
        let (export, courses, attendance) = setup_test().await;

        let created = courses
            .create_course(CreateCourseCommand {
                name: "Linear Algebra".to_string(),
                required_attendance: 75.0,
                slots: vec![],
            })
            .await
            .unwrap();

        attendance
            .create_extra_class(CreateExtraClassCommand {
                course_id: created.course.id,
                timings: ExtraClassTimings {
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                },
                status: Some(ClassStatus::Present),
            })
            .await
            .unwrap();

        let result = export.export_course_csv(created.course.id).await.unwrap();

        assert_eq!(result.record_count, 1);
        assert!(result.filename.starts_with("attendance_linear_algebra_"));
        assert!(result.filename.ends_with(".csv"));

        let mut lines = result.csv_content.lines();
        assert_eq!(
            lines.next(),
            Some("date,weekday,start_time,end_time,kind,status")
        );
        assert_eq!(lines.next(), Some("2024-01-10,Wednesday,14:00,15:00,extra,present"));
    }

    #[tokio::test]
    async fn test_export_missing_course() {
        let (export, _, _) = setup_test().await;
        assert!(export.export_course_csv(999).await.is_err());
    }
}
