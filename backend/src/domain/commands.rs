//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod courses {
    use crate::domain::models::course::Course;
    use crate::domain::models::schedule::ScheduleSlot;
    use crate::domain::statistics::AttendanceStats;
    use chrono::{NaiveTime, Weekday};

    /// One weekly slot as supplied on course creation or slot addition.
    #[derive(Debug, Clone, Copy)]
    pub struct NewScheduleSlot {
        pub weekday: Weekday,
        pub start_time: NaiveTime,
        pub end_time: NaiveTime,
    }

    /// Input for creating a new course with its weekly schedule.
    #[derive(Debug, Clone)]
    pub struct CreateCourseCommand {
        pub name: String,
        pub required_attendance: f64,
        pub slots: Vec<NewScheduleSlot>,
    }

    /// Result of creating a course.
    #[derive(Debug, Clone)]
    pub struct CreateCourseResult {
        pub course: Course,
        pub slots: Vec<ScheduleSlot>,
    }

    /// A course with its slots and live statistics.
    #[derive(Debug, Clone)]
    pub struct CourseWithStats {
        pub course: Course,
        pub slots: Vec<ScheduleSlot>,
        pub stats: AttendanceStats,
        /// Percentage under the unset-classes policy active at query time
        pub attendance_percentage: f64,
    }

    #[derive(Debug, Clone)]
    pub struct ListCoursesResult {
        pub courses: Vec<CourseWithStats>,
    }

    #[derive(Debug, Clone)]
    pub struct GetCourseResult {
        pub course: Option<CourseWithStats>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteCourseResult {
        pub success_message: String,
    }

    /// Input for adding a slot to an existing course.
    #[derive(Debug, Clone)]
    pub struct AddScheduleSlotCommand {
        pub course_id: i64,
        pub slot: NewScheduleSlot,
    }

    #[derive(Debug, Clone)]
    pub struct AddScheduleSlotResult {
        pub slot: ScheduleSlot,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteScheduleSlotResult {
        pub success_message: String,
    }
}

pub mod attendance {
    use crate::domain::models::attendance::{
        AttendanceRecord, ClassKind, ClassStatus, ExtraClassTimings,
    };
    use chrono::{NaiveDate, NaiveTime, Weekday};

    /// Mark (or re-mark) the occurrence of a schedule slot on a date.
    #[derive(Debug, Clone, Copy)]
    pub struct MarkScheduleClassCommand {
        pub schedule_id: i64,
        pub date: NaiveDate,
        pub status: ClassStatus,
    }

    #[derive(Debug, Clone)]
    pub struct MarkScheduleClassResult {
        pub record: AttendanceRecord,
    }

    /// Update the status of an existing occurrence record.
    #[derive(Debug, Clone, Copy)]
    pub struct SetRecordStatusCommand {
        pub record_id: i64,
        pub status: ClassStatus,
    }

    #[derive(Debug, Clone)]
    pub struct SetRecordStatusResult {
        pub record: AttendanceRecord,
    }

    /// Input for creating a one-off extra class.
    #[derive(Debug, Clone, Copy)]
    pub struct CreateExtraClassCommand {
        pub course_id: i64,
        pub timings: ExtraClassTimings,
        /// Initial status; defaults to `Unset`
        pub status: Option<ClassStatus>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateExtraClassResult {
        pub record: AttendanceRecord,
    }

    #[derive(Debug, Clone)]
    pub struct ListRecordsResult {
        pub records: Vec<AttendanceRecord>,
    }

    /// Resolve a schedule slot to a concrete date in a given week.
    #[derive(Debug, Clone, Copy)]
    pub struct ScheduleDateCommand {
        pub schedule_id: i64,
        /// Weeks since the Unix epoch week
        pub week_offset: i64,
    }

    #[derive(Debug, Clone, Copy)]
    pub struct ScheduleDateResult {
        pub schedule_id: i64,
        pub week_offset: i64,
        pub date: NaiveDate,
        pub weekday: Weekday,
    }

    /// One class on the today view.
    #[derive(Debug, Clone)]
    pub struct TodayClassItem {
        pub course_id: i64,
        pub course_name: String,
        pub schedule_id: Option<i64>,
        pub record_id: Option<i64>,
        pub start_time: NaiveTime,
        pub end_time: NaiveTime,
        pub kind: ClassKind,
        pub status: ClassStatus,
    }

    #[derive(Debug, Clone)]
    pub struct TodayResult {
        pub date: NaiveDate,
        pub weekday: Weekday,
        pub classes: Vec<TodayClassItem>,
    }
}

pub mod preferences {
    use crate::domain::models::preferences::{
        DarkThemeVariant, HomeTab, ThemeConfig, UnsetClassesPolicy,
    };

    /// Partial preference update; only the provided fields change.
    #[derive(Debug, Clone, Default)]
    pub struct UpdatePreferencesCommand {
        pub theme: Option<ThemeConfig>,
        pub dark_theme_variant: Option<DarkThemeVariant>,
        pub follow_system_colors: Option<bool>,
        pub color_scheme_seed: Option<u32>,
        pub unset_classes_policy: Option<UnsetClassesPolicy>,
        pub date_format: Option<String>,
        pub time_format: Option<String>,
        pub default_home_tab: Option<HomeTab>,
    }
}

pub mod export {
    /// Result of exporting a course's attendance history as CSV.
    #[derive(Debug, Clone)]
    pub struct ExportCourseResult {
        pub filename: String,
        pub csv_content: String,
        pub record_count: usize,
    }
}
