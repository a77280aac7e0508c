use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Status of a single class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassStatus {
    /// Not yet marked by the user
    Unset,
    /// Attended
    Present,
    /// Missed
    Absent,
    /// Class did not happen
    Cancelled,
}

/// How occurrences still in `Unset` state count toward the attendance
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsetClassesPolicy {
    /// Count unset classes as attended
    ConsiderPresent,
    /// Count unset classes as missed
    ConsiderAbsent,
    /// Leave unset classes out of the percentage entirely
    Ignore,
}

/// Whether an occurrence came from the weekly schedule or was added ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Regular,
    Extra,
}

/// App-wide theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeConfig {
    FollowSystem,
    Light,
    Dark,
}

/// Flavor of the dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkThemeVariant {
    Tinted,
    PureBlack,
}

/// Which tab the app opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeTab {
    Today,
    Overall,
}

/// One weekly schedule slot definition, as supplied when creating a course
/// or adding a slot to an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlotSpec {
    /// Day of week, e.g. "Monday" (3-letter abbreviations also accepted)
    pub weekday: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A stored weekly schedule slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: i64,
    pub course_id: i64,
    pub weekday: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    /// Required attendance percentage threshold (0-100)
    pub required_attendance: f64,
    /// Weekly schedule; may be empty
    pub slots: Vec<ScheduleSlotSpec>,
}

/// A course together with its live attendance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOverview {
    pub id: i64,
    pub name: String,
    pub required_attendance: f64,
    /// Percentage under the currently configured unset-classes policy
    pub attendance_percentage: f64,
    pub presents: u32,
    pub absents: u32,
    pub cancels: u32,
    pub unsets: u32,
    pub slots: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseOverview>,
}

/// One concrete dated class occurrence and its recorded status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub course_id: i64,
    /// Slot the occurrence was generated from; `None` for extra classes or
    /// when the slot has since been deleted
    pub schedule_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: ClassKind,
    pub status: ClassStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// Mark (or re-mark) the occurrence of a schedule slot on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub schedule_id: i64,
    pub date: NaiveDate,
    pub status: ClassStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecordStatusRequest {
    pub status: ClassStatus,
}

/// Date, start and end time for a new one-off extra class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExtraClassRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Initial status; defaults to `Unset`
    pub status: Option<ClassStatus>,
}

/// Pre-filled timings offered for a new extra class: the next full hour,
/// one hour long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraClassDefaultsResponse {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Resolves a schedule slot to a concrete date in a given week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDateResponse {
    pub schedule_id: i64,
    /// Weeks since the Unix epoch week
    pub week_offset: i64,
    pub date: NaiveDate,
    pub weekday: String,
}

/// One class shown on the today view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayClass {
    pub course_id: i64,
    pub course_name: String,
    pub schedule_id: Option<i64>,
    /// Present once the class has been marked
    pub record_id: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: ClassKind,
    pub status: ClassStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub weekday: String,
    pub classes: Vec<TodayClass>,
}

/// All persisted application preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: ThemeConfig,
    pub dark_theme_variant: DarkThemeVariant,
    pub follow_system_colors: bool,
    /// Seed color for the generated color scheme, as 0xAARRGGBB
    pub color_scheme_seed: u32,
    pub unset_classes_policy: UnsetClassesPolicy,
    /// strftime pattern used to render dates
    pub date_format: String,
    /// strftime pattern used to render times
    pub time_format: String,
    pub default_home_tab: HomeTab,
}

/// Partial preference update; only the provided fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub theme: Option<ThemeConfig>,
    pub dark_theme_variant: Option<DarkThemeVariant>,
    pub follow_system_colors: Option<bool>,
    pub color_scheme_seed: Option<u32>,
    pub unset_classes_policy: Option<UnsetClassesPolicy>,
    pub date_format: Option<String>,
    pub time_format: Option<String>,
    pub default_home_tab: Option<HomeTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCourseResponse {
    pub filename: String,
    pub csv_content: String,
    pub record_count: usize,
}

/// Generic success envelope for delete-style operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success_message: String,
}
