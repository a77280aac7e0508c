pub mod attendance_repository;
pub mod course_repository;
pub mod schedule_repository;

pub use attendance_repository::AttendanceRepository;
pub use course_repository::CourseRepository;
pub use schedule_repository::ScheduleRepository;
