//! Mapper between shared course DTOs and domain course models.

use anyhow::{Context, Result};
use chrono::Weekday;
use std::str::FromStr;

use crate::domain::commands::courses::{CourseWithStats, CreateCourseCommand, NewScheduleSlot};
use crate::domain::models::schedule::ScheduleSlot as DomainScheduleSlot;
use shared::{CourseOverview, CreateCourseRequest, ScheduleSlot, ScheduleSlotSpec};

/// Full weekday name for DTOs (chrono's Display is the 3-letter form)
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub struct CourseMapper;

impl CourseMapper {
    /// Converts a create request DTO to the domain command.
    pub fn to_create_command(request: CreateCourseRequest) -> Result<CreateCourseCommand> {
        let slots = request
            .slots
            .into_iter()
            .map(Self::to_new_slot)
            .collect::<Result<Vec<_>>>()?;
        Ok(CreateCourseCommand {
            name: request.name,
            required_attendance: request.required_attendance,
            slots,
        })
    }

    /// Converts a slot spec DTO to the domain slot input.
    pub fn to_new_slot(spec: ScheduleSlotSpec) -> Result<NewScheduleSlot> {
        let weekday = Weekday::from_str(&spec.weekday)
            .ok()
            .with_context(|| format!("Invalid weekday: {}", spec.weekday))?;
        Ok(NewScheduleSlot {
            weekday,
            start_time: spec.start_time,
            end_time: spec.end_time,
        })
    }

    /// Converts a domain slot to its DTO.
    pub fn slot_to_dto(slot: DomainScheduleSlot) -> ScheduleSlot {
        ScheduleSlot {
            id: slot.id,
            course_id: slot.course_id,
            weekday: weekday_name(slot.weekday).to_string(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }

    /// Converts a course with statistics to the overview DTO.
    pub fn to_overview_dto(course: CourseWithStats) -> CourseOverview {
        CourseOverview {
            id: course.course.id,
            name: course.course.name,
            required_attendance: course.course.required_attendance,
            attendance_percentage: course.attendance_percentage,
            presents: course.stats.presents,
            absents: course.stats.absents,
            cancels: course.stats.cancels,
            unsets: course.stats.unsets,
            slots: course.slots.into_iter().map(Self::slot_to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_weekday_parsing_accepts_names_and_abbreviations() {
        for input in ["Monday", "monday", "Mon", "mon"] {
            let slot = CourseMapper::to_new_slot(ScheduleSlotSpec {
                weekday: input.to_string(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            })
            .unwrap();
            assert_eq!(slot.weekday, Weekday::Mon);
        }

        assert!(CourseMapper::to_new_slot(ScheduleSlotSpec {
            weekday: "Someday".to_string(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        })
        .is_err());
    }

    #[test]
    fn test_weekday_names_round_trip() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(Weekday::from_str(weekday_name(weekday)).unwrap(), weekday);
        }
    }
}
