//! Domain model for weekly schedule slots.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A recurring weekly commitment: one class of a course on a fixed weekday
/// and time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: i64,
    pub course_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleSlot {
    /// ISO weekday number (Monday = 1 ... Sunday = 7) as stored in the
    /// database.
    pub fn weekday_number(&self) -> u32 {
        self.weekday.number_from_monday()
    }
}

/// Map a stored ISO weekday number back to a `Weekday`.
pub fn weekday_from_number(n: u32) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
