//! Domain models for class occurrences and their attendance status.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a single class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassStatus {
    Unset,
    Present,
    Absent,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown class status: {0}")]
pub struct UnknownStatus(String);

impl ClassStatus {
    /// Database text form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Unset => "unset",
            ClassStatus::Present => "present",
            ClassStatus::Absent => "absent",
            ClassStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ClassStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(ClassStatus::Unset),
            "present" => Ok(ClassStatus::Present),
            "absent" => Ok(ClassStatus::Absent),
            "cancelled" => Ok(ClassStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an occurrence came from the weekly schedule or was created ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Regular,
    Extra,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown class kind: {0}")]
pub struct UnknownKind(String);

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Regular => "regular",
            ClassKind::Extra => "extra",
        }
    }
}

impl FromStr for ClassKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(ClassKind::Regular),
            "extra" => Ok(ClassKind::Extra),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// One concrete dated class occurrence.
///
/// `schedule_id` links a regular occurrence back to the slot it was generated
/// from. It is `None` for extra classes, and becomes `None` when the slot is
/// deleted while the recorded history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub course_id: i64,
    pub schedule_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: ClassKind,
    pub status: ClassStatus,
}

/// Date and time range for a new one-off extra class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraClassTimings {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ExtraClassTimings {
    /// Default pre-filled timings: the next full hour, one hour long.
    /// A late-night `now` rolls the date forward along with the hour.
    pub fn default_adjusted(now: NaiveDateTime) -> Self {
        let rolled = now + Duration::hours(1);
        let start = NaiveTime::from_hms_opt(rolled.hour(), 0, 0).unwrap_or(rolled.time());
        let end = if start.hour() == 23 {
            NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(start)
        } else {
            start + Duration::hours(1)
        };
        Self {
            date: rolled.date(),
            start_time: start,
            end_time: end,
        }
    }

    /// A time range is valid only when it ends after it starts.
    pub fn is_valid(&self) -> bool {
        self.end_time > self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ClassStatus::Unset,
            ClassStatus::Present,
            ClassStatus::Absent,
            ClassStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ClassStatus>().unwrap(), status);
        }
        assert!("nonsense".parse::<ClassStatus>().is_err());
    }

    #[test]
    fn test_default_timings_next_full_hour() {
        let timings = ExtraClassTimings::default_adjusted(dt(2024, 3, 14, 14, 25));
        assert_eq!(timings.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(timings.start_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(timings.end_time, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        assert!(timings.is_valid());
    }

    #[test]
    fn test_default_timings_near_midnight_roll_date() {
        // 23:10 rolls to 00:00 the next day
        let timings = ExtraClassTimings::default_adjusted(dt(2024, 3, 14, 23, 10));
        assert_eq!(timings.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(timings.start_time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert!(timings.is_valid());
    }

    #[test]
    fn test_default_timings_last_hour_clamped() {
        // 22:40 -> 23:00 start; end clamps to 23:59 instead of wrapping
        let timings = ExtraClassTimings::default_adjusted(dt(2024, 3, 14, 22, 40));
        assert_eq!(timings.start_time, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(timings.end_time, NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(timings.is_valid());
    }

    #[test]
    fn test_invalid_range_detected() {
        let timings = ExtraClassTimings {
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        };
        assert!(!timings.is_valid());
    }
}
