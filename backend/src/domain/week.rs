//! Week arithmetic for mapping schedule slots to concrete calendar dates.
//!
//! Weeks are counted from the Unix epoch date (1970-01-01). Resolving a slot
//! for a given week lands on the day of that ISO week (Monday-based) matching
//! the slot's configured weekday, which lets a user retroactively mark
//! attendance for any past week of a recurring slot.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The date weeks are counted from.
fn epoch() -> NaiveDate {
    // NaiveDate::default() is 1970-01-01
    NaiveDate::default()
}

/// Number of whole weeks between the epoch and `today`.
pub fn weeks_since_epoch(today: NaiveDate) -> i64 {
    (today - epoch()).num_weeks()
}

/// Concrete calendar date of a slot's weekday in the ISO week reached by
/// adding `weeks` weeks to the epoch.
pub fn date_in_week(weekday: Weekday, weeks: i64) -> NaiveDate {
    let base = epoch() + Duration::weeks(weeks);
    let offset =
        i64::from(weekday.num_days_from_monday()) - i64::from(base.weekday().num_days_from_monday());
    base + Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weeks_since_epoch() {
        assert_eq!(weeks_since_epoch(NaiveDate::default()), 0);
        assert_eq!(
            weeks_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 8).unwrap()),
            1
        );
        assert_eq!(
            weeks_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 14).unwrap()),
            1
        );
    }

    #[test]
    fn test_date_in_week_matches_slot_weekday() {
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for weeks in [1, 2, 52, 1000, 2843] {
            for weekday in weekdays {
                let date = date_in_week(weekday, weeks);
                assert_eq!(date.weekday(), weekday, "week {weeks}");
            }
        }
    }

    #[test]
    fn test_date_in_week_is_deterministic() {
        let first = date_in_week(Weekday::Wed, 2843);
        let second = date_in_week(Weekday::Wed, 2843);
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_in_week_stays_inside_the_iso_week() {
        // the epoch is a Thursday; the Monday of its week is 1969-12-29
        assert_eq!(
            date_in_week(Weekday::Mon, 0),
            NaiveDate::from_ymd_opt(1969, 12, 29).unwrap()
        );
        assert_eq!(
            date_in_week(Weekday::Thu, 0),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        assert_eq!(
            date_in_week(Weekday::Sun, 0),
            NaiveDate::from_ymd_opt(1970, 1, 4).unwrap()
        );
    }

    #[test]
    fn test_round_trip_with_weeks_since_epoch() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(); // a Friday
        let week = weeks_since_epoch(today);
        assert_eq!(date_in_week(Weekday::Fri, week), today);
    }
}
