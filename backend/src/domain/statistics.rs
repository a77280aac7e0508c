//! Attendance statistics for a course.
//!
//! The percentage is recomputed on demand from the recorded occurrence
//! statuses and is never stored. Cancelled classes stay out of the
//! denominator entirely; classes still in `Unset` state count according to
//! the configured unset-classes policy.

use crate::domain::models::attendance::ClassStatus;
use crate::domain::models::preferences::UnsetClassesPolicy;

/// Tallied occurrence statuses for one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    pub presents: u32,
    pub absents: u32,
    pub cancels: u32,
    pub unsets: u32,
}

impl AttendanceStats {
    /// Tally a collection of per-occurrence statuses. Total over any input.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ClassStatus>,
    {
        let mut stats = Self::default();
        for status in statuses {
            match status {
                ClassStatus::Present => stats.presents += 1,
                ClassStatus::Absent => stats.absents += 1,
                ClassStatus::Cancelled => stats.cancels += 1,
                ClassStatus::Unset => stats.unsets += 1,
            }
        }
        stats
    }

    /// Attendance percentage under the given unset-classes policy.
    ///
    /// With nothing to count the course cannot be below its requirement yet,
    /// so an empty denominator reports 100.
    pub fn percentage(&self, policy: UnsetClassesPolicy) -> f64 {
        let attended = match policy {
            UnsetClassesPolicy::ConsiderPresent => self.presents + self.unsets,
            _ => self.presents,
        };
        let counted = match policy {
            UnsetClassesPolicy::Ignore => self.presents + self.absents,
            _ => self.presents + self.absents + self.unsets,
        };
        if counted == 0 {
            return 100.0;
        }
        f64::from(attended) / f64::from(counted) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(present: u32, absent: u32, cancel: u32, unset: u32) -> Vec<ClassStatus> {
        let mut all = Vec::new();
        all.extend(std::iter::repeat(ClassStatus::Present).take(present as usize));
        all.extend(std::iter::repeat(ClassStatus::Absent).take(absent as usize));
        all.extend(std::iter::repeat(ClassStatus::Cancelled).take(cancel as usize));
        all.extend(std::iter::repeat(ClassStatus::Unset).take(unset as usize));
        all
    }

    #[test]
    fn test_tally_counts_every_status() {
        let stats = AttendanceStats::tally(statuses(3, 2, 4, 1));
        assert_eq!(stats.presents, 3);
        assert_eq!(stats.absents, 2);
        assert_eq!(stats.cancels, 4);
        assert_eq!(stats.unsets, 1);
    }

    #[test]
    fn test_percentage_ignores_cancels_for_all_policies() {
        // 6 presents, 2 absents, plus cancels that must never matter
        for cancels in [0, 1, 10] {
            let stats = AttendanceStats::tally(statuses(6, 2, cancels, 0));
            for policy in [
                UnsetClassesPolicy::ConsiderPresent,
                UnsetClassesPolicy::ConsiderAbsent,
                UnsetClassesPolicy::Ignore,
            ] {
                assert_eq!(stats.percentage(policy), 75.0);
            }
        }
    }

    #[test]
    fn test_percentage_policy_applied_to_unsets_only() {
        let stats = AttendanceStats::tally(statuses(6, 2, 1, 2));

        // unsets attended: (6 + 2) / (6 + 2 + 2)
        assert_eq!(stats.percentage(UnsetClassesPolicy::ConsiderPresent), 80.0);
        // unsets missed: 6 / (6 + 2 + 2)
        assert_eq!(stats.percentage(UnsetClassesPolicy::ConsiderAbsent), 60.0);
        // unsets excluded: 6 / (6 + 2)
        assert_eq!(stats.percentage(UnsetClassesPolicy::Ignore), 75.0);
    }

    #[test]
    fn test_percentage_formula_holds_for_arbitrary_tallies() {
        for presents in 0..5u32 {
            for absents in 0..5u32 {
                for unsets in 0..5u32 {
                    let stats = AttendanceStats::tally(statuses(presents, absents, 2, unsets));
                    for (policy, attended, counted) in [
                        (
                            UnsetClassesPolicy::ConsiderPresent,
                            presents + unsets,
                            presents + absents + unsets,
                        ),
                        (
                            UnsetClassesPolicy::ConsiderAbsent,
                            presents,
                            presents + absents + unsets,
                        ),
                        (UnsetClassesPolicy::Ignore, presents, presents + absents),
                    ] {
                        let expected = if counted == 0 {
                            100.0
                        } else {
                            f64::from(attended) / f64::from(counted) * 100.0
                        };
                        assert_eq!(stats.percentage(policy), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_denominator_reports_full_attendance() {
        let stats = AttendanceStats::tally(statuses(0, 0, 3, 0));
        assert_eq!(stats.percentage(UnsetClassesPolicy::Ignore), 100.0);
        assert_eq!(AttendanceStats::default().percentage(UnsetClassesPolicy::ConsiderAbsent), 100.0);
    }
}
