//! Weekly quota reset schedule.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Weekly reset point: a weekday and wall-clock time, interpreted in the
/// bot's single configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSchedule {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl ResetSchedule {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// Earliest occurrence strictly after `after`, in the same local frame.
    ///
    /// "Strictly after" is what makes a fire at the schedule instant re-arm
    /// a full week ahead instead of at the instant just fired.
    pub fn next_occurrence(&self, after: NaiveDateTime) -> NaiveDateTime {
        let days_ahead = (i64::from(self.weekday.num_days_from_monday())
            - i64::from(after.weekday().num_days_from_monday()))
        .rem_euclid(7);
        let candidate = (after.date() + Duration::days(days_ahead)).and_time(self.time);
        if candidate > after {
            candidate
        } else {
            candidate + Duration::days(7)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn wednesday_ten() -> ResetSchedule {
        ResetSchedule::new(Weekday::Wed, NaiveTime::from_hms_opt(10, 0, 0).unwrap())
    }

    #[test]
    fn next_occurrence_later_in_week() {
        // 2024-01-01 is a Monday.
        let next = wednesday_ten().next_occurrence(at(2024, 1, 1, 9, 0));
        assert_eq!(next, at(2024, 1, 3, 10, 0));
    }

    #[test]
    fn next_occurrence_same_day_before_time() {
        let next = wednesday_ten().next_occurrence(at(2024, 1, 3, 9, 59));
        assert_eq!(next, at(2024, 1, 3, 10, 0));
    }

    #[test]
    fn next_occurrence_at_exact_instant_is_a_week_later() {
        let next = wednesday_ten().next_occurrence(at(2024, 1, 3, 10, 0));
        assert_eq!(next, at(2024, 1, 10, 10, 0));
    }

    #[test]
    fn next_occurrence_same_day_after_time_is_a_week_later() {
        let next = wednesday_ten().next_occurrence(at(2024, 1, 3, 10, 1));
        assert_eq!(next, at(2024, 1, 10, 10, 0));
    }

    #[test]
    fn next_occurrence_wraps_weekend() {
        // 2024-01-07 is a Sunday.
        let next = wednesday_ten().next_occurrence(at(2024, 1, 7, 23, 30));
        assert_eq!(next, at(2024, 1, 10, 10, 0));
    }

    #[test]
    fn next_occurrence_is_always_strictly_after() {
        let schedule = wednesday_ten();
        let after = at(2024, 1, 3, 10, 0);
        let next = schedule.next_occurrence(after);
        assert!(next > after);
        assert_eq!(next - after, Duration::days(7));
    }
}
