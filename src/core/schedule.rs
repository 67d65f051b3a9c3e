//! Date/duration derivation.
//!
//! A document carries a start date, an end date and a duration in days; any
//! two determine the third. [`LinkedSchedule`] keeps them consistent under
//! "last edited wins": it remembers which of end date or duration the user set
//! last and only ever recomputes the other one, so an edit never bounces back
//! and forth between the two fields.

use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whole days from `start` to `end`. Negative when `end` precedes `start`.
#[must_use]
pub fn compute_duration(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// `start + days`, or `None` if the result falls outside chrono's date range.
#[must_use]
pub fn date_from_duration(start: NaiveDate, days: i64) -> Option<NaiveDate> {
    start.checked_add_signed(Duration::try_days(days)?)
}

/// `start + days` for a stored schedule.
///
/// # Errors
/// Returns [`Error::Validation`] for a negative day count or an end date
/// outside chrono's range.
pub fn end_date_for(start: NaiveDate, days: i64) -> Result<NaiveDate> {
    if days < 0 {
        return Err(Error::validation(format!(
            "Duration cannot be negative: {days} days"
        )));
    }
    date_from_duration(start, days)
        .ok_or_else(|| Error::validation(format!("{days} days from {start} is out of range")))
}

/// Duration between two dates, discarding negative results as unset.
#[must_use]
pub fn non_negative_duration(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    Some(compute_duration(start, end)).filter(|days| *days >= 0)
}

/// Which derived field the user touched most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    EndDate,
    Duration,
}

/// Start date, end date and duration kept mutually consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedSchedule {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    duration: Option<i64>,
    last_source: Option<ScheduleSource>,
}

impl LinkedSchedule {
    #[must_use]
    pub fn new(start: Option<NaiveDate>) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    #[must_use]
    pub const fn duration(&self) -> Option<i64> {
        self.duration
    }

    #[must_use]
    pub const fn last_source(&self) -> Option<ScheduleSource> {
        self.last_source
    }

    /// Sets the end date and derives the duration from it.
    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.end = end;
        self.last_source = Some(ScheduleSource::EndDate);
        self.derive_duration();
    }

    /// Sets the duration and derives the end date from it. A negative duration,
    /// or one whose end date is out of range, leaves both fields unset.
    pub fn set_duration(&mut self, days: Option<i64>) {
        self.duration = days.filter(|d| *d >= 0);
        self.last_source = Some(ScheduleSource::Duration);
        self.derive_end();
    }

    /// Sets the start date and rederives whichever field the user did not
    /// set last.
    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.start = start;
        match self.last_source {
            Some(ScheduleSource::Duration) => self.derive_end(),
            Some(ScheduleSource::EndDate) | None => self.derive_duration(),
        }
    }

    fn derive_duration(&mut self) {
        self.duration = match (self.start, self.end) {
            (Some(start), Some(end)) => non_negative_duration(start, end),
            _ => None,
        };
    }

    fn derive_end(&mut self) {
        self.end = match (self.start, self.duration) {
            (Some(start), Some(days)) => date_from_duration(start, days),
            _ => None,
        };
        if self.start.is_some() && self.end.is_none() {
            self.duration = None;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_same_day_is_zero() {
        let d = date(2026, 3, 14);
        assert_eq!(compute_duration(d, d), 0);
    }

    #[test]
    fn test_duration_is_antisymmetric() {
        let a = date(2026, 1, 30);
        let b = date(2026, 3, 2);
        assert_eq!(compute_duration(a, b), 31);
        assert_eq!(compute_duration(a, b), -compute_duration(b, a));
    }

    #[test]
    fn test_round_trip_for_non_negative_durations() {
        let start = date(2024, 2, 27);
        for end in [date(2024, 2, 27), date(2024, 3, 1), date(2025, 1, 1)] {
            let days = compute_duration(start, end);
            assert_eq!(date_from_duration(start, days), Some(end));
        }
    }

    #[test]
    fn test_negative_duration_discarded() {
        assert_eq!(non_negative_duration(date(2026, 5, 2), date(2026, 5, 1)), None);
        assert_eq!(non_negative_duration(date(2026, 5, 1), date(2026, 5, 2)), Some(1));
    }

    #[test]
    fn test_date_out_of_range() {
        assert_eq!(date_from_duration(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_editing_end_recomputes_duration() {
        let mut schedule = LinkedSchedule::new(Some(date(2026, 6, 1)));
        schedule.set_end(Some(date(2026, 6, 11)));
        assert_eq!(schedule.duration(), Some(10));

        schedule.set_end(Some(date(2026, 5, 20)));
        assert_eq!(schedule.duration(), None);
        assert_eq!(schedule.end(), Some(date(2026, 5, 20)));
    }

    #[test]
    fn test_editing_duration_recomputes_end() {
        let mut schedule = LinkedSchedule::new(Some(date(2026, 6, 1)));
        schedule.set_duration(Some(30));
        assert_eq!(schedule.end(), Some(date(2026, 7, 1)));
        assert_eq!(schedule.last_source(), Some(ScheduleSource::Duration));

        schedule.set_duration(Some(-4));
        assert_eq!(schedule.duration(), None);
        assert_eq!(schedule.end(), None);
    }

    #[test]
    fn test_out_of_range_duration_clears_both_fields() {
        let mut schedule = LinkedSchedule::new(Some(date(2026, 4, 1)));
        schedule.set_end(Some(date(2026, 4, 11)));
        schedule.set_duration(Some(10_000_000_000));
        assert_eq!(schedule.end(), None);
        assert_eq!(schedule.duration(), None);
    }

    #[test]
    fn test_end_date_for_rejects_bad_durations() {
        let start = date(2026, 4, 1);
        assert_eq!(end_date_for(start, 10).unwrap(), date(2026, 4, 11));
        assert!(matches!(end_date_for(start, -5), Err(Error::Validation { .. })));
        assert!(matches!(
            end_date_for(start, 10_000_000_000),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_start_change_follows_last_edited_field() {
        let mut by_end = LinkedSchedule::new(Some(date(2026, 1, 1)));
        by_end.set_end(Some(date(2026, 1, 31)));
        by_end.set_start(Some(date(2026, 1, 11)));
        assert_eq!(by_end.end(), Some(date(2026, 1, 31)));
        assert_eq!(by_end.duration(), Some(20));

        let mut by_duration = LinkedSchedule::new(Some(date(2026, 1, 1)));
        by_duration.set_duration(Some(30));
        by_duration.set_start(Some(date(2026, 1, 11)));
        assert_eq!(by_duration.duration(), Some(30));
        assert_eq!(by_duration.end(), Some(date(2026, 2, 10)));
    }

    #[test]
    fn test_missing_start_leaves_fields_unset() {
        let mut schedule = LinkedSchedule::new(None);
        schedule.set_end(Some(date(2026, 1, 31)));
        assert_eq!(schedule.duration(), None);
        schedule.set_duration(Some(3));
        assert_eq!(schedule.end(), None);
        assert_eq!(schedule.duration(), Some(3));
    }
}
