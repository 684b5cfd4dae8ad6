//! Interval algebra over wall-clock and time-of-day spans.
//!
//! Two concrete interval types are provided: [`Timespan`] binds a span to
//! concrete dates, [`ClockSpan`] is date-agnostic. Both are closed intervals
//! for containment tests and half-open for overlap tests; that asymmetry is
//! load-bearing (a shift ending at noon and one starting at noon do not
//! overlap, yet a window contains a shift that ends exactly at its boundary).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from timespan operations that depend on runtime values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimespanError {
    /// Shifting a [`ClockSpan`] moved one of its endpoints across midnight.
    #[error("shifting a clock span by {delta_seconds}s crosses a day boundary")]
    DayOverflow { delta_seconds: i64 },
}

/// A date-agnostic span between two times of day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use shiftforge::models::ClockSpan;
///
/// let morning = ClockSpan::new(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
/// );
/// assert_eq!(morning.length().num_hours(), 4);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClockSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ClockSpan {
    /// Creates a new time-of-day span.
    ///
    /// Panics if `start > end`; a reversed span is a programmer error, the
    /// parsers validate ordering before constructing.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        assert!(
            start <= end,
            "clock span start {} must not be after end {}",
            start,
            end
        );
        Self { start, end }
    }

    /// Duration between the two endpoints.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Strict overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &ClockSpan) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Inclusive containment: `other` may share either endpoint.
    pub fn contains(&self, other: &ClockSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Inclusive containment of a dated span, lifted by stripping its dates.
    pub fn contains_dated(&self, other: &Timespan) -> bool {
        self.contains(&other.strip_date())
    }

    /// Binds the span to a calendar date.
    pub fn with_date(&self, day: NaiveDate) -> Timespan {
        Timespan::new(day.and_time(self.start), day.and_time(self.end))
    }

    /// Translates both endpoints by `delta`.
    ///
    /// The result must stay within one day; a span that would wrap through
    /// midnight is rejected.
    pub fn shift(&self, delta: Duration) -> Result<ClockSpan, TimespanError> {
        let (start, start_wrap) = self.start.overflowing_add_signed(delta);
        let (end, end_wrap) = self.end.overflowing_add_signed(delta);
        if start_wrap != 0 || end_wrap != 0 || start > end {
            return Err(TimespanError::DayOverflow {
                delta_seconds: delta.num_seconds(),
            });
        }
        Ok(ClockSpan::new(start, end))
    }

    /// Smallest span covering both operands.
    pub fn union(&self, other: &ClockSpan) -> ClockSpan {
        ClockSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A span between two wall-clock instants.
///
/// Shifts, availability windows, and coverage windows are all dated spans;
/// the solver only ever deals in single-day instances of them.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use shiftforge::models::Timespan;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let shift = Timespan::new(
///     day.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
///     day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
/// );
/// assert_eq!(shift.length().num_minutes(), 180);
/// assert!(shift.is_single_day());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timespan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Timespan {
    /// Creates a new dated span.
    ///
    /// Panics if `start > end`; a reversed span is a programmer error, the
    /// parsers validate ordering before constructing.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(
            start <= end,
            "timespan start {} must not be after end {}",
            start,
            end
        );
        Self { start, end }
    }

    /// Duration between the two endpoints.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole seconds; the unit the solver accounts hours in.
    pub fn seconds(&self) -> i64 {
        self.length().num_seconds()
    }

    /// True when both endpoints fall on the same calendar date.
    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// Erases the date components, producing a time-of-day span.
    pub fn strip_date(&self) -> ClockSpan {
        ClockSpan::new(self.start.time(), self.end.time())
    }

    /// Strict overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Timespan) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Inclusive containment: `other` may share either endpoint.
    pub fn contains(&self, other: &Timespan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Half-open point membership: the instant may coincide with the start
    /// but not the end. Coverage sampling tests candidate shifts with this,
    /// so a shift ending at noon and one starting at noon hand off cleanly.
    pub fn covers_instant(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Translates both endpoints by `delta`.
    pub fn shift(&self, delta: Duration) -> Timespan {
        Timespan::new(self.start + delta, self.end + delta)
    }

    /// Smallest span covering both operands.
    pub fn union(&self, other: &Timespan) -> Timespan {
        Timespan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn span(sh: u32, sm: u32, eh: u32, em: u32) -> Timespan {
        Timespan::new(day().and_time(t(sh, sm)), day().and_time(t(eh, em)))
    }

    #[test]
    fn length_of_clock_span() {
        let s = ClockSpan::new(t(8, 0), t(11, 30));
        assert_eq!(s.length(), Duration::minutes(210));
    }

    #[test]
    fn strip_and_rebind_round_trips() {
        let original = span(9, 0, 17, 0);
        let rebound = original.strip_date().with_date(day());
        assert_eq!(original, rebound);
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let a = span(9, 0, 12, 0);
        let b = span(12, 0, 15, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn proper_overlap_is_symmetric() {
        let a = span(9, 0, 12, 0);
        let b = span(11, 0, 14, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn span_contains_itself_but_half_open_coverage_excludes_the_end() {
        let a = span(9, 0, 12, 0);
        assert!(a.contains(&a));
        assert!(a.covers_instant(a.start));
        assert!(a.covers_instant(day().and_time(t(11, 55))));
        assert!(!a.covers_instant(a.end));
    }

    #[test]
    fn containment_is_inclusive_while_overlap_is_strict() {
        let window = ClockSpan::new(t(9, 0), t(17, 0));
        let closing = ClockSpan::new(t(14, 0), t(17, 0));
        assert!(window.contains(&closing));

        let next = ClockSpan::new(t(17, 0), t(21, 0));
        assert!(!window.overlaps(&next));
    }

    #[test]
    fn cross_kind_containment_strips_the_date() {
        let favored = ClockSpan::new(t(8, 0), t(12, 0));
        let shift = span(9, 0, 12, 0);
        assert!(favored.contains_dated(&shift));

        let late = span(9, 0, 13, 0);
        assert!(!favored.contains_dated(&late));
    }

    #[test]
    fn clock_shift_stays_within_the_day() {
        let s = ClockSpan::new(t(9, 0), t(12, 0));
        let shifted = s.shift(Duration::hours(2)).unwrap();
        assert_eq!(shifted, ClockSpan::new(t(11, 0), t(14, 0)));
    }

    #[test]
    fn clock_shift_through_midnight_is_rejected() {
        let s = ClockSpan::new(t(20, 0), t(23, 0));
        let err = s.shift(Duration::hours(3)).unwrap_err();
        assert_eq!(
            err,
            TimespanError::DayOverflow {
                delta_seconds: 3 * 3600
            }
        );
    }

    #[test]
    fn dated_shift_translates_both_endpoints() {
        let s = span(22, 0, 23, 0);
        let shifted = s.shift(Duration::hours(3));
        assert_eq!(shifted.start.date(), day().succ_opt().unwrap());
        assert_eq!(shifted.length(), Duration::hours(1));
    }

    #[test]
    fn union_builds_the_envelope() {
        let a = span(9, 0, 11, 0);
        let b = span(14, 0, 16, 0);
        let u = a.union(&b);
        assert_eq!(u, span(9, 0, 16, 0));
        assert_eq!(u, b.union(&a));
    }

    #[test]
    fn spans_sort_chronologically() {
        let mut spans = vec![span(12, 0, 15, 0), span(9, 0, 12, 0), span(9, 0, 10, 0)];
        spans.sort();
        assert_eq!(
            spans,
            vec![span(9, 0, 10, 0), span(9, 0, 12, 0), span(12, 0, 15, 0)]
        );
    }

    #[test]
    #[should_panic(expected = "must not be after end")]
    fn reversed_span_panics() {
        span(12, 0, 9, 0);
    }
}
