//! Property-based checks over the timespan algebra, the cell parser, and
//! preference scoring.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use shiftforge::models::{ClockSpan, Preference, Timespan};
use shiftforge::parsing::{parse_cell, render_windows};

fn minutes(m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// An ordered pair of whole-minute times on one day, end strictly later.
fn clock_pair() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (0u32..1439, 1u32..1440)
        .prop_map(|(a, b)| (a.min(b.max(a + 1) - 1), b.max(a + 1)))
        .prop_map(|(a, b)| (minutes(a), minutes(b)))
}

proptest! {
    #[test]
    fn prop_strip_then_rebind_round_trips((start, end) in clock_pair()) {
        let span = ClockSpan::new(start, end).with_date(day());
        let rebound = span.strip_date().with_date(day());
        prop_assert_eq!(span, rebound);
        prop_assert_eq!(span.strip_date().start, start);
        prop_assert_eq!(span.strip_date().end, end);
    }

    #[test]
    fn prop_overlap_is_symmetric((a_start, a_end) in clock_pair(), (b_start, b_end) in clock_pair()) {
        let a = ClockSpan::new(a_start, a_end).with_date(day());
        let b = ClockSpan::new(b_start, b_end).with_date(day());
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn prop_touching_spans_never_overlap((start, end) in clock_pair(), gap in 0u32..120) {
        // the follow-on span starts exactly where the first ends (or later)
        let end_minutes = end.signed_duration_since(NaiveTime::MIN).num_minutes() as u32;
        let next_start = (end_minutes + gap).min(1439);
        let next_end = (next_start + 60).min(1439);
        let first = ClockSpan::new(start, end).with_date(day());
        let next = ClockSpan::new(minutes(next_start), minutes(next_end)).with_date(day());
        prop_assert!(!first.overlaps(&next));
        prop_assert!(!next.overlaps(&first));
    }

    #[test]
    fn prop_a_span_contains_itself((start, end) in clock_pair()) {
        let outer = ClockSpan::new(start, end);
        let dated = outer.with_date(day());
        prop_assert!(outer.contains_dated(&dated));
        prop_assert!(dated.contains(&dated));
    }

    #[test]
    fn prop_render_then_reparse_is_identity(windows in proptest::collection::vec(clock_pair(), 1..4)) {
        let mut dated: Vec<Timespan> = windows
            .iter()
            .map(|&(start, end)| ClockSpan::new(start, end).with_date(day()))
            .collect();
        dated.sort();
        dated.dedup();

        let rendered = render_windows(&dated);
        let mut reparsed = parse_cell(day(), &rendered);
        reparsed.sort();
        reparsed.dedup();
        prop_assert_eq!(reparsed, dated);
    }

    #[test]
    fn prop_adding_a_window_never_lowers_specific_tod(
        existing in proptest::collection::vec(clock_pair(), 0..3),
        (start, end) in clock_pair(),
    ) {
        let shift = ClockSpan::new(start, end).with_date(day());

        let windows: Vec<ClockSpan> = existing
            .iter()
            .map(|&(s, e)| ClockSpan::new(s, e))
            .collect();
        let before = Preference::SpecificTod { windows: windows.clone() }.score(&shift);

        // grow the list by a window that contains the shift
        let mut grown = windows;
        grown.push(ClockSpan::new(start, end));
        let after = Preference::SpecificTod { windows: grown }.score(&shift);

        prop_assert!(after >= before);
        prop_assert_eq!(after, 1.0);
    }
}
