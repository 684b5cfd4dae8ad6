//! Shared builders for the integration suites.
#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use shiftforge::models::{CoverageRequirement, Employee, ScheduledShift, Timespan};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn monday() -> NaiveDate {
    // 2024-06-03 is a Monday
    date(2024, 6, 3)
}

pub fn span(day: NaiveDate, sh: u32, sm: u32, eh: u32, em: u32) -> Timespan {
    Timespan::new(
        day.and_time(NaiveTime::from_hms_opt(sh, sm, 0).unwrap()),
        day.and_time(NaiveTime::from_hms_opt(eh, em, 0).unwrap()),
    )
}

pub fn all_day(day: NaiveDate) -> Timespan {
    Timespan::new(
        day.and_time(NaiveTime::MIN),
        day.and_time(NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap()),
    )
}

pub fn worker(positions: &[&str], availability: Vec<Timespan>, preferred_hours: f64) -> Employee {
    Employee {
        positions: positions.iter().map(|p| p.to_string()).collect(),
        availability,
        preferred_hours,
        ..Employee::default()
    }
}

pub fn pool(entries: Vec<(&str, Employee)>) -> BTreeMap<String, Employee> {
    entries
        .into_iter()
        .map(|(name, employee)| (name.to_string(), employee))
        .collect()
}

pub fn requirement(position: &str, window: Timespan) -> CoverageRequirement {
    CoverageRequirement::new(position, window)
}

/// Asserts the selected shifts for `position` tile `window` exactly: no
/// gaps, no overlaps, flush at both ends.
pub fn assert_covers(schedule: &[ScheduledShift], position: &str, window: Timespan) {
    let mut spans: Vec<Timespan> = schedule
        .iter()
        .filter(|s| s.position == position && window.contains(&s.span))
        .map(|s| s.span)
        .collect();
    spans.sort();
    assert!(
        !spans.is_empty(),
        "no shifts scheduled for position {position}"
    );
    assert_eq!(spans.first().unwrap().start, window.start, "gap at window start");
    assert_eq!(spans.last().unwrap().end, window.end, "gap at window end");
    for pair in spans.windows(2) {
        assert_eq!(
            pair[0].end, pair[1].start,
            "coverage must hand off without gaps or overlaps"
        );
    }
}

/// Asserts no employee is double-booked at any instant.
pub fn assert_disjoint_per_employee(schedule: &[ScheduledShift]) {
    for a in schedule {
        for b in schedule {
            if std::ptr::eq(a, b) || a.employee != b.employee {
                continue;
            }
            assert!(
                !a.span.overlaps(&b.span),
                "employee {} is double-booked: {:?} and {:?}",
                a.employee,
                a.span,
                b.span
            );
        }
    }
}

/// Total scheduled seconds for one employee.
pub fn scheduled_seconds(schedule: &[ScheduledShift], employee: &str) -> i64 {
    schedule
        .iter()
        .filter(|s| s.employee == employee)
        .map(|s| s.span.seconds())
        .sum()
}
