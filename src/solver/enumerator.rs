//! Candidate shift enumeration.
//!
//! For every coverage requirement, candidate shifts start on the hour (or on
//! the configured granularity), run for one of the legal lengths, and are
//! clipped to the coverage window. Clipping can leave a remainder shorter
//! than the minimum legal length at the end of the day; those are discarded.

use std::collections::HashSet;

use chrono::{NaiveTime, Timelike};
use log::debug;

use crate::config::SolveParams;
use crate::models::{CandidateShift, CoverageRequirement, Timespan};

/// Last posted minute of the day, the pin for shifts that would run past it.
fn end_of_posted_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("static clock constant")
}

/// Enumerates every legal candidate shift for the given requirements.
///
/// Emission order is deterministic: requirements in input order, start hours
/// ascending, lengths in configured order. Clipping can collapse two
/// `(start, length)` pairs onto the same span; duplicates are emitted once.
pub fn enumerate_shifts(
    to_schedule: &[CoverageRequirement],
    params: &SolveParams,
) -> Vec<CandidateShift> {
    let min_seconds = (params.absolute_shift_minimum_length * 3600.0) as i64;
    let max_seconds = i64::from(params.max_shift_length()) * 3600;
    let step = params.shift_granularity.max(1) as usize;

    let mut candidates = Vec::new();
    for (pid, requirement) in to_schedule.iter().enumerate() {
        let window = requirement.window.strip_date();
        let day = requirement.window.start.date();
        let mut seen: HashSet<Timespan> = HashSet::new();

        for hour in (window.start.hour()..window.end.hour()).step_by(step) {
            for &length in &params.shift_lengths {
                let mut start =
                    NaiveTime::from_hms_opt(hour, 0, 0).expect("hour below 24");
                if start < window.start {
                    start = window.start;
                }
                let mut end = if hour + length > 23 {
                    end_of_posted_day()
                } else {
                    NaiveTime::from_hms_opt(hour + length, 0, 0).expect("hour below 24")
                };
                if end > window.end {
                    end = window.end;
                }

                let span = Timespan::new(day.and_time(start), day.and_time(end));
                if span.seconds() < min_seconds || span.seconds() > max_seconds {
                    continue;
                }
                if !window.contains(&span.strip_date()) {
                    continue;
                }
                if seen.insert(span) {
                    candidates.push(CandidateShift {
                        requirement: pid,
                        span,
                    });
                }
            }
        }
    }
    debug!(
        "enumerated {} candidate shifts over {} coverage windows",
        candidates.len(),
        to_schedule.len()
    );
    candidates
}
