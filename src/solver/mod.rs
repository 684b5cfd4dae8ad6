//! Shift enumeration, model building, and solving.
//!
//! [`create_schedule`] is the engine's entry point: enumerate candidate
//! shifts, build the assignment model, solve, and project the selected
//! variables back onto `(employee, position, span)` triples. Every call
//! builds a fresh model; the engine holds no state between calls. Callers
//! wanting memoization wrap the function in a [`CachedScheduler`].

pub mod cache;
mod enumerator;
mod model;

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::config::SolveParams;
use crate::models::{CoverageRequirement, Employee, ScheduledShift};

pub use cache::CachedScheduler;
pub use enumerator::enumerate_shifts;

/// Solves the shift-assignment problem.
///
/// Returns the schedule as `(employee, position, span)` triples sorted
/// chronologically, or `None` when no candidate shifts exist or no feasible
/// assignment was found. User-data problems never raise; they surface as
/// diagnostics and a `None`.
pub fn create_schedule(
    to_schedule: &[CoverageRequirement],
    employees: &BTreeMap<String, Employee>,
    params: &SolveParams,
) -> Option<Vec<ScheduledShift>> {
    let candidates = enumerator::enumerate_shifts(to_schedule, params);
    if candidates.is_empty() {
        warn!("no candidate shifts could be generated; nothing to schedule");
        return None;
    }
    debug!(
        "scheduling {} coverage windows for {} employees over {} candidate shifts",
        to_schedule.len(),
        employees.len(),
        candidates.len()
    );

    let selections = model::solve_assignment(to_schedule, employees, &candidates, params)?;

    let mut schedule: Vec<ScheduledShift> = selections
        .into_iter()
        .map(|selection| {
            let candidate = &candidates[selection.candidate];
            ScheduledShift {
                employee: selection.employee,
                position: to_schedule[candidate.requirement].position.clone(),
                span: candidate.span,
            }
        })
        .collect();
    schedule.sort_by(|a, b| {
        (a.span, &a.position, &a.employee).cmp(&(b.span, &b.position, &b.employee))
    });
    Some(schedule)
}
