//! Integer-programming model construction and solving.
//!
//! One binary decision variable exists per (employee, candidate shift) pair
//! the employee is qualified for. Coverage is enforced by an exactly-one
//! constraint at every sampling instant of every window; overlapping pairs,
//! daily counts, and weekly hours bound each employee; the objective trades
//! hour-deviation against preference satisfaction, with unavailable time
//! carrying an overwhelming (but finite) penalty so that an otherwise
//! unstaffable window still gets covered.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};
use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression,
    ResolutionError, Solution, SolverModel, Variable,
};
use log::{debug, warn};

use crate::config::SolveParams;
use crate::models::{CandidateShift, CoverageRequirement, Employee};

/// Multiplier on the summed weekly-deviation percentages.
const DEVIATION_OBJECTIVE_WEIGHT: f64 = 5.0;

/// Multiplier on seconds worked outside availability. Large enough to
/// dominate every other term, small enough to stay soft: when no available
/// employee exists the solver still staffs the window.
const UNAVAILABLE_OBJECTIVE_WEIGHT: f64 = 10_000_000.0;

/// One selected decision variable, mapped back to its inputs.
pub(crate) struct Selection {
    pub employee: String,
    pub candidate: usize,
}

struct VarInfo {
    employee: usize,
    candidate: usize,
    var: Variable,
}

/// Builds and solves the assignment model.
///
/// Returns the selected (employee, candidate) pairs, or `None` when the
/// model is infeasible or the backend fails.
pub(crate) fn solve_assignment(
    to_schedule: &[CoverageRequirement],
    employees: &BTreeMap<String, Employee>,
    candidates: &[CandidateShift],
    params: &SolveParams,
) -> Option<Vec<Selection>> {
    let employee_list: Vec<(&String, &Employee)> = employees.iter().collect();

    let mut vars = variables!();
    let mut infos: Vec<VarInfo> = Vec::new();
    let mut by_employee: Vec<Vec<usize>> = vec![Vec::new(); employee_list.len()];
    let mut by_requirement: Vec<Vec<usize>> = vec![Vec::new(); to_schedule.len()];

    for (e_idx, (_, employee)) in employee_list.iter().enumerate() {
        for (c_idx, candidate) in candidates.iter().enumerate() {
            let position = &to_schedule[candidate.requirement].position;
            if !employee.qualified_for(position) {
                continue;
            }
            let var = vars.add(variable().binary());
            let v_idx = infos.len();
            infos.push(VarInfo {
                employee: e_idx,
                candidate: c_idx,
                var,
            });
            by_employee[e_idx].push(v_idx);
            by_requirement[candidate.requirement].push(v_idx);
        }
    }
    if infos.is_empty() {
        warn!("no employee qualifies for any candidate shift");
        return None;
    }

    let mut constraints: Vec<Constraint> = Vec::new();

    // Each employee works at least one shift, if asked to and possible.
    if params.min_one_shift_per_employee {
        for (e_idx, (name, _)) in employee_list.iter().enumerate() {
            let own = &by_employee[e_idx];
            if own.is_empty() {
                warn!(
                    "employee {} does not qualify for any open shift; \
                     exempting them from the minimum-shift rule",
                    name
                );
                continue;
            }
            let total: Expression = own.iter().map(|&i| infos[i].var).sum();
            constraints.push(constraint!(total >= 1));
        }
    }

    // Exactly one person on every position at every sampled instant. The
    // sampling is half-open: the closing endpoint belongs to the next shift.
    let step = Duration::minutes(i64::from(params.sampling_interval_mins.max(1)));
    for (pid, requirement) in to_schedule.iter().enumerate() {
        let window = requirement.window;

        let mut sample_times = Vec::new();
        let mut t = window.start;
        while t < window.end {
            sample_times.push(t);
            t = t + step;
        }
        if sample_times.is_empty() {
            // a zero-length window still demands a (nonexistent) worker
            sample_times.push(window.start);
        }

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); sample_times.len()];
        for &v_idx in &by_requirement[pid] {
            let span = candidates[infos[v_idx].candidate].span;
            for (k, &sample) in sample_times.iter().enumerate() {
                if span.covers_instant(sample) {
                    buckets[k].push(v_idx);
                }
            }
        }
        for (k, bucket) in buckets.iter().enumerate() {
            if bucket.is_empty() {
                warn!(
                    "position '{}' (slot {}) has no candidate covering its window at {}",
                    requirement.position, pid, sample_times[k]
                );
                return None;
            }
            let total: Expression = bucket.iter().map(|&i| infos[i].var).sum();
            constraints.push(constraint!(total == 1));
        }
    }

    // No employee in two places at once: one constraint per overlapping
    // pair, found with a sweep over their candidates sorted by start.
    for own in &by_employee {
        let mut ordered = own.clone();
        ordered.sort_by_key(|&i| {
            let span = candidates[infos[i].candidate].span;
            (span.start, span.end)
        });
        let mut active: Vec<usize> = Vec::new();
        for &current in &ordered {
            let span = candidates[infos[current].candidate].span;
            active.retain(|&other| candidates[infos[other].candidate].span.end > span.start);
            for &other in &active {
                constraints.push(constraint!(infos[other].var + infos[current].var <= 1));
            }
            active.push(current);
        }
    }

    // Daily shift-count cap.
    let daily_cap = f64::from(params.max_shifts_per_day);
    for own in &by_employee {
        let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for &v_idx in own {
            let day = candidates[infos[v_idx].candidate].span.start.date();
            by_day.entry(day).or_default().push(v_idx);
        }
        for day_vars in by_day.values() {
            let total: Expression = day_vars.iter().map(|&i| infos[i].var).sum();
            constraints.push(constraint!(total <= daily_cap));
        }
    }

    // Weekly hour caps and the deviation half of the objective.
    let week_cap_secs = params.max_hours_per_week * 3600.0;
    let weeks: BTreeSet<(i32, u32)> = to_schedule
        .iter()
        .map(|r| {
            let week = r.window.start.date().iso_week();
            (week.year(), week.week())
        })
        .collect();

    let mut deviation_terms: Vec<Expression> = Vec::new();
    for (e_idx, (name, employee)) in employee_list.iter().enumerate() {
        for &(year, week) in &weeks {
            let in_week: Vec<usize> = by_employee[e_idx]
                .iter()
                .copied()
                .filter(|&i| {
                    let iso = candidates[infos[i].candidate].span.start.date().iso_week();
                    iso.year() == year && iso.week() == week
                })
                .collect();
            if in_week.is_empty() {
                continue;
            }

            let total_seconds: Expression = in_week
                .iter()
                .map(|&i| candidates[infos[i].candidate].span.seconds() as f64 * infos[i].var)
                .sum();
            constraints.push(constraint!(total_seconds.clone() <= week_cap_secs));
            if let Some(max_hours) = employee.maximum_hours {
                if max_hours > 0.0 {
                    constraints.push(constraint!(total_seconds.clone() <= max_hours * 3600.0));
                }
            }

            let preferred_hours = employee.preferred_hours;
            if !preferred_hours.is_finite() || preferred_hours == 0.0 {
                continue;
            }
            let preferred_secs = (preferred_hours * 3600.0).clamp(0.0, week_cap_secs);
            if preferred_secs <= 0.0 {
                debug!(
                    "skipping deviation term for {} in week {}-W{}: \
                     non-positive preferred hours",
                    name, year, week
                );
                continue;
            }

            // deviation >= |total - preferred|; minimized with a non-negative
            // weight, so it settles exactly on the absolute difference
            let deviation = vars.add(variable().clamp(0.0, week_cap_secs));
            constraints.push(constraint!(total_seconds.clone() - deviation <= preferred_secs));
            constraints.push(constraint!(total_seconds.clone() + deviation >= preferred_secs));

            let percent_scale = 100.0 / preferred_secs;
            let weight = DEVIATION_OBJECTIVE_WEIGHT
                * percent_scale
                * employee.deviation_weight
                * employee.tenure_multiplier();
            deviation_terms.push(weight * deviation);
        }
    }

    // Preference satisfaction and unavailable-time penalties.
    let mut satisfaction_terms: Vec<Expression> = Vec::new();
    let mut unavailable_terms: Vec<Expression> = Vec::new();
    for info in &infos {
        let (_, employee) = employee_list[info.employee];
        let span = candidates[info.candidate].span;

        let satisfaction = employee.shift_preference(&span)
            * employee.preference_weight
            * employee.tenure_multiplier();
        if satisfaction != 0.0 {
            satisfaction_terms.push(satisfaction * info.var);
        }
        if !employee.is_available_for(&span) {
            unavailable_terms.push(span.seconds() as f64 * info.var);
        }
    }

    let deviation_total: Expression = deviation_terms.into_iter().sum();
    let satisfaction_total: Expression = satisfaction_terms.into_iter().sum();
    let unavailable_total: Expression = unavailable_terms.into_iter().sum();
    let objective =
        deviation_total - satisfaction_total + unavailable_total * UNAVAILABLE_OBJECTIVE_WEIGHT;

    debug!(
        "assignment model: {} variables, {} constraints",
        infos.len(),
        constraints.len()
    );

    let mut model = vars.minimise(objective).using(default_solver);
    for c in constraints {
        model = model.with(c);
    }

    match model.solve() {
        Ok(solution) => {
            let selections = infos
                .iter()
                .filter(|info| solution.value(info.var) > 0.5)
                .map(|info| Selection {
                    employee: employee_list[info.employee].0.clone(),
                    candidate: info.candidate,
                })
                .collect();
            Some(selections)
        }
        Err(ResolutionError::Infeasible) => {
            warn!("no feasible assignment covers every position; check staffing levels");
            None
        }
        Err(err) => {
            warn!("solver failed: {}", err);
            None
        }
    }
}
