//! Employee records.

use std::collections::BTreeSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::preference::Preference;
use super::timespan::Timespan;

/// A member of the staff pool.
///
/// Parsed once from the input tables at the start of a solve and immutable
/// while solving. The `positions` set holds the position names the employee
/// is qualified for; `availability` holds the dated windows they can work.
///
/// `preference_weight` scales how much the employee's shift preferences
/// contribute to the objective, `deviation_weight` scales how much their
/// deviation from preferred weekly hours costs. Tenure multiplies both, so a
/// senior employee's preferences carry more weight while their hours are
/// also held closer to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub positions: BTreeSet<String>,
    pub availability: Vec<Timespan>,
    pub preferences: Preference,
    /// Hours the employee prefers to work in a week.
    pub preferred_hours: f64,
    /// Per-employee weekly cap, tightening the global one when set.
    pub maximum_hours: Option<f64>,
    pub tenure: u32,
    pub preference_weight: f64,
    pub deviation_weight: f64,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            positions: BTreeSet::new(),
            availability: Vec::new(),
            preferences: Preference::Average { children: vec![] },
            preferred_hours: 0.0,
            maximum_hours: None,
            tenure: 0,
            preference_weight: 1.0,
            deviation_weight: 1.0,
        }
    }
}

impl Employee {
    /// True when the employee may staff the named position.
    pub fn qualified_for(&self, position: &str) -> bool {
        self.positions.contains(position.trim())
    }

    /// True when some availability window contains the whole shift.
    ///
    /// Containment is inclusive at both endpoints, unlike the strict overlap
    /// test used elsewhere; a shift ending exactly when availability ends is
    /// still workable.
    pub fn is_available_for(&self, shift: &Timespan) -> bool {
        self.availability.iter().any(|window| window.contains(shift))
    }

    /// Scores a candidate shift for this employee.
    ///
    /// The preference tree does the bulk of the work; on top of it, shifts of
    /// two hours or less are docked one point, since nobody likes coming in
    /// for a short block.
    pub fn shift_preference(&self, shift: &Timespan) -> f64 {
        let mut satisfaction = self.preferences.score(shift);
        if shift.length() <= Duration::hours(2) {
            satisfaction -= 1.0;
        }
        satisfaction
    }

    /// `tenure + 1`, the priority multiplier applied to both satisfaction
    /// and deviation terms.
    pub fn tenure_multiplier(&self) -> f64 {
        (self.tenure + 1) as f64
    }
}
