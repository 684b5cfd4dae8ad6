//! Coverage requirements and schedule output types.

use serde::{Deserialize, Serialize};

use super::timespan::Timespan;

/// One position slot that must be continuously staffed over `window`.
///
/// The slot's identity is its index in the solve input, so two rows naming
/// the same position are two independent slots that can be staffed by two
/// different people at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRequirement {
    pub position: String,
    pub window: Timespan,
}

impl CoverageRequirement {
    pub fn new(position: impl Into<String>, window: Timespan) -> Self {
        Self {
            position: position.into(),
            window,
        }
    }
}

/// One enumerated atomic block that could staff requirement `requirement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateShift {
    /// Index of the requirement this shift would staff.
    pub requirement: usize,
    pub span: Timespan,
}

/// One assigned shift in a returned schedule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScheduledShift {
    pub employee: String,
    pub position: String,
    pub span: Timespan,
}
