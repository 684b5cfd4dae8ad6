//! Core domain types for shift scheduling.

pub mod employee;
pub mod preference;
pub mod requirement;
pub mod timespan;

pub use employee::Employee;
pub use preference::{Preference, Tag};
pub use requirement::{CandidateShift, CoverageRequirement, ScheduledShift};
pub use timespan::{ClockSpan, Timespan, TimespanError};
