//! # Shiftforge
//!
//! Staff shift-assignment engine.
//!
//! Given a set of positions that must be continuously covered over a range of
//! days and a pool of employees with per-day availability windows, position
//! qualifications, preferred weekly hours, and preference profiles, this crate
//! produces an assignment of employees to time-bounded shifts that covers
//! every position at every instant while optimizing a composite objective
//! trading off deviation from preferred hours against shift-preference
//! satisfaction.
//!
//! ## Features
//!
//! - **Data Loading**: Parse the preference, availability, and to-fill tables
//!   from CSV
//! - **Domain Model**: Interval algebra over wall-clock and time-of-day spans,
//!   composable preference scoring, employee records
//! - **Shift Enumeration**: Hour-aligned candidate shifts clipped to each
//!   coverage window
//! - **Optimization**: Integer-programming model with continuous-coverage,
//!   non-overlap, daily, and weekly constraints solved through `good_lp`
//! - **Caching**: Input-keyed memoization around the pure solve function
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Core domain types (timespans, preferences, employees,
//!   coverage requirements)
//! - [`parsing`]: Cell and table parsers for the three tabular inputs
//! - [`io`]: File-level CSV loaders wrapping the parsers
//! - [`solver`]: Shift enumeration, model building, solving, and the
//!   memoization layer
//! - [`config`]: Solve parameters with TOML file support

pub mod config;
pub mod io;
pub mod models;
pub mod parsing;
pub mod solver;

pub use config::SolveParams;
pub use solver::create_schedule;
