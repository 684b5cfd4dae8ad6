//! Parsers for the three tabular inputs.
//!
//! The availability and to-fill tables carry free-form time windows in their
//! cells; [`cell`] owns that micro-format. [`tables`] assembles whole tables
//! into the domain model. Per-cell problems are logged and dropped, never
//! escalated; only carrier-level failures (unreadable CSV, missing required
//! columns) surface as errors.

pub mod cell;
pub mod tables;

pub use cell::{parse_cell, parse_clock_time, parse_day_header, render_windows};
pub use tables::{parse_availability, parse_preferences, parse_to_fill};
