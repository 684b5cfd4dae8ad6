//! File-level loaders for the three CSV inputs.
//!
//! Thin wrappers over [`crate::parsing`] that open files and attach path
//! context to carrier-level failures.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{CoverageRequirement, Employee};
use crate::parsing::{parse_availability, parse_preferences, parse_to_fill};

/// Loads the employee pool from the preferences and availability CSVs.
pub fn load_employees<P: AsRef<Path>, Q: AsRef<Path>>(
    preferences_path: P,
    availability_path: Q,
) -> Result<BTreeMap<String, Employee>> {
    let preferences = File::open(preferences_path.as_ref()).with_context(|| {
        format!(
            "Failed to open preferences file {}",
            preferences_path.as_ref().display()
        )
    })?;
    let mut employees = parse_preferences(preferences).with_context(|| {
        format!(
            "Failed to parse preferences file {}",
            preferences_path.as_ref().display()
        )
    })?;

    let availability = File::open(availability_path.as_ref()).with_context(|| {
        format!(
            "Failed to open availability file {}",
            availability_path.as_ref().display()
        )
    })?;
    parse_availability(availability, &mut employees).with_context(|| {
        format!(
            "Failed to parse availability file {}",
            availability_path.as_ref().display()
        )
    })?;

    Ok(employees)
}

/// Loads the coverage requirements from the to-fill CSV.
pub fn load_to_fill<P: AsRef<Path>>(path: P) -> Result<Vec<CoverageRequirement>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open to-fill file {}", path.as_ref().display()))?;
    parse_to_fill(file)
        .with_context(|| format!("Failed to parse to-fill file {}", path.as_ref().display()))
}
