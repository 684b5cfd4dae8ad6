//! Table parsers for the three CSV inputs.
//!
//! - **Preferences**: one row per employee with tenure, preferred hours and
//!   the optional preference columns.
//! - **Availability**: one row per employee, one column per calendar day.
//! - **To-fill**: one row per coverage requirement.
//!
//! Per-cell problems are logged and dropped; a missing required column or a
//! malformed CSV stream is a carrier-level error.

use std::collections::BTreeMap;
use std::io::Read;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use log::warn;

use crate::models::{CoverageRequirement, Employee, Preference, Tag};

use super::cell::{parse_cell, parse_day_header};

/// Gain applied to the tag mixin group, mirroring the weight the preference
/// assembly has always used.
const TAG_GROUP_GAIN: f64 = 7.0;

/// Day-agnostic cells ("Favored Hours") are parsed against this anchor and
/// immediately stripped back to times of day. Any fixed date works; it must
/// only be deterministic so identical inputs hash identically.
fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("static anchor date")
}

/// Case-insensitive header lookup.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn field<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .unwrap_or("")
}

fn parse_count(record: &StringRecord, index: Option<usize>, column: &str, who: &str) -> u32 {
    let raw = field(record, index);
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            warn!("ignoring unparseable {} '{}' for {}", column, raw, who);
            0
        }
    }
}

/// Parses the preferences table into the employee pool.
///
/// Availability and positions are filled in by [`parse_availability`]
/// afterwards; this pass owns tenure, hour targets, and the preference tree.
pub fn parse_preferences<R: Read>(reader: R) -> Result<BTreeMap<String, Employee>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .context("Failed to read preferences header row")?
        .clone();

    let idx_employee = column_index(&headers, "Employee")
        .context("Preferences table is missing the 'Employee' column")?;
    let idx_tenure = column_index(&headers, "Tenure")
        .context("Preferences table is missing the 'Tenure' column")?;
    let idx_preferred = column_index(&headers, "Preferred Hours")
        .context("Preferences table is missing the 'Preferred Hours' column")?;
    let idx_max_hours = column_index(&headers, "Employee Max Hours");
    let idx_favored = column_index(&headers, "Favored Hours");
    let idx_morning = column_index(&headers, "Morning Shifts");
    let idx_afternoon = column_index(&headers, "Afternoon Shifts");
    let idx_evening = column_index(&headers, "Evening Shifts");
    let idx_night = column_index(&headers, "Night Shifts");
    let idx_tags = column_index(&headers, "Tags");

    let mut employees = BTreeMap::new();
    for record in rdr.records() {
        let record = record.context("Failed to read preferences row")?;
        let name = field(&record, Some(idx_employee));
        if name.is_empty() {
            warn!("skipping preferences row with no employee name");
            continue;
        }

        let tenure_raw = field(&record, Some(idx_tenure));
        let tenure = if tenure_raw.is_empty() {
            0
        } else {
            match tenure_raw.parse::<u32>() {
                Ok(t) => t,
                Err(_) => {
                    warn!("ignoring unparseable tenure '{}' for {}", tenure_raw, name);
                    0
                }
            }
        };

        let preferred_raw = field(&record, Some(idx_preferred));
        let preferred_hours = if preferred_raw.is_empty() {
            0.0
        } else {
            match preferred_raw.parse::<f64>() {
                Ok(h) => h,
                Err(_) => {
                    warn!(
                        "ignoring unparseable preferred hours '{}' for {}",
                        preferred_raw, name
                    );
                    0.0
                }
            }
        };

        let maximum_hours = field(&record, idx_max_hours).parse::<f64>().ok();

        let mut children = Vec::new();

        let favored = field(&record, idx_favored);
        if !favored.is_empty() {
            let windows: Vec<_> = parse_cell(anchor_date(), favored)
                .iter()
                .map(|w| w.strip_date())
                .collect();
            if !windows.is_empty() {
                children.push(Preference::SpecificTod { windows });
            }
        }

        let morning = parse_count(&record, idx_morning, "morning shift count", name);
        let afternoon = parse_count(&record, idx_afternoon, "afternoon shift count", name);
        let evening = parse_count(&record, idx_evening, "evening shift count", name);
        let night = parse_count(&record, idx_night, "night shift count", name);
        if morning + afternoon + evening + night > 0 {
            children.push(Preference::relative_tod_from_counts(
                morning, afternoon, evening, night,
            ));
        }

        let tags_raw = field(&record, idx_tags);
        if !tags_raw.is_empty() {
            let mut mixins = Vec::new();
            for tag_name in tags_raw.split(',') {
                let tag_name = tag_name.trim();
                if tag_name.is_empty() {
                    continue;
                }
                match Tag::parse(tag_name) {
                    Some(tag) => mixins.push(Preference::Mixin { tag }),
                    None => warn!("ignoring unknown tag '{}' for {}", tag_name, name),
                }
            }
            if !mixins.is_empty() {
                children.push(Preference::Max {
                    children: mixins,
                    gain: TAG_GROUP_GAIN,
                });
            }
        }

        employees.insert(
            name.to_string(),
            Employee {
                preferences: Preference::Average { children },
                preferred_hours,
                maximum_hours,
                tenure,
                ..Employee::default()
            },
        );
    }
    Ok(employees)
}

/// Parses the availability table, filling in each employee's qualified
/// positions and dated availability windows.
///
/// Rows naming employees absent from the preferences table are skipped with
/// a diagnostic. Columns whose header is not a date are ignored.
pub fn parse_availability<R: Read>(
    reader: R,
    employees: &mut BTreeMap<String, Employee>,
) -> Result<()> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .context("Failed to read availability header row")?
        .clone();

    let idx_employee = column_index(&headers, "Employee")
        .context("Availability table is missing the 'Employee' column")?;
    let idx_positions = column_index(&headers, "Positions")
        .context("Availability table is missing the 'Positions' column")?;

    let day_columns: Vec<(usize, NaiveDate)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| parse_day_header(h).map(|day| (i, day)))
        .collect();
    if day_columns.is_empty() {
        warn!("availability table has no date columns");
    }

    for record in rdr.records() {
        let record = record.context("Failed to read availability row")?;
        let name = field(&record, Some(idx_employee));
        let Some(employee) = employees.get_mut(name) else {
            warn!("skipping availability row for unknown employee '{}'", name);
            continue;
        };

        employee.positions = field(&record, Some(idx_positions))
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        let mut availability = Vec::new();
        for &(col, day) in &day_columns {
            let cell = record.get(col).unwrap_or("");
            if cell.trim().is_empty() {
                continue;
            }
            availability.extend(parse_cell(day, cell));
        }
        availability.sort();
        availability.dedup();
        employee.availability = availability;
    }
    Ok(())
}

/// Parses the to-fill table into the list of coverage requirements.
///
/// Each window in a row's `Hours` cell becomes its own requirement, so one
/// row can open several independent slots of the same position.
pub fn parse_to_fill<R: Read>(reader: R) -> Result<Vec<CoverageRequirement>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .context("Failed to read to-fill header row")?
        .clone();

    let idx_position = column_index(&headers, "Position")
        .context("To-fill table is missing the 'Position' column")?;
    let idx_date = column_index(&headers, "Date")
        .context("To-fill table is missing the 'Date' column")?;
    let idx_hours = column_index(&headers, "Hours")
        .context("To-fill table is missing the 'Hours' column")?;

    let mut to_fill = Vec::new();
    for record in rdr.records() {
        let record = record.context("Failed to read to-fill row")?;
        let position = field(&record, Some(idx_position));
        if position.is_empty() {
            warn!("skipping to-fill row with no position");
            continue;
        }
        let date_raw = field(&record, Some(idx_date));
        let Some(day) = parse_day_header(date_raw) else {
            warn!(
                "skipping to-fill row for '{}' with unparseable date '{}'",
                position, date_raw
            );
            continue;
        };
        for window in parse_cell(day, field(&record, Some(idx_hours))) {
            to_fill.push(CoverageRequirement::new(position, window));
        }
    }
    Ok(to_fill)
}
