//! Solve parameters.
//!
//! Every tunable of the engine lives here, with defaults matching the
//! reference deployment. Parameters can be deserialized from a TOML file so
//! operators can tune shift lengths or caps without rebuilding.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a single solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveParams {
    /// Wall-clock budget for the backend, in seconds. Applied where the
    /// selected backend supports a deadline; the bundled pure-Rust backend is
    /// deterministic and finishes the bounded models well inside this.
    #[serde(default = "default_solver_max_time_secs")]
    pub solver_max_time_secs: f64,
    /// Random seed handed to the backend when it accepts one. The bundled
    /// backend is deterministic without it.
    #[serde(default)]
    pub solver_seed: u64,
    /// Global weekly hour cap per employee.
    #[serde(default = "default_max_hours_per_week")]
    pub max_hours_per_week: f64,
    /// Legal shift lengths, in whole hours.
    #[serde(default = "default_shift_lengths")]
    pub shift_lengths: Vec<u32>,
    /// Shifts shorter than this many hours are never generated, including
    /// the clipped remainders at the end of a coverage window.
    #[serde(default = "default_absolute_shift_minimum_length")]
    pub absolute_shift_minimum_length: f64,
    /// Cap on the number of shifts one employee works in one day.
    #[serde(default = "default_max_shifts_per_day")]
    pub max_shifts_per_day: u32,
    /// Require at least one shift for every employee that has any candidate.
    #[serde(default)]
    pub min_one_shift_per_employee: bool,
    /// Spacing of candidate start hours, in whole hours.
    #[serde(default = "default_shift_granularity")]
    pub shift_granularity: u32,
    /// Spacing of the coverage sampling instants, in minutes.
    #[serde(default = "default_sampling_interval_mins")]
    pub sampling_interval_mins: u32,
}

fn default_solver_max_time_secs() -> f64 {
    10.0
}

fn default_max_hours_per_week() -> f64 {
    18.0
}

fn default_shift_lengths() -> Vec<u32> {
    vec![3, 4]
}

fn default_absolute_shift_minimum_length() -> f64 {
    2.5
}

fn default_max_shifts_per_day() -> u32 {
    1
}

fn default_shift_granularity() -> u32 {
    1
}

fn default_sampling_interval_mins() -> u32 {
    5
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            solver_max_time_secs: default_solver_max_time_secs(),
            solver_seed: 0,
            max_hours_per_week: default_max_hours_per_week(),
            shift_lengths: default_shift_lengths(),
            absolute_shift_minimum_length: default_absolute_shift_minimum_length(),
            max_shifts_per_day: default_max_shifts_per_day(),
            min_one_shift_per_employee: false,
            shift_granularity: default_shift_granularity(),
            sampling_interval_mins: default_sampling_interval_mins(),
        }
    }
}

impl SolveParams {
    /// Parses parameters from a TOML document; omitted keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse solve parameters")
    }

    /// Loads parameters from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    /// Longest legal shift length in hours; zero when none are configured.
    pub fn max_shift_length(&self) -> u32 {
        self.shift_lengths.iter().copied().max().unwrap_or(0)
    }
}
