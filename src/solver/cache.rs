//! Input-keyed memoization around the pure solve function.
//!
//! With a fixed seed the solver is deterministic, so identical inputs may
//! reuse an earlier result. The key is a SHA-256 digest of the canonical
//! JSON serialization of `(to_schedule, employees, params)`; employees live
//! in a `BTreeMap`, so the serialization is already order-canonical.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::config::SolveParams;
use crate::models::{CoverageRequirement, Employee, ScheduledShift};

/// A process-local memoization layer over [`super::create_schedule`].
#[derive(Debug, Default)]
pub struct CachedScheduler {
    entries: Mutex<HashMap<String, Option<Vec<ScheduledShift>>>>,
}

impl CachedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves, or returns the remembered result for identical inputs.
    pub fn create_schedule(
        &self,
        to_schedule: &[CoverageRequirement],
        employees: &BTreeMap<String, Employee>,
        params: &SolveParams,
    ) -> Option<Vec<ScheduledShift>> {
        let key = match cache_key(to_schedule, employees, params) {
            Some(key) => key,
            None => {
                // Serialization failing is not a reason to refuse to solve.
                warn!("could not derive a cache key; solving without the cache");
                return super::create_schedule(to_schedule, employees, params);
            }
        };

        {
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(result) = entries.get(&key) {
                debug!("schedule cache hit for {}", &key[..12]);
                return result.clone();
            }
        }

        let result = super::create_schedule(to_schedule, employees, params);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, result.clone());
        result
    }

    /// Number of remembered solves.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every remembered result.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

fn cache_key(
    to_schedule: &[CoverageRequirement],
    employees: &BTreeMap<String, Employee>,
    params: &SolveParams,
) -> Option<String> {
    let canonical = serde_json::to_vec(&(to_schedule, employees, params)).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Some(hex::encode(hasher.finalize()))
}
