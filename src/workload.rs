//! Random job batch generation.
//!
//! Produces *dense* batches: the gap between consecutive arrivals never
//! exceeds the shortest possible execution time. Under any policy the clock
//! then always has a ready job at each decision point, so generated batches
//! schedule without `NoEligibleJob` errors.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::JobSpec;

/// Shape of a generated batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of jobs.
    pub job_count: usize,
    /// Shortest execution time (inclusive, ≥ 1).
    pub min_exec: i64,
    /// Longest execution time (inclusive).
    pub max_exec: i64,
    /// Largest gap between consecutive arrivals. Clamped to `min_exec`.
    pub max_gap: i64,
    /// Latest ready time of the first job.
    pub first_ready_max: i64,
}

impl WorkloadConfig {
    /// Creates a config for `job_count` jobs with execution times 1..=10
    /// arriving at most one unit apart.
    pub fn new(job_count: usize) -> Self {
        Self {
            job_count,
            min_exec: 1,
            max_exec: 10,
            max_gap: 1,
            first_ready_max: 0,
        }
    }

    /// Sets the execution time range (inclusive).
    pub fn with_exec_range(mut self, min_exec: i64, max_exec: i64) -> Self {
        self.min_exec = min_exec;
        self.max_exec = max_exec;
        self
    }

    /// Sets the largest gap between consecutive arrivals.
    pub fn with_max_gap(mut self, max_gap: i64) -> Self {
        self.max_gap = max_gap;
        self
    }

    /// Sets the latest ready time of the first job.
    pub fn with_first_ready_max(mut self, first_ready_max: i64) -> Self {
        self.first_ready_max = first_ready_max;
        self
    }

    fn exec_bounds(&self) -> (i64, i64) {
        let min = self.min_exec.max(1);
        (min, self.max_exec.max(min))
    }

    fn gap_bound(&self) -> i64 {
        self.max_gap.clamp(0, self.exec_bounds().0)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Generates a dense batch named `P1`, `P2`, ... in arrival order.
pub fn generate<R: Rng>(rng: &mut R, config: &WorkloadConfig) -> Vec<JobSpec> {
    let (min_exec, max_exec) = config.exec_bounds();
    let max_gap = config.gap_bound();
    let mut ready = rng.random_range(0..=config.first_ready_max.max(0));

    (0..config.job_count)
        .map(|i| {
            if i > 0 {
                ready += rng.random_range(0..=max_gap);
            }
            let exec = rng.random_range(min_exec..=max_exec);
            JobSpec::new(format!("P{}", i + 1), ready, exec)
        })
        .collect()
}
