//! Input validation for job batches.
//!
//! Checks structural integrity of the declared jobs before a `JobTable` is
//! built. Detects:
//! - Empty batches
//! - Duplicate job names
//! - Negative ready times
//! - Non-positive execution times
//! - Batches whose completion horizon does not fit the clock type
//!
//! Reachability of ready times (whether the clock can get there) is a
//! property of the policy, not of the batch, and is reported by the policy
//! itself.

use crate::models::JobSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The batch has no jobs.
    EmptyBatch,
    /// Two jobs share the same name.
    DuplicateName,
    /// A job becomes ready before t=0.
    NegativeReadyTime,
    /// A job requires zero or negative execution time.
    NonPositiveExecTime,
    /// Latest ready time plus total execution time overflows `i64`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a job batch.
///
/// Checks:
/// 1. At least one job
/// 2. No duplicate names
/// 3. Every ready time is ≥ 0
/// 4. Every execution time is > 0
/// 5. `max ready_time + Σ exec_time` fits in `i64`, which bounds every
///    clock value a policy can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[JobSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    if jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyBatch,
            "Job batch is empty",
        ));
    }

    let mut names = HashSet::new();
    for job in jobs {
        if !names.insert(job.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate job name: {}", job.name),
            ));
        }

        if job.ready_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeReadyTime,
                format!("Job '{}' has negative ready time {}", job.name, job.ready_time),
            ));
        }

        if job.exec_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveExecTime,
                format!(
                    "Job '{}' has non-positive execution time {}",
                    job.name, job.exec_time
                ),
            ));
        }
    }

    if errors.is_empty() && completion_horizon(jobs).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest ready time plus total execution time exceeds the clock range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on any clock value: no policy idles past the last arrival.
fn completion_horizon(jobs: &[JobSpec]) -> Option<i64> {
    let latest_ready = jobs.iter().map(|j| j.ready_time).max().unwrap_or(0);
    jobs.iter().try_fold(latest_ready, |acc, j| acc.checked_add(j.exec_time))
}
