//! Job model.
//!
//! A job is one unit of schedulable work on a single core: it becomes
//! eligible at its ready time and must occupy the core for its execution
//! time.
//!
//! # Time Representation
//! All times are integer simulated time units relative to t=0. The
//! consumer defines what one unit means.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A job as declared in the input, before it is placed in a `JobTable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Identifier, unique within a run.
    pub name: String,
    /// Earliest time the job may run.
    pub ready_time: i64,
    /// Total time the job must occupy the core.
    pub exec_time: i64,
}

impl JobSpec {
    /// Creates a job declaration.
    pub fn new(name: impl Into<String>, ready_time: i64, exec_time: i64) -> Self {
        Self {
            name: name.into(),
            ready_time,
            exec_time,
        }
    }
}

/// A job placed in a `JobTable`.
///
/// Immutable once the table is built. The per-run status (remaining work,
/// start and finish times) lives in [`JobProgress`], owned by the policy
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Identifier, unique within a run.
    pub name: String,
    /// Earliest time the job may run.
    pub ready_time: i64,
    /// Total time the job must occupy the core.
    pub exec_time: i64,
    /// Position in the input declaration order (tie-break key).
    pub arrival_index: usize,
}

impl Job {
    /// Creates a job from its declaration and declaration position.
    pub fn from_spec(spec: JobSpec, arrival_index: usize) -> Self {
        Self {
            name: spec.name,
            ready_time: spec.ready_time,
            exec_time: spec.exec_time,
            arrival_index,
        }
    }

    /// Canonical ordering: ready time ascending, then declaration order.
    ///
    /// Every policy relies on this order, both for the table itself and for
    /// scanning "all jobs ready by now".
    pub fn arrival_order(a: &Job, b: &Job) -> Ordering {
        a.ready_time
            .cmp(&b.ready_time)
            .then_with(|| a.arrival_index.cmp(&b.arrival_index))
    }

    /// Whether the job is eligible at `now`.
    #[inline]
    pub fn is_ready_at(&self, now: i64) -> bool {
        self.ready_time <= now
    }
}

/// Scheduling status of one job during a single policy run.
///
/// Transitions `not started → started → finished` and never backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    /// Work still to be done. Decremented by preemptive policies.
    pub remaining: i64,
    /// Time of first dispatch.
    pub start_time: Option<i64>,
    /// Time the remaining work reached zero.
    pub finish_time: Option<i64>,
}

impl JobProgress {
    /// Fresh status for a job that has not run yet.
    pub fn new(job: &Job) -> Self {
        Self {
            remaining: job.exec_time,
            start_time: None,
            finish_time: None,
        }
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Records the start time on first dispatch only.
    ///
    /// Returns `true` if this call started the job.
    pub fn mark_started(&mut self, now: i64) -> bool {
        if self.is_started() {
            return false;
        }
        self.start_time = Some(now);
        true
    }

    /// Records completion at `now`. The job must have been started.
    pub fn mark_finished(&mut self, now: i64) {
        debug_assert!(self.is_started(), "finishing a job that never started");
        debug_assert!(!self.is_finished(), "finishing a job twice");
        self.remaining = 0;
        self.finish_time = Some(now);
    }
}
