//! Job table.
//!
//! The ordered collection every policy reads. Built once from the input
//! declarations, validated, then sorted by [`Job::arrival_order`].

use serde::Serialize;
use std::ops::Index;

use super::{Job, JobSpec};
use crate::error::SchedError;
use crate::validation::validate_jobs;

/// Validated job batch in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    /// Builds the table from declarations in input order.
    ///
    /// # Errors
    /// `SchedError::Validation` with every detected problem if the batch is
    /// empty, has duplicate names, negative ready times, or non-positive
    /// execution times.
    pub fn new(specs: Vec<JobSpec>) -> Result<Self, SchedError> {
        validate_jobs(&specs).map_err(SchedError::Validation)?;

        let mut jobs: Vec<Job> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Job::from_spec(spec, index))
            .collect();
        jobs.sort_by(Job::arrival_order);

        Ok(Self { jobs })
    }

    /// Number of jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false for a validated table; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in canonical order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Iterates jobs in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Ready time of the first job, where every policy starts its clock.
    pub fn first_ready_time(&self) -> i64 {
        self.jobs.first().map(|j| j.ready_time).unwrap_or(0)
    }

    /// Number of leading jobs that are ready at `now`.
    ///
    /// Equivalently, the index of the first job not yet arrived.
    pub fn ready_count(&self, now: i64) -> usize {
        self.jobs.partition_point(|j| j.is_ready_at(now))
    }

    /// Finds a job's table index by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.jobs.iter().position(|j| j.name == name)
    }
}

impl Index<usize> for JobTable {
    type Output = Job;

    fn index(&self, index: usize) -> &Job {
        &self.jobs[index]
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
