//! Executor boundary.
//!
//! A schedule can drive something outside the simulator, such as real
//! worker processes whose priority is raised on `start`/`resume` and lowered
//! on `preempt`. The core never re-derives decisions for such an executor:
//! it hands over the ordered [`ScheduleEvent`] stream through [`replay`].
//!
//! Two host facilities are abstracted as traits:
//! - [`Clock`]: current monotonic time
//! - [`TraceSink`]: record a `(subject, start, finish)` tuple
//!
//! [`TraceExecutor`] combines both into a dry-run executor that timestamps
//! every job and records one trace tuple per finished job.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::trace;

use crate::models::{EventAction, Job, JobTable, Schedule, ScheduleEvent};

/// Source of the current time.
pub trait Clock {
    /// Current time in the clock's unit.
    fn now(&self) -> i64;

    /// Called with the simulated time of each event before it is applied.
    fn observe(&mut self, _simulated: i64) {}
}

/// Host monotonic clock, in nanoseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Clock that reads the simulated time of the event being replayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedClock {
    now: i64,
}

impl Clock for SimulatedClock {
    fn now(&self) -> i64 {
        self.now
    }

    fn observe(&mut self, simulated: i64) {
        self.now = simulated;
    }
}

/// Destination for per-job trace tuples.
pub trait TraceSink {
    fn record(&mut self, subject: &str, start: i64, finish: i64);
}

/// One trace tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub subject: String,
    pub start: i64,
    pub finish: i64,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.start, self.finish)
    }
}

/// In-memory trace sink.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    pub records: Vec<TraceRecord>,
}

impl TraceSink for TraceLog {
    fn record(&mut self, subject: &str, start: i64, finish: i64) {
        self.records.push(TraceRecord {
            subject: subject.to_string(),
            start,
            finish,
        });
    }
}

/// Consumer of the decision stream.
pub trait Executor {
    type Error;

    /// Applies one decision to `job`.
    fn apply(&mut self, job: &Job, event: &ScheduleEvent) -> Result<(), Self::Error>;
}

/// Feeds every event of `schedule` to `executor` in order.
///
/// Returns the number of events applied. Stops at the first executor error.
pub fn replay<E: Executor>(
    table: &JobTable,
    schedule: &Schedule,
    executor: &mut E,
) -> Result<usize, E::Error> {
    for event in &schedule.events {
        executor.apply(&table[event.job_index], event)?;
    }
    Ok(schedule.events.len())
}

/// Inconsistent event stream seen by a [`TraceExecutor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("job '{0}' started twice")]
    DuplicateStart(String),
    #[error("job '{0}' finished without starting")]
    FinishBeforeStart(String),
}

/// Dry-run executor: timestamps jobs with a [`Clock`] and records one
/// [`TraceSink`] tuple per finished job.
#[derive(Debug)]
pub struct TraceExecutor<C, S> {
    clock: C,
    sink: S,
    started: HashMap<usize, i64>,
}

impl<C: Clock, S: TraceSink> TraceExecutor<C, S> {
    pub fn new(clock: C, sink: S) -> Self {
        Self {
            clock,
            sink,
            started: HashMap::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<C: Clock, S: TraceSink> Executor for TraceExecutor<C, S> {
    type Error = ReplayError;

    fn apply(&mut self, job: &Job, event: &ScheduleEvent) -> Result<(), ReplayError> {
        self.clock.observe(event.time);
        let now = self.clock.now();

        match event.action {
            EventAction::Start => {
                if self.started.insert(event.job_index, now).is_some() {
                    return Err(ReplayError::DuplicateStart(job.name.clone()));
                }
            }
            EventAction::Finish => {
                let start = self
                    .started
                    .get(&event.job_index)
                    .copied()
                    .ok_or_else(|| ReplayError::FinishBeforeStart(job.name.clone()))?;
                self.sink.record(&job.name, start, now);
            }
            EventAction::Resume | EventAction::Preempt => {}
        }

        trace!(job = %job.name, action = %event.action, time = now, "replayed");
        Ok(())
    }
}
