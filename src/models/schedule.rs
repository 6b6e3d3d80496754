//! Schedule (result) model.
//!
//! A schedule records when every job of a `JobTable` started and finished,
//! every contiguous interval it occupied the core, and the ordered decision
//! stream that produced those intervals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Start and finish of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTiming {
    /// Job name.
    pub name: String,
    /// Declared ready time.
    pub ready_time: i64,
    /// Declared execution time.
    pub exec_time: i64,
    /// First dispatch.
    pub start_time: i64,
    /// Completion.
    pub finish_time: i64,
}

impl JobTiming {
    /// Same timing with both instants shifted back by `origin`.
    pub fn shifted(&self, origin: i64) -> Self {
        Self {
            start_time: self.start_time - origin,
            finish_time: self.finish_time - origin,
            ..self.clone()
        }
    }

    /// Finish minus start.
    #[inline]
    pub fn span(&self) -> i64 {
        self.finish_time - self.start_time
    }
}

/// A contiguous interval `[start, end)` during which one job held the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Index into the `JobTable`.
    pub job_index: usize,
    pub start: i64,
    pub end: i64,
}

impl Slice {
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether the slice covers instant `t`.
    #[inline]
    pub fn covers(&self, t: i64) -> bool {
        self.start <= t && t < self.end
    }
}

/// What a scheduling decision does to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// First dispatch of the job.
    Start,
    /// Dispatch of a job that ran before and was preempted.
    Resume,
    /// The running job gives up the core with work remaining.
    Preempt,
    /// The job's remaining work reached zero.
    Finish,
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventAction::Start => write!(f, "start"),
            EventAction::Resume => write!(f, "resume"),
            EventAction::Preempt => write!(f, "preempt"),
            EventAction::Finish => write!(f, "finish"),
        }
    }
}

/// One entry of the replayable decision stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Index into the `JobTable`.
    pub job_index: usize,
    pub action: EventAction,
    /// Simulated time of the decision.
    pub time: i64,
}

impl ScheduleEvent {
    pub fn new(job_index: usize, action: EventAction, time: i64) -> Self {
        Self {
            job_index,
            action,
            time,
        }
    }
}

/// A complete single-core schedule.
///
/// `timings` is aligned with the `JobTable` it was computed from;
/// `slices` and `events` are in time order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub timings: Vec<JobTiming>,
    pub slices: Vec<Slice>,
    pub events: Vec<ScheduleEvent>,
}

impl Schedule {
    /// Earliest start across all jobs.
    pub fn min_start_time(&self) -> Option<i64> {
        self.timings.iter().map(|t| t.start_time).min()
    }

    /// Timings shifted so the earliest start becomes zero.
    pub fn relative(&self) -> Vec<JobTiming> {
        let origin = self.min_start_time().unwrap_or(0);
        self.timings.iter().map(|t| t.shifted(origin)).collect()
    }

    /// Latest finish across all jobs.
    pub fn makespan(&self) -> i64 {
        self.timings.iter().map(|t| t.finish_time).max().unwrap_or(0)
    }

    /// Timing of a job by name.
    pub fn timing_for(&self, name: &str) -> Option<&JobTiming> {
        self.timings.iter().find(|t| t.name == name)
    }

    /// Slices of one job in time order.
    pub fn slices_for(&self, job_index: usize) -> Vec<&Slice> {
        self.slices
            .iter()
            .filter(|s| s.job_index == job_index)
            .collect()
    }

    /// Total time a job held the core.
    pub fn busy_time_for(&self, job_index: usize) -> i64 {
        self.slices_for(job_index).iter().map(|s| s.duration()).sum()
    }

    /// Job names in the order they were first dispatched.
    pub fn start_order(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.action == EventAction::Start)
            .filter_map(|e| self.timings.get(e.job_index))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Number of preemptions across all jobs.
    pub fn preemption_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.action == EventAction::Preempt)
            .count()
    }
}
