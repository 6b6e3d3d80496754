//! Shortest-Job-First (non-preemptive).

use tracing::trace;

use super::timeline::Timeline;
use super::SchedulingPolicy;
use crate::error::SchedError;
use crate::models::{JobTable, Schedule};

/// Non-preemptive shortest-job policy.
///
/// # Algorithm
/// One decision per job. At each decision point (start, or a job just
/// finished) pick, among the not-started jobs ready by now, the one with the
/// smallest execution time; the first in table order wins ties. It runs to
/// completion.
///
/// # Reference
/// Silberschatz et al., "Operating System Concepts", Ch. 5.3.2
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First"
    }

    fn schedule(&self, table: &JobTable) -> Result<Schedule, SchedError> {
        let mut timeline = Timeline::new(table);
        let mut now = table.first_ready_time();

        for _ in 0..table.len() {
            // min_by_key keeps the first of several equal minima.
            let index = (0..table.ready_count(now))
                .filter(|&i| !timeline.is_started(i))
                .min_by_key(|&i| table[i].exec_time)
                .ok_or(SchedError::NoEligibleJob { time: now })?;

            trace!(job = %table[index].name, time = now, "shortest ready job chosen");
            timeline.dispatch(index, now);
            now += table[index].exec_time;
            timeline.finish(index, now);
        }

        timeline.into_schedule()
    }
}
