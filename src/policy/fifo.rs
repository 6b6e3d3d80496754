//! First-In-First-Out.
//!
//! Jobs run to completion strictly in table order.

use tracing::warn;

use super::timeline::Timeline;
use super::SchedulingPolicy;
use crate::error::SchedError;
use crate::models::{JobTable, Schedule};

/// Non-preemptive arrival-order policy.
///
/// The clock starts at the first job's ready time and each job starts the
/// moment its predecessor finishes. A job that arrives after its
/// predecessor finished still starts at that finish time: arrival gaps are
/// not modeled, only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl SchedulingPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn description(&self) -> &'static str {
        "First-In-First-Out"
    }

    fn schedule(&self, table: &JobTable) -> Result<Schedule, SchedError> {
        let mut timeline = Timeline::new(table);
        let mut now = table.first_ready_time();

        for (index, job) in table.iter().enumerate() {
            if !job.is_ready_at(now) {
                warn!(
                    job = %job.name,
                    ready_time = job.ready_time,
                    time = now,
                    "job arrives after its predecessor finished, arrival gap ignored"
                );
            }
            timeline.dispatch(index, now);
            now += job.exec_time;
            timeline.finish(index, now);
        }

        timeline.into_schedule()
    }
}
