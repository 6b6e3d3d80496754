//! Preemptive Shortest-Job-First (shortest remaining time).

use tracing::trace;

use super::timeline::Timeline;
use super::SchedulingPolicy;
use crate::error::SchedError;
use crate::models::{JobTable, Schedule};

/// Preemptive shortest-remaining-time policy.
///
/// # Algorithm
/// Decisions happen only at completions and arrivals, never per tick:
///
/// 1. Among unfinished jobs ready by now, pick the one with the smallest
///    remaining time (first in table order wins ties).
/// 2. If no later arrival exists, or the candidate finishes before the
///    next arrival, run it to completion.
/// 3. Otherwise run it until the next arrival and decide again. The new
///    arrival takes over only if the scan now picks it.
///
/// Switching is free and remaining work is preserved across preemptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psjf;

impl SchedulingPolicy for Psjf {
    fn name(&self) -> &'static str {
        "PSJF"
    }

    fn description(&self) -> &'static str {
        "Preemptive Shortest-Job-First"
    }

    fn schedule(&self, table: &JobTable) -> Result<Schedule, SchedError> {
        let mut timeline = Timeline::new(table);
        let mut now = table.first_ready_time();

        while !timeline.all_finished() {
            let next_arrival = table.ready_count(now);
            let index = (0..next_arrival)
                .filter(|&i| !timeline.is_finished(i))
                .min_by_key(|&i| timeline.remaining(i))
                .ok_or(SchedError::NoEligibleJob { time: now })?;

            timeline.dispatch(index, now);
            let remaining = timeline.remaining(index);

            match table.jobs().get(next_arrival) {
                Some(next) if remaining > next.ready_time - now => {
                    trace!(
                        job = %table[index].name,
                        time = now,
                        until = next.ready_time,
                        "running until next arrival"
                    );
                    timeline.consume(index, next.ready_time - now);
                    now = next.ready_time;
                }
                _ => {
                    now += remaining;
                    timeline.finish(index, now);
                }
            }
        }

        timeline.into_schedule()
    }
}
