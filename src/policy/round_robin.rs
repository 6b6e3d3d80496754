//! Round-Robin with a fixed quantum.

use tracing::trace;

use super::timeline::Timeline;
use super::SchedulingPolicy;
use crate::config::{SimConfig, DEFAULT_QUANTUM};
use crate::error::SchedError;
use crate::models::{JobTable, ReadyQueue, Schedule};

/// Preemptive time-slicing policy.
///
/// # Algorithm
/// A per-tick state machine. Each step:
///
/// 1. Enqueue every job that became ready by now, in table order.
/// 2. If nothing runs, take the queue head.
/// 3. If the running job has no work left, finish it and take the head.
/// 4. If it used a whole quantum, requeue it behind the jobs admitted in
///    step 1 and take the head.
/// 5. Run the selected job up to the next arrival, its completion or its
///    quantum boundary, whichever comes first.
///
/// Ticks in between change nothing, so skipping them yields the same
/// schedule as advancing one unit at a time. A step costs O(1) beyond
/// admission; a run takes O(n + Σ exec_time / quantum) steps, one per slice.
///
/// The ready queue holds at most one entry per unfinished job, so its
/// capacity is the job count.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a Round-Robin policy.
    ///
    /// `quantum` must be positive; `schedule` fails with
    /// `SchedError::InvalidConfig` otherwise.
    pub fn new(quantum: i64) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }

    fn schedule(&self, table: &JobTable) -> Result<Schedule, SchedError> {
        SimConfig::new().with_quantum(self.quantum).validate()?;

        let n = table.len();
        let mut timeline = Timeline::new(table);
        let mut queue = ReadyQueue::with_capacity(n);
        let mut admitted = 0;
        let mut running: Option<usize> = None;
        let mut slice_used = 0;
        let mut now = table.first_ready_time();

        loop {
            while admitted < n && table[admitted].is_ready_at(now) {
                queue.push(admitted)?;
                admitted += 1;
            }

            match running {
                None => running = queue.pop(),
                Some(index) if timeline.remaining(index) == 0 => {
                    timeline.finish(index, now);
                    if timeline.all_finished() {
                        break;
                    }
                    running = queue.pop();
                    slice_used = 0;
                }
                Some(index) if slice_used == self.quantum => {
                    trace!(job = %table[index].name, time = now, "quantum expired");
                    timeline.preempt(index, now);
                    queue.push(index)?;
                    running = queue.pop();
                    slice_used = 0;
                }
                Some(_) => {}
            }

            let Some(index) = running else {
                return Err(SchedError::NoEligibleJob { time: now });
            };

            timeline.dispatch(index, now);

            let mut step = timeline.remaining(index).min(self.quantum - slice_used);
            if let Some(next) = table.jobs().get(admitted) {
                step = step.min(next.ready_time - now);
            }
            now += step;
            timeline.consume(index, step);
            slice_used += step;
        }

        timeline.into_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventAction, JobSpec};

    fn run(quantum: i64, specs: Vec<JobSpec>) -> Result<Schedule, SchedError> {
        RoundRobin::new(quantum).schedule(&JobTable::new(specs).unwrap())
    }

    fn span(s: &Schedule, name: &str) -> (i64, i64) {
        let t = s.timing_for(name).unwrap();
        (t.start_time, t.finish_time)
    }

    fn slices(s: &Schedule, index: usize) -> Vec<(i64, i64)> {
        s.slices_for(index)
            .iter()
            .map(|sl| (sl.start, sl.end))
            .collect()
    }

    #[test]
    fn test_default_quantum_two_jobs() {
        let s = RoundRobin::default()
            .schedule(
                &JobTable::new(vec![JobSpec::new("A", 0, 700), JobSpec::new("B", 0, 300)])
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(span(&s, "A"), (0, 1000));
        assert_eq!(span(&s, "B"), (500, 800));
        assert_eq!(slices(&s, 0), vec![(0, 500), (800, 1000)]);
        assert_eq!(slices(&s, 1), vec![(500, 800)]);
    }

    #[test]
    fn test_admitted_jobs_queue_ahead_of_preempted() {
        // C arrives exactly when A's quantum expires: C is queued before A.
        let s = run(
            2,
            vec![
                JobSpec::new("A", 0, 4),
                JobSpec::new("B", 0, 2),
                JobSpec::new("C", 2, 1),
            ],
        )
        .unwrap();

        // A [0,2) → B [2,4) → C [4,5) → A [5,7)
        assert_eq!(span(&s, "A"), (0, 7));
        assert_eq!(span(&s, "B"), (2, 4));
        assert_eq!(span(&s, "C"), (4, 5));
        assert_eq!(slices(&s, 0), vec![(0, 2), (5, 7)]);
    }

    #[test]
    fn test_single_job_requeued_against_itself() {
        let s = run(3, vec![JobSpec::new("A", 5, 7)]).unwrap();
        assert_eq!(span(&s, "A"), (5, 12));
        assert_eq!(slices(&s, 0), vec![(5, 8), (8, 11), (11, 12)]);

        let actions: Vec<EventAction> = s.events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                EventAction::Start,
                EventAction::Preempt,
                EventAction::Resume,
                EventAction::Preempt,
                EventAction::Resume,
                EventAction::Finish,
            ]
        );
    }

    #[test]
    fn test_slices_never_exceed_quantum() {
        let s = run(
            4,
            vec![
                JobSpec::new("A", 0, 9),
                JobSpec::new("B", 1, 6),
                JobSpec::new("C", 3, 4),
            ],
        )
        .unwrap();
        assert!(s.slices.iter().all(|sl| sl.duration() <= 4));
        for index in 0..3 {
            assert_eq!(s.busy_time_for(index), s.timings[index].exec_time);
        }
    }

    #[test]
    fn test_job_finishing_at_quantum_boundary_is_not_requeued() {
        let s = run(3, vec![JobSpec::new("A", 0, 3), JobSpec::new("B", 0, 3)]).unwrap();
        assert_eq!(span(&s, "A"), (0, 3));
        assert_eq!(span(&s, "B"), (3, 6));
        assert_eq!(s.preemption_count(), 0);
    }

    #[test]
    fn test_non_positive_quantum_rejected() {
        let table =
            JobTable::new(vec![JobSpec::new("A", 0, 5), JobSpec::new("B", 0, 5)]).unwrap();
        for quantum in [0, -3] {
            let err = RoundRobin::new(quantum).schedule(&table).unwrap_err();
            assert!(matches!(err, SchedError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_arrival_mid_quantum_is_admitted_on_time() {
        // B arrives inside A's first quantum, C inside B's.
        let s = run(
            10,
            vec![
                JobSpec::new("A", 0, 15),
                JobSpec::new("B", 3, 12),
                JobSpec::new("C", 14, 2),
            ],
        )
        .unwrap();

        // A [0,10) → B [10,20) → A [20,25) → C [25,27) → B [27,29)
        assert_eq!(slices(&s, 0), vec![(0, 10), (20, 25)]);
        assert_eq!(slices(&s, 1), vec![(10, 20), (27, 29)]);
        assert_eq!(span(&s, "C"), (25, 27));
    }

    #[test]
    fn test_long_jobs_run_in_few_steps() {
        let quantum = 1_000_000_000_000;
        let s = run(quantum, vec![JobSpec::new("A", 0, 3 * quantum), JobSpec::new("B", 0, 1)])
            .unwrap();

        assert_eq!(span(&s, "B"), (quantum, quantum + 1));
        assert_eq!(span(&s, "A"), (0, 3 * quantum + 1));
        assert_eq!(
            slices(&s, 0),
            vec![
                (0, quantum),
                (quantum + 1, 2 * quantum + 1),
                (2 * quantum + 1, 3 * quantum + 1),
            ]
        );
    }

    #[test]
    fn test_idle_gap_is_an_error() {
        let err = run(500, vec![JobSpec::new("A", 0, 2), JobSpec::new("B", 10, 2)]).unwrap_err();
        assert_eq!(err, SchedError::NoEligibleJob { time: 2 });
    }
}
