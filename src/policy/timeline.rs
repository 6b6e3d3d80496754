//! Per-run bookkeeping shared by all policies.
//!
//! A `Timeline` owns the mutable status of every job for one policy
//! invocation and turns dispatch/preempt/finish decisions into run slices
//! and the replayable event stream.

use tracing::trace;

use crate::error::SchedError;
use crate::models::{
    EventAction, JobProgress, JobTable, JobTiming, Schedule, ScheduleEvent, Slice,
};

pub(crate) struct Timeline<'a> {
    table: &'a JobTable,
    progress: Vec<JobProgress>,
    slices: Vec<Slice>,
    events: Vec<ScheduleEvent>,
    // (job index, slice start)
    running: Option<(usize, i64)>,
    finished: usize,
}

impl<'a> Timeline<'a> {
    pub(crate) fn new(table: &'a JobTable) -> Self {
        Self {
            table,
            progress: table.iter().map(JobProgress::new).collect(),
            slices: Vec::new(),
            events: Vec::new(),
            running: None,
            finished: 0,
        }
    }

    #[inline]
    pub(crate) fn remaining(&self, index: usize) -> i64 {
        self.progress[index].remaining
    }

    #[inline]
    pub(crate) fn is_started(&self, index: usize) -> bool {
        self.progress[index].is_started()
    }

    #[inline]
    pub(crate) fn is_finished(&self, index: usize) -> bool {
        self.progress[index].is_finished()
    }

    #[inline]
    pub(crate) fn all_finished(&self) -> bool {
        self.finished == self.progress.len()
    }

    /// Gives the core to `index` at `now`.
    ///
    /// No-op if it already holds the core. Any other running job is
    /// preempted first.
    pub(crate) fn dispatch(&mut self, index: usize, now: i64) {
        match self.running {
            Some((current, _)) if current == index => return,
            Some((current, _)) => self.preempt(current, now),
            None => {}
        }

        let action = if self.progress[index].mark_started(now) {
            EventAction::Start
        } else {
            EventAction::Resume
        };
        self.record(index, action, now);
        self.running = Some((index, now));
    }

    /// Takes the core away from `index` with work remaining.
    pub(crate) fn preempt(&mut self, index: usize, now: i64) {
        self.close_slice(index, now);
        self.record(index, EventAction::Preempt, now);
    }

    /// Accounts `amount` units of work done by `index`.
    #[inline]
    pub(crate) fn consume(&mut self, index: usize, amount: i64) {
        self.progress[index].remaining -= amount;
    }

    /// Completes `index` at `now`.
    pub(crate) fn finish(&mut self, index: usize, now: i64) {
        self.close_slice(index, now);
        self.progress[index].mark_finished(now);
        self.finished += 1;
        self.record(index, EventAction::Finish, now);
    }

    fn close_slice(&mut self, index: usize, now: i64) {
        if let Some((current, start)) = self.running {
            if current == index {
                if now > start {
                    self.slices.push(Slice {
                        job_index: index,
                        start,
                        end: now,
                    });
                }
                self.running = None;
            }
        }
    }

    fn record(&mut self, index: usize, action: EventAction, now: i64) {
        trace!(
            job = %self.table[index].name,
            %action,
            time = now,
            remaining = self.progress[index].remaining,
            "scheduling decision"
        );
        self.events.push(ScheduleEvent::new(index, action, now));
    }

    /// Converts the finished run into a `Schedule` aligned with the table.
    pub(crate) fn into_schedule(self) -> Result<Schedule, SchedError> {
        let timings = self
            .table
            .iter()
            .zip(&self.progress)
            .map(|(job, progress)| match (progress.start_time, progress.finish_time) {
                (Some(start_time), Some(finish_time)) => Ok(JobTiming {
                    name: job.name.clone(),
                    ready_time: job.ready_time,
                    exec_time: job.exec_time,
                    start_time,
                    finish_time,
                }),
                _ => Err(SchedError::Incomplete(job.name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Schedule {
            timings,
            slices: self.slices,
            events: self.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobSpec;

    fn table() -> JobTable {
        JobTable::new(vec![JobSpec::new("A", 0, 10), JobSpec::new("B", 2, 3)]).unwrap()
    }

    #[test]
    fn test_dispatch_same_job_is_noop() {
        let table = table();
        let mut tl = Timeline::new(&table);
        tl.dispatch(0, 0);
        tl.dispatch(0, 5);
        assert_eq!(tl.events.len(), 1);
        assert_eq!(tl.events[0].action, EventAction::Start);
    }

    #[test]
    fn test_dispatch_other_job_preempts() {
        let table = table();
        let mut tl = Timeline::new(&table);
        tl.dispatch(0, 0);
        tl.consume(0, 2);
        tl.dispatch(1, 2);
        tl.consume(1, 3);
        tl.finish(1, 5);
        tl.dispatch(0, 5);
        tl.consume(0, 8);
        tl.finish(0, 13);

        let actions: Vec<EventAction> = tl.events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                EventAction::Start,
                EventAction::Preempt,
                EventAction::Start,
                EventAction::Finish,
                EventAction::Resume,
                EventAction::Finish,
            ]
        );
        assert_eq!(tl.slices.len(), 3);
        assert!(tl.all_finished());

        let schedule = tl.into_schedule().unwrap();
        assert_eq!(schedule.timings[0].start_time, 0);
        assert_eq!(schedule.timings[0].finish_time, 13);
        assert_eq!(schedule.busy_time_for(0), 10);
    }

    #[test]
    fn test_incomplete_run_is_an_error() {
        let table = table();
        let mut tl = Timeline::new(&table);
        tl.dispatch(0, 0);
        tl.finish(0, 10);
        let err = tl.into_schedule().unwrap_err();
        assert_eq!(err, SchedError::Incomplete("B".into()));
    }
}
