//! Scheduling policies.
//!
//! Four single-core disciplines over a sorted `JobTable`:
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FIFO | no | table order |
//! | RR | quantum expiry | ready queue order |
//! | SJF | no | smallest execution time among ready jobs |
//! | PSJF | on arrival | smallest remaining time among ready jobs |
//!
//! Every policy is a pure function of the table (and, for RR, the quantum):
//! all mutable state lives inside one invocation and the result is a
//! [`Schedule`]. Ties always go to the job earliest in table order.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::config::SimConfig;
//! use u_cpusched::models::{JobSpec, JobTable};
//! use u_cpusched::policy::{self, Policy};
//!
//! let table = JobTable::new(vec![
//!     JobSpec::new("A", 0, 5),
//!     JobSpec::new("B", 1, 3),
//! ]).unwrap();
//!
//! let schedule = policy::run(Policy::Fifo, &table, &SimConfig::default()).unwrap();
//! assert_eq!(schedule.timing_for("B").unwrap().start_time, 5);
//! ```

mod fifo;
mod psjf;
mod round_robin;
mod sjf;
mod timeline;

pub use fifo::Fifo;
pub use psjf::Psjf;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;
use tracing::debug;

use crate::config::SimConfig;
use crate::error::SchedError;
use crate::models::{JobTable, Schedule};

/// A single-core scheduling discipline.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name as written in the input (e.g., "FIFO", "RR").
    fn name(&self) -> &'static str;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Computes start and finish times for every job of `table`.
    ///
    /// # Errors
    /// `SchedError::NoEligibleJob` if the clock reaches a decision point
    /// with nothing ready to run.
    fn schedule(&self, table: &JobTable) -> Result<Schedule, SchedError>;
}

/// Selector for the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "PSJF")]
    Psjf,
}

impl Policy {
    /// All built-in policies.
    pub const ALL: [Policy; 4] = [Policy::Fifo, Policy::RoundRobin, Policy::Sjf, Policy::Psjf];

    /// Input token for this policy.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::RoundRobin => "RR",
            Policy::Sjf => "SJF",
            Policy::Psjf => "PSJF",
        }
    }

    /// Whether the policy may take the core away from a running job.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::RoundRobin | Policy::Psjf)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SchedError::UnknownPolicy(s.to_string()))
    }
}

/// Runs `policy` over `table`.
///
/// # Errors
/// `SchedError::InvalidConfig` if `config` is invalid, or any error the
/// policy itself reports.
pub fn run(policy: Policy, table: &JobTable, config: &SimConfig) -> Result<Schedule, SchedError> {
    config.validate()?;
    debug!(%policy, jobs = table.len(), quantum = config.quantum, "scheduling");

    let schedule = match policy {
        Policy::Fifo => Fifo.schedule(table),
        Policy::RoundRobin => RoundRobin::new(config.quantum).schedule(table),
        Policy::Sjf => Sjf.schedule(table),
        Policy::Psjf => Psjf.schedule(table),
    }?;

    debug!(
        %policy,
        makespan = schedule.makespan(),
        preemptions = schedule.preemption_count(),
        "schedule complete"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobSpec, Slice};
    use crate::workload::{self, WorkloadConfig};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn random_tables(seed: u64, count: usize) -> Vec<JobTable> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = WorkloadConfig::new(6)
            .with_exec_range(1, 12)
            .with_max_gap(1)
            .with_first_ready_max(5);
        (0..count)
            .map(|_| JobTable::new(workload::generate(&mut rng, &config)).unwrap())
            .collect()
    }

    fn small_quantum() -> SimConfig {
        SimConfig::default().with_quantum(3)
    }

    fn overlaps(a: &Slice, b: &Slice) -> bool {
        a.start < b.end && b.start < a.end
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("FIFO".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("RR".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!("SJF".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!("PSJF".parse::<Policy>().unwrap(), Policy::Psjf);
        assert_eq!(
            "fifo".parse::<Policy>().unwrap_err(),
            SchedError::UnknownPolicy("fifo".into())
        );
    }

    #[test]
    fn test_policy_display_and_serde() {
        assert_eq!(Policy::RoundRobin.to_string(), "RR");
        assert_eq!(serde_json::to_string(&Policy::Psjf).unwrap(), r#""PSJF""#);
        assert!(Policy::Psjf.is_preemptive());
        assert!(!Policy::Sjf.is_preemptive());
    }

    #[test]
    fn test_trait_names_match_selector() {
        assert_eq!(Fifo.name(), Policy::Fifo.name());
        assert_eq!(RoundRobin::default().name(), Policy::RoundRobin.name());
        assert_eq!(Sjf.name(), Policy::Sjf.name());
        assert_eq!(Psjf.name(), Policy::Psjf.name());
        assert_eq!(Psjf.description(), "Preemptive Shortest-Job-First");
    }

    #[test]
    fn test_invalid_config_rejected_before_scheduling() {
        let table = JobTable::new(vec![JobSpec::new("A", 0, 1)]).unwrap();
        let err = run(Policy::RoundRobin, &table, &SimConfig::default().with_quantum(-1))
            .unwrap_err();
        assert!(matches!(err, SchedError::InvalidConfig(_)));
    }

    #[test]
    fn test_every_job_gets_exactly_its_work() {
        for table in random_tables(7, 40) {
            for policy in Policy::ALL {
                let s = run(policy, &table, &small_quantum()).unwrap();
                for (index, job) in table.iter().enumerate() {
                    let t = &s.timings[index];
                    assert!(t.start_time <= t.finish_time, "{policy}: {t:?}");
                    assert!(t.start_time >= job.ready_time, "{policy}: {t:?}");
                    assert_eq!(s.busy_time_for(index), job.exec_time, "{policy}: {t:?}");

                    let slices = s.slices_for(index);
                    assert_eq!(slices.first().unwrap().start, t.start_time);
                    assert_eq!(slices.last().unwrap().end, t.finish_time);
                }
            }
        }
    }

    #[test]
    fn test_non_preemptive_runs_each_job_in_one_piece() {
        for table in random_tables(11, 40) {
            for policy in [Policy::Fifo, Policy::Sjf] {
                let s = run(policy, &table, &SimConfig::default()).unwrap();
                assert_eq!(s.slices.len(), table.len());
                assert_eq!(s.preemption_count(), 0);
                assert!(s.timings.iter().all(|t| t.span() == t.exec_time));
            }
        }
    }

    #[test]
    fn test_single_core_exclusivity() {
        for table in random_tables(13, 40) {
            for policy in Policy::ALL {
                let s = run(policy, &table, &small_quantum()).unwrap();
                for (i, a) in s.slices.iter().enumerate() {
                    for b in &s.slices[i + 1..] {
                        assert!(!overlaps(a, b), "{policy}: {a:?} overlaps {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_robin_slices_bounded_by_quantum() {
        for table in random_tables(17, 40) {
            let config = small_quantum();
            let s = run(Policy::RoundRobin, &table, &config).unwrap();
            assert!(s.slices.iter().all(|sl| sl.duration() <= config.quantum));
        }
    }

    #[test]
    fn test_psjf_runs_minimum_remaining_at_every_instant() {
        for table in random_tables(19, 40) {
            let s = run(Policy::Psjf, &table, &SimConfig::default()).unwrap();
            let mut remaining: Vec<i64> = table.iter().map(|j| j.exec_time).collect();

            for t in table.first_ready_time()..s.makespan() {
                let Some(slice) = s.slices.iter().find(|sl| sl.covers(t)) else {
                    continue;
                };
                let running = slice.job_index;
                let best = table
                    .iter()
                    .enumerate()
                    .filter(|(i, job)| job.ready_time <= t && remaining[*i] > 0)
                    .map(|(i, _)| remaining[i])
                    .min()
                    .unwrap();
                assert!(
                    remaining[running] <= best,
                    "t={t}: running {} has {} left, best is {best}",
                    table[running].name,
                    remaining[running]
                );
                remaining[running] -= 1;
            }
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        for table in random_tables(23, 10) {
            for policy in Policy::ALL {
                let first = run(policy, &table, &small_quantum()).unwrap();
                let second = run(policy, &table, &small_quantum()).unwrap();
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_sjf_never_starts_longer_ready_job_first() {
        for table in random_tables(29, 40) {
            let s = run(Policy::Sjf, &table, &SimConfig::default()).unwrap();
            for (i, a) in s.timings.iter().enumerate() {
                for b in &s.timings {
                    // b was ready when a started, and a started first: a is not longer.
                    if b.ready_time <= a.start_time && a.start_time < b.start_time {
                        assert!(a.exec_time <= b.exec_time, "{a:?} before {b:?} (job {i})");
                    }
                }
            }
        }
    }
}
