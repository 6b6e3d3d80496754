//! Text input format.
//!
//! Whitespace-separated tokens, line breaks insignificant:
//!
//! ```text
//! <POLICY>
//! <n>
//! <name> <ready_time> <exec_time>     (n times)
//! ```
//!
//! `POLICY` is one of `FIFO`, `RR`, `SJF`, `PSJF`.

use std::fmt::Write as _;
use std::str::{FromStr, SplitWhitespace};

use crate::error::SchedError;
use crate::models::{JobSpec, JobTable};
use crate::policy::Policy;

/// A parsed run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleInput {
    /// Selected policy.
    pub policy: Policy,
    /// Jobs in declaration order.
    pub jobs: Vec<JobSpec>,
}

impl ScheduleInput {
    /// Validates the jobs and builds the sorted table.
    pub fn into_table(self) -> Result<(Policy, JobTable), SchedError> {
        let table = JobTable::new(self.jobs)?;
        Ok((self.policy, table))
    }

    /// Renders back to the text format.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.policy);
        let _ = writeln!(out, "{}", self.jobs.len());
        for job in &self.jobs {
            let _ = writeln!(out, "{} {} {}", job.name, job.ready_time, job.exec_time);
        }
        out
    }
}

impl FromStr for ScheduleInput {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_input(s)
    }
}

/// Parses the text input format.
///
/// # Errors
/// - `UnknownPolicy` for an unrecognized policy token
/// - `MissingToken` when the input ends early
/// - `InvalidNumber` for a count or time that is not an integer
/// - `TrailingToken` for anything after the last declared job
pub fn parse_input(text: &str) -> Result<ScheduleInput, SchedError> {
    let mut tokens = Tokens(text.split_whitespace());

    let policy: Policy = tokens.next("policy name")?.parse()?;
    let count: usize = tokens.number("job count")?;

    let mut jobs = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let name = tokens.next("job name")?;
        let ready_time = tokens.number("ready time")?;
        let exec_time = tokens.number("execution time")?;
        jobs.push(JobSpec::new(name, ready_time, exec_time));
    }

    if let Some(extra) = tokens.0.next() {
        return Err(SchedError::TrailingToken(extra.to_string()));
    }

    Ok(ScheduleInput { policy, jobs })
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, SchedError> {
        self.0.next().ok_or(SchedError::MissingToken(what))
    }

    fn number<T: FromStr>(&mut self, what: &'static str) -> Result<T, SchedError> {
        let token = self.next(what)?;
        token.parse().map_err(|_| SchedError::InvalidNumber {
            field: what,
            token: token.to_string(),
        })
    }
}
