//! Schedule reports.
//!
//! Renders a `Schedule` as the plain-text absolute/relative listing or as a
//! serializable [`ScheduleReport`]. Rows follow table order (ready time,
//! then declaration order), not input order.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::models::{JobTiming, Schedule};
use crate::policy::Policy;

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRow {
    pub name: String,
    pub start: i64,
    pub finish: i64,
}

impl From<&JobTiming> for TimingRow {
    fn from(t: &JobTiming) -> Self {
        Self {
            name: t.name.clone(),
            start: t.start_time,
            finish: t.finish_time,
        }
    }
}

/// Serializable summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub policy: Policy,
    /// Job names in order of first dispatch.
    pub start_order: Vec<String>,
    pub absolute: Vec<TimingRow>,
    /// Same rows shifted so the earliest start is zero.
    pub relative: Vec<TimingRow>,
}

impl ScheduleReport {
    /// Builds the report for `schedule` produced by `policy`.
    pub fn new(policy: Policy, schedule: &Schedule) -> Self {
        Self {
            policy,
            start_order: schedule
                .start_order()
                .into_iter()
                .map(str::to_string)
                .collect(),
            absolute: schedule.timings.iter().map(TimingRow::from).collect(),
            relative: schedule.relative().iter().map(TimingRow::from).collect(),
        }
    }

    /// Plain-text listing:
    ///
    /// ```text
    /// absolute:
    /// A: (0, 5)
    /// relative:
    /// A: (0, 5)
    /// ```
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        write_section(&mut out, "absolute", &self.absolute);
        write_section(&mut out, "relative", &self.relative);
        out
    }
}

fn write_section(out: &mut String, title: &str, rows: &[TimingRow]) {
    let _ = writeln!(out, "{title}:");
    for row in rows {
        let _ = writeln!(out, "{}: ({}, {})", row.name, row.start, row.finish);
    }
}
