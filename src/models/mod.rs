//! CPU scheduling domain models.
//!
//! Provides the data types a policy reads and produces:
//!
//! | Type | Role |
//! |------|------|
//! | `JobSpec` | Job as declared in the input |
//! | `Job` | Job placed in a sorted `JobTable` |
//! | `JobProgress` | Per-run status (remaining work, start, finish) |
//! | `ReadyQueue` | Bounded FIFO of job indices (Round-Robin) |
//! | `Schedule` | Result: timings, run slices, decision events |

mod job;
mod job_table;
mod ready_queue;
mod schedule;

pub use job::{Job, JobProgress, JobSpec};
pub use job_table::JobTable;
pub use ready_queue::{QueueFull, ReadyQueue};
pub use schedule::{EventAction, JobTiming, Schedule, ScheduleEvent, Slice};
