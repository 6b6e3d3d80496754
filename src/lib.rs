//! Single-core CPU scheduling simulator.
//!
//! Computes, for a fixed batch of jobs with ready times and execution
//! times, when each job starts and finishes under one of four classical
//! disciplines: FIFO, Round-Robin, SJF and preemptive SJF.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `JobSpec`, `Job`, `JobTable`, `ReadyQueue`,
//!   `Schedule`, `ScheduleEvent`
//! - **`policy`**: The four scheduling policies and the `run` entry point
//! - **`validation`**: Job batch integrity checks (empty, duplicate names, bad times)
//! - **`input`** / **`report`**: Text input parsing, text and JSON output
//! - **`executor`**: Boundary for driving external executors from a schedule
//! - **`workload`**: Random dense job batches
//!
//! # Example
//!
//! ```
//! use u_cpusched::config::SimConfig;
//! use u_cpusched::input::parse_input;
//! use u_cpusched::policy;
//! use u_cpusched::report::ScheduleReport;
//!
//! let (policy, table) = parse_input("PSJF 2 A 0 10 B 4 3").unwrap().into_table().unwrap();
//! let schedule = policy::run(policy, &table, &SimConfig::default()).unwrap();
//!
//! let report = ScheduleReport::new(policy, &schedule);
//! assert!(report.to_text().contains("B: (4, 7)"));
//! assert!(report.to_text().contains("A: (0, 13)"));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau, "Operating Systems: Three Easy Pieces", Ch. 7

pub mod config;
pub mod error;
pub mod executor;
pub mod input;
pub mod models;
pub mod policy;
pub mod report;
pub mod validation;
pub mod workload;

pub use config::SimConfig;
pub use error::SchedError;
pub use policy::Policy;
