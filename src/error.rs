//! Crate-wide error type.
//!
//! Three families of failure exist:
//! - **Input**: malformed text, unknown policy name, invalid job batch.
//!   Detected before any policy runs.
//! - **Configuration**: invalid `SimConfig` values.
//! - **Invariant**: a policy reached a state that well-formed input can
//!   never produce (no eligible job, ready queue overflow).
//!
//! None of these are retryable.

use thiserror::Error;

use crate::models::QueueFull;
use crate::validation::ValidationError;

/// Errors produced while parsing, validating, or scheduling a job batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedError {
    #[error("unknown scheduling policy '{0}', expected one of FIFO, RR, SJF, PSJF")]
    UnknownPolicy(String),
    #[error("unexpected end of input, expected {0}")]
    MissingToken(&'static str),
    #[error("invalid {field} '{token}'")]
    InvalidNumber { field: &'static str, token: String },
    #[error("unexpected trailing input '{0}'")]
    TrailingToken(String),
    #[error("invalid job batch: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no eligible job at time {time}, a ready time is unreachable by the clock")]
    NoEligibleJob { time: i64 },
    #[error("ready queue overflow, capacity {capacity}")]
    QueueOverflow { capacity: usize },
    #[error("job '{0}' was never completed")]
    Incomplete(String),
}

impl From<QueueFull> for SchedError {
    fn from(full: QueueFull) -> Self {
        SchedError::QueueOverflow {
            capacity: full.capacity,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_unknown_policy_message() {
        let err = SchedError::UnknownPolicy("LOTTERY".into());
        assert_eq!(
            err.to_string(),
            "unknown scheduling policy 'LOTTERY', expected one of FIFO, RR, SJF, PSJF"
        );
    }

    #[test]
    fn test_validation_message_joins_all() {
        let err = SchedError::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate job name: A"),
            ValidationError::new(ValidationErrorKind::EmptyBatch, "Job batch is empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid job batch: Duplicate job name: A; Job batch is empty"
        );
    }
}
