//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchedError;

/// Round-Robin time quantum used when none is configured.
pub const DEFAULT_QUANTUM: i64 = 500;

/// Tunables shared by all policies.
///
/// Loaded from JSON by the command-line front end; missing fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Maximum contiguous run length granted by Round-Robin.
    pub quantum: i64,
}

impl SimConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Rejects values no policy can run with.
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.quantum <= 0 {
            return Err(SchedError::InvalidConfig(format!(
                "quantum must be positive, got {}",
                self.quantum
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}
