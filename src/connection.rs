//! Connection-health model.
//!
//! Simulates transient connectivity loss: every cycle the flag is
//! re-derived from a fresh draw with no memory of the previous value.

use serde::{Deserialize, Serialize};

use crate::app::ports::EntropyPort;

/// Read-only copy of the connectivity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub connected: bool,
}

/// Connectivity flag re-rolled each cycle.
#[derive(Debug, Clone)]
pub struct ConnectionHealth {
    connected: bool,
    fault_probability: f64,
}

impl ConnectionHealth {
    /// Starts connected.
    pub fn new(fault_probability: f64) -> Self {
        Self {
            connected: true,
            fault_probability,
        }
    }

    /// Draw once; connected when the draw exceeds the fault probability.
    /// The result replaces the stored flag.
    pub fn reroll(&mut self, entropy: &mut impl EntropyPort) -> bool {
        self.connected = entropy.uniform() > self.fault_probability;
        self.connected
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn snapshot(&self) -> ConnectionSnapshot {
        ConnectionSnapshot {
            connected: self.connected,
        }
    }
}
