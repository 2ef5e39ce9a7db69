// src/backend/mod.rs

//! The execution-collaborator seam.
//!
//! Everything that turns a [`Circuit`] into measured outcomes (the local
//! [`Simulator`](crate::simulation::Simulator), a remote
//! [`Device`](crate::device::Device), or a test stub) implements [`Backend`].

mod outcomes;

pub use outcomes::OutcomeFrequencies;

use crate::circuits::Circuit;
use crate::core::QcardsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Executes circuits and reports how often each bitstring was measured.
///
/// Calls are synchronous and may block for as long as the backend needs
/// (remote hardware may queue). Implementations do not retry.
pub trait Backend {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Runs `circuit` for `shots` repetitions.
    ///
    /// # Returns
    /// * `Ok(OutcomeFrequencies)` whose counts sum to `shots`.
    /// * `Err(QcardsError)` for any backend failure; callers propagate it unmodified.
    fn run(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeFrequencies, QcardsError>;
}

/// Where a game is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Noise-free local simulation.
    #[default]
    Ideal,
    /// Local simulation under a device-derived noise profile.
    Noisy,
    /// A real device reached through a [`DeviceSession`](crate::device::DeviceSession).
    Device,
}

impl ExecutionMode {
    /// Maps the `simulate` / `noisy` flag pair onto a mode.
    ///
    /// `noisy` only matters when simulating; a device run is always `Device`.
    pub fn from_flags(simulate: bool, noisy: bool) -> Self {
        match (simulate, noisy) {
            (true, false) => ExecutionMode::Ideal,
            (true, true) => ExecutionMode::Noisy,
            (false, _) => ExecutionMode::Device,
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Ideal => write!(f, "ideal simulation"),
            ExecutionMode::Noisy => write!(f, "noisy simulation"),
            ExecutionMode::Device => write!(f, "device"),
        }
    }
}
