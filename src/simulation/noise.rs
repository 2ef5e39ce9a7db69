// src/simulation/noise.rs

//! Noise parameters for noisy simulation.
//!
//! Noise is applied per shot: after every gate each touched qubit suffers a
//! uniformly random Pauli error with the gate's error probability, and every
//! measured bit is flipped with the readout error probability.

use crate::core::QcardsError;
use crate::device::DeviceProperties;
use serde::{Deserialize, Serialize};

/// Error probabilities used by the noisy simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// Pauli error probability after each single-qubit gate.
    pub single_qubit_error: f64,
    /// Pauli error probability per qubit after each two-qubit gate.
    pub two_qubit_error: f64,
    /// Probability that a measured bit is reported flipped.
    pub readout_error: f64,
}

impl Default for NoiseProfile {
    /// Typical figures for a small superconducting device.
    fn default() -> Self {
        Self {
            single_qubit_error: 1e-3,
            two_qubit_error: 2e-2,
            readout_error: 3e-2,
        }
    }
}

impl NoiseProfile {
    /// Creates a profile, checking every probability lies in `[0, 1]`.
    pub fn new(single_qubit_error: f64, two_qubit_error: f64, readout_error: f64) -> Result<Self, QcardsError> {
        let profile = Self { single_qubit_error, two_qubit_error, readout_error };
        profile.validate()?;
        Ok(profile)
    }

    /// A profile with no noise at all.
    pub fn ideal() -> Self {
        Self { single_qubit_error: 0.0, two_qubit_error: 0.0, readout_error: 0.0 }
    }

    /// `true` if every probability is zero.
    pub fn is_ideal(&self) -> bool {
        self.single_qubit_error == 0.0 && self.two_qubit_error == 0.0 && self.readout_error == 0.0
    }

    /// Checks every probability lies in `[0, 1]` (NaN is rejected).
    pub fn validate(&self) -> Result<(), QcardsError> {
        let fields = [
            ("single_qubit_error", self.single_qubit_error),
            ("two_qubit_error", self.two_qubit_error),
            ("readout_error", self.readout_error),
        ];
        for (name, p) in fields {
            if !(0.0..=1.0).contains(&p) {
                return Err(QcardsError::InvalidNoiseProfile {
                    message: format!("{} = {} is not a probability", name, p),
                });
            }
        }
        Ok(())
    }

    /// Derives a basic noise profile from reported device calibration data by
    /// averaging the per-qubit figures.
    ///
    /// Empty figure lists count as zero error.
    pub fn from_device_properties(properties: &DeviceProperties) -> Result<Self, QcardsError> {
        fn mean(values: &[f64]) -> f64 {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        Self::new(
            mean(&properties.single_qubit_errors),
            mean(&properties.two_qubit_errors),
            mean(&properties.readout_errors),
        )
    }
}
