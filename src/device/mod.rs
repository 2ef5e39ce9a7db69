// src/device/mod.rs

//! Remote quantum devices.
//!
//! The crate does not talk to any vendor API itself. Callers implement
//! [`Device`] for their hardware client and a [`DeviceProvider`] that connects
//! to it; a [`DeviceSession`] then takes care of one-time credential loading.

mod session;

pub use session::{Credentials, DeviceProvider, DeviceSession};

use crate::backend::Backend;
use crate::core::QcardsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote device: a [`Backend`] that also reports calibration data.
pub trait Device: Backend + Send + Sync {
    /// Current calibration data, used to derive a simulator noise profile.
    fn properties(&self) -> Result<DeviceProperties, QcardsError>;
}

/// Per-qubit calibration figures reported by a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceProperties {
    /// Error probability of single-qubit gates, per qubit.
    pub single_qubit_errors: Vec<f64>,
    /// Error probability of two-qubit gates, per coupled pair.
    pub two_qubit_errors: Vec<f64>,
    /// Measurement assignment error, per qubit.
    pub readout_errors: Vec<f64>,
}

/// Which provider account and backend a session connects to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceTarget {
    /// Provider hub.
    pub hub: String,
    /// Group within the hub.
    pub group: String,
    /// Project within the group.
    pub project: String,
    /// Backend (device) name.
    pub backend: String,
}

impl Default for DeviceTarget {
    fn default() -> Self {
        Self {
            hub: "ibm-q".to_string(),
            group: "open".to_string(),
            project: "main".to_string(),
            backend: "ibmqx2".to_string(),
        }
    }
}

impl DeviceTarget {
    /// Applies `QCARDS_DEVICE_HUB`, `_GROUP`, `_PROJECT` and `_BACKEND`
    /// overrides, as returned by `lookup`, on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            hub: lookup("QCARDS_DEVICE_HUB").unwrap_or(defaults.hub),
            group: lookup("QCARDS_DEVICE_GROUP").unwrap_or(defaults.group),
            project: lookup("QCARDS_DEVICE_PROJECT").unwrap_or(defaults.project),
            backend: lookup("QCARDS_DEVICE_BACKEND").unwrap_or(defaults.backend),
        }
    }

    /// [`from_lookup`](Self::from_lookup) over the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}:{}", self.hub, self.group, self.project, self.backend)
    }
}
