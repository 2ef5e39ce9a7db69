// src/backend/outcomes.rs
use crate::core::QcardsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Histogram of measured bitstrings over all shots.
///
/// Bitstrings list the classical register most significant bit first: the
/// character at position `width - 1 - k` is classical bit `k`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeFrequencies {
    counts: BTreeMap<String, u64>,
}

impl OutcomeFrequencies {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` observations of `bitstring`.
    pub fn record(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`, zero if it never occurred.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterates `(bitstring, count)` pairs in lexicographic bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Parses a `{"bitstring": count, ...}` JSON object as returned by devices.
    ///
    /// # Errors
    /// `QcardsError::InvalidOutcome` if the JSON is malformed, or a key is empty
    /// or contains anything other than `0` and `1`.
    pub fn from_json(json: &str) -> Result<Self, QcardsError> {
        let parsed: Self = serde_json::from_str(json)?;
        parsed.check_bitstrings()?;
        Ok(parsed)
    }

    fn check_bitstrings(&self) -> Result<(), QcardsError> {
        for key in self.counts.keys() {
            if key.is_empty() || !key.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(QcardsError::InvalidOutcome {
                    message: format!("Outcome key {:?} is not a bitstring", key),
                });
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for OutcomeFrequencies {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut outcomes = Self::new();
        for (bitstring, count) in iter {
            outcomes.record(bitstring, count);
        }
        outcomes
    }
}

impl fmt::Display for OutcomeFrequencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome Frequencies ({} shots):", self.total_shots())?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        for (bitstring, count) in &self.counts {
            writeln!(f, "  {}: {}", bitstring, count)?;
        }
        Ok(())
    }
}
