//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier of a qubit wire within a circuit.
/// Indices are 0-based and dense: a circuit over `n` qubits uses `QubitId(0)..QubitId(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl QubitId {
    /// The wire index as a plain `usize`.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Errors raised while building, executing or scoring a game.
///
/// An invalid game string is not one of these: validity is a
/// predicate (`is_valid_game`) and invalid games score all zeros.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QcardsError {
    /// The circuit builder met a token the grammar does not accept.
    /// Callers must validate a game string before building it.
    #[error("Unrecognized token at position {position}: {message}")]
    UnrecognizedToken {
        /// Character offset of the offending instruction
        position: usize,
        /// What was wrong with the token
        message: String,
    },

    /// Player count outside `1..=MAX_PLAYERS`.
    #[error("Invalid player count {num_players}: expected 1 to {max}", max = crate::core::MAX_PLAYERS)]
    InvalidPlayerCount {
        /// The rejected count
        num_players: usize,
    },

    /// A player-to-qubit mapping that is not a bijection, or has the wrong size.
    #[error("Invalid permutation: {message}")]
    InvalidPermutation {
        /// InvalidPermutation failure message
        message: String,
    },

    /// A noise probability outside `[0, 1]`.
    #[error("Invalid noise profile: {message}")]
    InvalidNoiseProfile {
        /// InvalidNoiseProfile failure message
        message: String,
    },

    /// Failure inside the local simulator.
    #[error("Simulation error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// No device could be reached, or none was configured.
    #[error("Device unavailable: {message}")]
    DeviceUnavailable {
        /// DeviceUnavailable failure message
        message: String,
    },

    /// Credentials for remote execution were missing or rejected.
    #[error("Credential error: {message}")]
    CredentialError {
        /// CredentialError failure message
        message: String,
    },

    /// The execution collaborator ran but reported a failure.
    #[error("Execution failed: {message}")]
    ExecutionFailure {
        /// ExecutionFailure failure message
        message: String,
    },

    /// Outcome data from a collaborator could not be interpreted.
    #[error("Invalid outcome data: {message}")]
    InvalidOutcome {
        /// InvalidOutcome failure message
        message: String,
    },
}

impl From<serde_json::Error> for QcardsError {
    fn from(err: serde_json::Error) -> Self {
        QcardsError::InvalidOutcome { message: err.to_string() }
    }
}
