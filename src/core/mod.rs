// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qcards::core::TypeName`
pub use error::{QcardsError, QubitId};
pub use state::StateVector;

pub mod constants;
pub use constants::qcards_constants::{DEFAULT_SHOTS, MAX_PLAYERS, MAX_SIMULATED_QUBITS, SCORE_SLOTS}; // Re-export
