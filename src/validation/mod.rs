// src/validation/mod.rs

//! Validity checks: game strings against the grammar, and simulator states
//! against normalization.

use crate::core::{QcardsError, StateVector, MAX_PLAYERS};
use crate::grammar::{tokenize, GrammarError};

// Default tolerance value (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks the player count invariant `1 <= num_players <= MAX_PLAYERS`.
pub fn check_player_count(num_players: usize) -> Result<(), QcardsError> {
    if (1..=MAX_PLAYERS).contains(&num_players) {
        Ok(())
    } else {
        Err(QcardsError::InvalidPlayerCount { num_players })
    }
}

/// Validates `game_str` for a game of `num_players` players, reporting the
/// first problem found.
///
/// An out-of-range player count is rejected before the string is scanned.
/// An empty string is valid for any legal player count.
///
/// # Returns
/// * `Ok(())` if every token is well formed.
/// * `Err(GrammarError)` describing the first malformed token.
pub fn validate_game(game_str: &str, num_players: usize) -> Result<(), GrammarError> {
    if check_player_count(num_players).is_err() {
        return Err(GrammarError::InvalidPlayerCount { num_players });
    }
    for token in tokenize(game_str, num_players) {
        token?;
    }
    Ok(())
}

/// Returns `true` if `game_str` is a valid game for `num_players` players.
///
/// ```
/// use qcards::is_valid_game;
///
/// assert!(is_valid_game("H1", 1));
/// assert!(!is_valid_game("H2", 1));
/// assert!(is_valid_game("C12", 2));
/// assert!(!is_valid_game("C11", 2));
/// ```
pub fn is_valid_game(game_str: &str, num_players: usize) -> bool {
    validate_game(game_str, num_players).is_ok()
}

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0 (e.g., 1e-9). Defaults are available.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QcardsError::SimulationError)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QcardsError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QcardsError::SimulationError {
            message: format!("State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})", norm_sq, effective_tolerance)
        })
    } else {
        Ok(())
    }
}
