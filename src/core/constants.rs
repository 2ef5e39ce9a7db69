//! Game-wide constants.

/// Constants shared by the validator, the builder and the scorer
pub mod qcards_constants {
    /// Largest supported number of players.
    pub const MAX_PLAYERS: usize = 5;
    /// Width of every score vector, independent of the player count.
    pub const SCORE_SLOTS: usize = 5;
    /// Shots per run when the configuration does not say otherwise.
    pub const DEFAULT_SHOTS: u32 = 1024;
    /// Upper bound on the local simulator's register width.
    pub const MAX_SIMULATED_QUBITS: usize = 16;
}

// Operands are single characters in '1'..'1' + num_players.
const _: () = assert!(qcards_constants::MAX_PLAYERS <= 9);
const _: () = assert!(qcards_constants::MAX_PLAYERS <= qcards_constants::SCORE_SLOTS);
