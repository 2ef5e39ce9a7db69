// src/lib.rs

//! `qcards` - Game strings, circuits and scores for the Q|cards> quantum card game
//!
//! Each player owns one qubit. A game string such as `"H1C12X2"` lists the
//! gates the players played; the crate validates it, builds the matching
//! circuit over a randomly shuffled player-to-qubit assignment, runs it on a
//! [`Backend`] and counts, per player, how many shots measured their qubit as `1`.

pub mod core;
pub mod grammar;
pub mod validation;
pub mod operations;
pub mod circuits;
pub mod backend;
pub mod simulation;
pub mod device;
pub mod game;

// Re-export the most common types for easier top-level use
pub use crate::core::{QcardsError, QubitId, MAX_PLAYERS};
pub use grammar::{GateCode, GrammarError, Instruction};
pub use validation::{is_valid_game, validate_game};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use backend::{Backend, ExecutionMode, OutcomeFrequencies};
pub use simulation::{NoiseProfile, Simulator};
pub use device::{Device, DeviceSession};
pub use game::{
    aggregate_scores,
    build_circuit,
    build_permutation,
    get_scores,
    Game,
    GameConfig,
    Permutation,
    ScoreVector,
};

// Example 1: Entangled players
// Player 1 takes a Hadamard and then controls a CNOT onto player 2, so the two
// players always win or lose together.
/// ```
/// use qcards::{Game, GameConfig};
///
/// let game = Game::new(GameConfig::default().with_shots(2000).with_seed(11));
/// let scores = game.play("H1C12", 2).expect("local simulation");
///
/// assert_eq!(scores[0], scores[1]);
/// // Roughly half the shots: the Hadamard makes both outcomes equally likely.
/// assert!(scores[0] > 800 && scores[0] < 1200);
/// assert_eq!(scores[2], 0);
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Building and scoring by hand
// The pipeline pieces can be driven separately, e.g. to execute the circuit on
// an external backend and score its counts afterwards.
/// ```
/// use qcards::{aggregate_scores, build_circuit, build_permutation, is_valid_game, Backend, Simulator};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let game = "x1S12";
/// assert!(is_valid_game(game, 3));
///
/// let mut rng = StdRng::seed_from_u64(5);
/// let permutation = build_permutation(3, &mut rng);
/// let circuit = build_circuit(game, 3, &permutation).unwrap();
/// println!("{}", circuit);
///
/// let outcomes = Simulator::new().with_seed(5).run(&circuit, 10).unwrap();
/// let scores = aggregate_scores(&outcomes, 3, &permutation);
/// // Player 1's flipped card was swapped over to player 2.
/// assert_eq!(scores.as_array(), &[0, 10, 0, 0, 0]);
/// ```
#[doc(hidden)]
const _: () = ();
