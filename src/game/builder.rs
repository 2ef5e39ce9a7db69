// src/game/builder.rs

use super::permutation::Permutation;
use crate::circuits::Circuit;
use crate::core::{QcardsError, QubitId};
use crate::grammar::{tokenize, Instruction, Operands};
use crate::operations::Operation;
use crate::validation::check_player_count;
use tracing::{debug, error};

/// Translates a validated game string into a circuit over permuted qubits.
///
/// Player `p` in the string is played on qubit `permutation[p]`. After the
/// gates, qubit `k` is measured into classical bit `k` for every qubit.
///
/// # Arguments
/// * `game_str` - A game string that already passed [`is_valid_game`](crate::is_valid_game).
/// * `num_players` - Player count the string was validated against.
/// * `permutation` - The run's player-to-qubit mapping, of length `num_players`.
///
/// # Errors
/// * `QcardsError::UnrecognizedToken` if `game_str` was not valid after all.
/// * `QcardsError::InvalidPlayerCount` / `InvalidPermutation` for inconsistent arguments.
pub fn build_circuit(game_str: &str, num_players: usize, permutation: &Permutation) -> Result<Circuit, QcardsError> {
    check_player_count(num_players)?;
    if permutation.len() != num_players {
        return Err(QcardsError::InvalidPermutation {
            message: format!("permutation covers {} players, game has {}", permutation.len(), num_players),
        });
    }

    let mut circuit = Circuit::new(num_players, num_players);
    for token in tokenize(game_str, num_players) {
        let instruction = token.map_err(|err| {
            error!(game = game_str, %err, "game string reached the circuit builder without validation");
            QcardsError::UnrecognizedToken {
                position: err.position().unwrap_or(0),
                message: err.to_string(),
            }
        })?;
        circuit.add_operation(to_operation(&instruction, permutation)?)?;
    }
    circuit.measure_all();

    debug!(operations = circuit.len(), %permutation, "built game circuit");
    Ok(circuit)
}

fn to_operation(instruction: &Instruction, permutation: &Permutation) -> Result<Operation, QcardsError> {
    let qubit = |player: usize| {
        permutation.qubit_for(player).ok_or_else(|| QcardsError::InvalidPermutation {
            message: format!("no qubit assigned to player {}", player + 1),
        })
    };
    let (first, second): (QubitId, Option<QubitId>) = match instruction.operands {
        Operands::One(p) => (qubit(p)?, None),
        Operands::Two(p1, p2) => (qubit(p1)?, Some(qubit(p2)?)),
    };
    Operation::from_gate(instruction.gate, first, second).ok_or_else(|| QcardsError::UnrecognizedToken {
        position: instruction.position,
        message: format!("gate {} is missing an operand", instruction.gate),
    })
}
