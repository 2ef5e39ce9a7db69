// src/game/permutation.rs

use crate::core::{QcardsError, QubitId};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// A bijection from player index to qubit index over `0..num_players`.
///
/// Shuffling which wire carries which player keeps the circuit layout from
/// revealing who played what. One permutation belongs to exactly one game run:
/// the builder addresses qubits through it and the scorer maps them back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    mapping: Vec<usize>,
}

impl Permutation {
    /// The permutation sending every player to the qubit of the same index.
    pub fn identity(num_players: usize) -> Self {
        Self { mapping: (0..num_players).collect() }
    }

    /// Uses `mapping[player] = qubit` as given.
    ///
    /// # Errors
    /// `QcardsError::InvalidPermutation` unless `mapping` contains every value in
    /// `0..mapping.len()` exactly once.
    pub fn from_mapping(mapping: Vec<usize>) -> Result<Self, QcardsError> {
        let mut seen = vec![false; mapping.len()];
        for &qubit in &mapping {
            match seen.get_mut(qubit) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(QcardsError::InvalidPermutation {
                        message: format!("qubit {} is assigned to more than one player", qubit),
                    });
                }
                None => {
                    return Err(QcardsError::InvalidPermutation {
                        message: format!("qubit {} is outside 0..{}", qubit, mapping.len()),
                    });
                }
            }
        }
        Ok(Self { mapping })
    }

    /// The qubit carrying `player`, or `None` if the player is out of range.
    pub fn qubit_for(&self, player: usize) -> Option<QubitId> {
        self.mapping.get(player).copied().map(QubitId)
    }

    /// The mapping as a slice indexed by player.
    pub fn as_slice(&self) -> &[usize] {
        &self.mapping
    }

    /// Number of players (and qubits) covered.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// `true` for the zero-player permutation.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (player, qubit) in self.mapping.iter().enumerate() {
            write!(f, "{}p{}->q{}", if player > 0 { ", " } else { "" }, player, qubit)?;
        }
        write!(f, "}}")
    }
}

/// Draws a uniformly random player-to-qubit permutation from `rng`.
pub fn build_permutation<R: Rng + ?Sized>(num_players: usize, rng: &mut R) -> Permutation {
    let mut qubits: Vec<usize> = (0..num_players).collect();
    qubits.shuffle(rng);
    Permutation { mapping: qubits }
}
