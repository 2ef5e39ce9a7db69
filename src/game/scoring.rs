// src/game/scoring.rs

use super::permutation::Permutation;
use crate::backend::OutcomeFrequencies;
use crate::core::SCORE_SLOTS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Per-player winnings: how many shots measured each player's qubit as `1`.
///
/// Always five slots wide; slots at or beyond the player count stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreVector([u64; SCORE_SLOTS]);

impl ScoreVector {
    /// All players on zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The scores as a plain array, indexed by player position.
    pub fn as_array(&self) -> &[u64; SCORE_SLOTS] {
        &self.0
    }

    /// Score of `player` (0-based), zero for slots that do not exist.
    pub fn get(&self, player: usize) -> u64 {
        self.0.get(player).copied().unwrap_or(0)
    }

    /// `true` if no player scored.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|s| *s == 0)
    }

    /// Sum over all players, saturating like the per-player slots.
    pub fn total(&self) -> u64 {
        self.0.iter().copied().fold(0, u64::saturating_add)
    }

    fn add(&mut self, player: usize, count: u64) {
        if let Some(slot) = self.0.get_mut(player) {
            *slot = slot.saturating_add(count);
        }
    }
}

impl From<[u64; SCORE_SLOTS]> for ScoreVector {
    fn from(scores: [u64; SCORE_SLOTS]) -> Self {
        Self(scores)
    }
}

impl From<ScoreVector> for [u64; SCORE_SLOTS] {
    fn from(scores: ScoreVector) -> Self {
        scores.0
    }
}

impl Index<usize> for ScoreVector {
    type Output = u64;

    fn index(&self, player: usize) -> &u64 {
        &self.0[player]
    }
}

impl fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Sums, for each player, the frequencies of outcomes in which that player's
/// qubit was measured as `1`.
///
/// Qubit `k` lands in classical bit `k`, which sits at string position
/// `num_players - 1 - k`; looking up `permutation[p]` there recovers player
/// `p`'s own bit whatever the shuffle was. Bitstrings too short to hold a
/// player's bit add nothing for that player.
pub fn aggregate_scores(outcomes: &OutcomeFrequencies, num_players: usize, permutation: &Permutation) -> ScoreVector {
    let mut score = ScoreVector::zero();
    let players = num_players.min(permutation.len()).min(SCORE_SLOTS);

    for (bitstring, count) in outcomes.iter() {
        let bits = bitstring.as_bytes();
        for (player, qubit) in permutation.as_slice().iter().enumerate().take(players) {
            let won = num_players
                .checked_sub(1 + qubit)
                .and_then(|pos| bits.get(pos))
                .is_some_and(|b| *b == b'1');
            if won {
                score.add(player, count);
            }
        }
    }
    score
}
