// src/grammar/mod.rs

//! The game-string grammar.
//!
//! A game string is a sequence of `{gate}{operand}[operand]` tokens with no
//! delimiters. Gate codes are single letters (case-insensitive) and operands are
//! 1-based single-digit player numbers:
//!
//! | Code | Gate             | Operands |
//! |------|------------------|----------|
//! | `H`  | Hadamard         | 1        |
//! | `I`  | Identity         | 1        |
//! | `X`  | Pauli-X          | 1        |
//! | `Y`  | Pauli-Y          | 1        |
//! | `Z`  | Pauli-Z          | 1        |
//! | `C`  | Controlled-NOT   | 2        |
//! | `S`  | Swap             | 2        |
//!
//! [`Tokens`] scans a string into [`Instruction`]s. Both the validator and the
//! circuit builder use it, so they agree on tokenization by construction.

use std::fmt;
use thiserror::Error;

/// One of the seven gate codes a game string may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateCode {
    /// `H`: Hadamard
    H,
    /// `I`: Identity
    I,
    /// `X`: Pauli-X
    X,
    /// `Y`: Pauli-Y
    Y,
    /// `Z`: Pauli-Z
    Z,
    /// `C`: Controlled-NOT, first operand controls the second
    C,
    /// `S`: Swap
    S,
}

impl GateCode {
    /// Looks up a gate code after Unicode uppercasing.
    ///
    /// Characters whose uppercase form is more than one character (such as
    /// `'ß'`) are never gate codes.
    pub fn from_char(c: char) -> Option<Self> {
        let mut upper = c.to_uppercase();
        let (Some(u), None) = (upper.next(), upper.next()) else {
            return None;
        };
        match u {
            'H' => Some(GateCode::H),
            'I' => Some(GateCode::I),
            'X' => Some(GateCode::X),
            'Y' => Some(GateCode::Y),
            'Z' => Some(GateCode::Z),
            'C' => Some(GateCode::C),
            'S' => Some(GateCode::S),
            _ => None,
        }
    }

    /// Number of player operands that follow the code.
    pub fn operand_count(self) -> usize {
        match self {
            GateCode::H | GateCode::I | GateCode::X | GateCode::Y | GateCode::Z => 1,
            GateCode::C | GateCode::S => 2,
        }
    }

    /// The canonical (uppercase) letter.
    pub fn symbol(self) -> char {
        match self {
            GateCode::H => 'H',
            GateCode::I => 'I',
            GateCode::X => 'X',
            GateCode::Y => 'Y',
            GateCode::Z => 'Z',
            GateCode::C => 'C',
            GateCode::S => 'S',
        }
    }
}

impl fmt::Display for GateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Player operands of an instruction, as 0-based player indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// Single-player gate
    One(usize),
    /// Two-player gate; the indices are always distinct
    Two(usize, usize),
}

/// A parsed `(gate, operand_1[, operand_2])` unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The gate to apply.
    pub gate: GateCode,
    /// Target players, 0-based.
    pub operands: Operands,
    /// Character offset of the gate code within the game string.
    pub position: usize,
}

/// Reason a game string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// Player count outside `1..=MAX_PLAYERS`.
    #[error("player count {num_players} is outside 1..={max}", max = crate::core::MAX_PLAYERS)]
    InvalidPlayerCount {
        /// The rejected count
        num_players: usize,
    },
    /// Character at a gate position is not a gate code.
    #[error("unknown gate code {found:?} at position {position}")]
    UnknownGate {
        /// Character offset
        position: usize,
        /// The rejected character
        found: char,
    },
    /// The string ends before all operands of the last gate.
    #[error("gate {gate} at position {position} is missing operands")]
    Truncated {
        /// Character offset of the gate code
        position: usize,
        /// The truncated gate
        gate: GateCode,
    },
    /// Operand is not a digit in `'1'..'1' + num_players`.
    #[error("operand {found:?} at position {position} is not a player number")]
    OperandOutOfRange {
        /// Character offset of the operand
        position: usize,
        /// The rejected character
        found: char,
    },
    /// Both operands of a two-player gate name the same player.
    #[error("gate {gate} at position {position} uses player {operand:?} twice")]
    DuplicateOperand {
        /// Character offset of the gate code
        position: usize,
        /// The two-player gate
        gate: GateCode,
        /// The repeated operand character
        operand: char,
    },
}

impl GrammarError {
    /// Character offset the error refers to, if it refers to one.
    pub fn position(&self) -> Option<usize> {
        match self {
            GrammarError::InvalidPlayerCount { .. } => None,
            GrammarError::UnknownGate { position, .. }
            | GrammarError::Truncated { position, .. }
            | GrammarError::OperandOutOfRange { position, .. }
            | GrammarError::DuplicateOperand { position, .. } => Some(*position),
        }
    }
}

/// Converts an operand character into a 0-based player index.
///
/// Accepts exactly the character codes in `['1', '1' + num_players)`.
fn operand_index(c: char, num_players: usize) -> Option<usize> {
    let offset = (c as u32).checked_sub('1' as u32)? as usize;
    (offset < num_players).then_some(offset)
}

/// Left-to-right scanner over a game string.
///
/// Yields one `Ok(Instruction)` per token. The first malformed token yields a
/// single `Err` and ends the iteration.
#[derive(Debug, Clone)]
pub struct Tokens {
    chars: Vec<char>,
    position: usize,
    num_players: usize,
    finished: bool,
}

impl Tokens {
    /// Creates a scanner for `game_str` with operands checked against `num_players`.
    ///
    /// The scanner itself does not bound `num_players`; see
    /// [`validate_game`](crate::validation::validate_game) for that.
    pub fn new(game_str: &str, num_players: usize) -> Self {
        Self {
            chars: game_str.chars().collect(),
            position: 0,
            num_players,
            finished: false,
        }
    }

    fn fail(&mut self, err: GrammarError) -> Option<Result<Instruction, GrammarError>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl Iterator for Tokens {
    type Item = Result<Instruction, GrammarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.position >= self.chars.len() {
            return None;
        }

        let start = self.position;
        let found = self.chars[start];
        let Some(gate) = GateCode::from_char(found) else {
            return self.fail(GrammarError::UnknownGate { position: start, found });
        };

        let count = gate.operand_count();
        if start + count >= self.chars.len() {
            return self.fail(GrammarError::Truncated { position: start, gate });
        }

        let mut players = [0usize; 2];
        for (j, slot) in players.iter_mut().take(count).enumerate() {
            let c = self.chars[start + 1 + j];
            match operand_index(c, self.num_players) {
                Some(p) => *slot = p,
                None => {
                    return self.fail(GrammarError::OperandOutOfRange { position: start + 1 + j, found: c });
                }
            }
        }

        // Literal character comparison, on top of the range check above.
        if count > 1 && self.chars[start + 1] == self.chars[start + 2] {
            return self.fail(GrammarError::DuplicateOperand {
                position: start,
                gate,
                operand: self.chars[start + 1],
            });
        }

        self.position = start + 1 + count;
        let operands = if count == 1 {
            Operands::One(players[0])
        } else {
            Operands::Two(players[0], players[1])
        };
        Some(Ok(Instruction { gate, operands, position: start }))
    }
}

/// Convenience constructor for [`Tokens`].
pub fn tokenize(game_str: &str, num_players: usize) -> Tokens {
    Tokens::new(game_str, num_players)
}
