// src/operations/mod.rs

//! The gate operations a game circuit can contain.
//!
//! Each game-string gate code maps onto exactly one variant; see
//! [`Operation::from_gate`].

use crate::core::QubitId;
use crate::grammar::GateCode;

/// A single- or two-qubit gate applied to circuit wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Hadamard: takes |0> to an equal superposition.
    Hadamard(QubitId),
    /// Identity: leaves the qubit untouched (still scheduled, so it still
    /// picks up gate noise on noisy backends).
    Identity(QubitId),
    /// Pauli-X, the bit flip.
    PauliX(QubitId),
    /// Pauli-Y, bit and phase flip.
    PauliY(QubitId),
    /// Pauli-Z, the phase flip.
    PauliZ(QubitId),
    /// Flips `target` when `control` is |1>.
    ControlledNot {
        /// The qubit whose value conditions the flip.
        control: QubitId,
        /// The qubit that is flipped.
        target: QubitId,
    },
    /// Exchanges the states of two qubits.
    Swap {
        /// First qubit.
        a: QubitId,
        /// Second qubit.
        b: QubitId,
    },
}

impl Operation {
    /// Builds the operation for a gate code over already-permuted qubits.
    ///
    /// For one-operand gates `second` is ignored; two-operand gates require it.
    /// Returns `None` if a two-operand gate is given only one qubit.
    pub fn from_gate(gate: GateCode, first: QubitId, second: Option<QubitId>) -> Option<Self> {
        let op = match gate {
            GateCode::H => Operation::Hadamard(first),
            GateCode::I => Operation::Identity(first),
            GateCode::X => Operation::PauliX(first),
            GateCode::Y => Operation::PauliY(first),
            GateCode::Z => Operation::PauliZ(first),
            GateCode::C => Operation::ControlledNot { control: first, target: second? },
            GateCode::S => Operation::Swap { a: first, b: second? },
        };
        Some(op)
    }

    /// Returns the qubits the operation acts on, in operand order.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard(q)
            | Operation::Identity(q)
            | Operation::PauliX(q)
            | Operation::PauliY(q)
            | Operation::PauliZ(q) => vec![*q],
            Operation::ControlledNot { control, target } => vec![*control, *target],
            Operation::Swap { a, b } => vec![*a, *b],
        }
    }

    /// `true` for the two-qubit gates.
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Operation::ControlledNot { .. } | Operation::Swap { .. })
    }

    /// Short gate name used in logs and diagrams.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hadamard(_) => "H",
            Operation::Identity(_) => "I",
            Operation::PauliX(_) => "X",
            Operation::PauliY(_) => "Y",
            Operation::PauliZ(_) => "Z",
            Operation::ControlledNot { .. } => "CX",
            Operation::Swap { .. } => "SWAP",
        }
    }
}
