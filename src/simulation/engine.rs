// src/simulation/engine.rs
use crate::core::{QcardsError, QubitId, StateVector, MAX_SIMULATED_QUBITS};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::f64::consts::FRAC_1_SQRT_2;

type Matrix2 = [[Complex<f64>; 2]; 2];
type Matrix4 = [[Complex<f64>; 4]; 4];

/// The three non-identity Pauli errors injected by noisy simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    /// Picks X, Y or Z with equal probability.
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match (uniform(rng) * 3.0) as usize {
            0 => Pauli::X,
            1 => Pauli::Y,
            _ => Pauli::Z,
        }
    }

    fn matrix(self) -> Matrix2 {
        match self {
            Pauli::X => pauli_x(),
            Pauli::Y => pauli_y(),
            Pauli::Z => pauli_z(),
        }
    }
}

/// Draws from `[0, 1)`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardUniform.sample(rng)
}

/// State-vector engine evolving the register of one circuit run.
/// (Internal visibility)
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in |0...0> over `num_qubits` qubits.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, QcardsError> {
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(QcardsError::SimulationError {
                message: format!("{} qubits exceeds the simulator limit of {}", num_qubits, MAX_SIMULATED_QUBITS),
            });
        }
        Ok(Self {
            state: StateVector::zero_state(num_qubits),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), QcardsError> {
        if state.dim() != self.state.dim() {
            Err(QcardsError::SimulationError {
                message: format!("Cannot set state: provided dimension {} does not match engine dimension {}", state.dim(), self.state.dim())
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies one gate to the register.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), QcardsError> {
        match op {
            Operation::Hadamard(q) => self.apply_single_qubit_gate(*q, &hadamard()),
            Operation::Identity(q) => self.apply_single_qubit_gate(*q, &identity()),
            Operation::PauliX(q) => self.apply_single_qubit_gate(*q, &pauli_x()),
            Operation::PauliY(q) => self.apply_single_qubit_gate(*q, &pauli_y()),
            Operation::PauliZ(q) => self.apply_single_qubit_gate(*q, &pauli_z()),
            Operation::ControlledNot { control, target } => {
                self.apply_two_qubit_gate(*control, *target, &controlled_not())
            }
            Operation::Swap { a, b } => self.apply_two_qubit_gate(*a, *b, &swap()),
        }
    }

    /// Applies a Pauli error to one qubit.
    pub(crate) fn apply_pauli(&mut self, qubit: QubitId, pauli: Pauli) -> Result<(), QcardsError> {
        self.apply_single_qubit_gate(qubit, &pauli.matrix())
    }

    /// Samples a basis index with Born-rule probabilities.
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        sample_index(&self.state.probabilities(), rng)
    }

    fn bit_mask(&self, qubit: QubitId) -> Result<usize, QcardsError> {
        if qubit.index() < self.num_qubits {
            Ok(1 << qubit.index())
        } else {
            Err(QcardsError::SimulationError {
                message: format!("Qubit {} not found in a {}-qubit simulation", qubit, self.num_qubits),
            })
        }
    }

    /// Applies a 2x2 matrix to one qubit, in place.
    fn apply_single_qubit_gate(&mut self, qubit: QubitId, matrix: &Matrix2) -> Result<(), QcardsError> {
        let mask = self.bit_mask(qubit)?;
        let amps = self.state.amplitudes_mut();

        // Visit each pair of basis states differing only at the target bit once.
        for i0 in (0..amps.len()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Applies a 4x4 matrix to two distinct qubits, in place.
    ///
    /// Matrix rows and columns are indexed `2 * b1 + b2`, where `b1` is the value
    /// of `first` and `b2` the value of `second`.
    fn apply_two_qubit_gate(&mut self, first: QubitId, second: QubitId, matrix: &Matrix4) -> Result<(), QcardsError> {
        if first == second {
            return Err(QcardsError::SimulationError { message: "Target qubits for a two-qubit gate cannot be the same".to_string() });
        }
        let m1 = self.bit_mask(first)?;
        let m2 = self.bit_mask(second)?;
        let amps = self.state.amplitudes_mut();

        for base in (0..amps.len()).filter(|i| i & (m1 | m2) == 0) {
            let indices = [base, base | m2, base | m1, base | m1 | m2];
            let psi = indices.map(|idx| amps[idx]);

            for (row, idx) in indices.iter().enumerate() {
                amps[*idx] = (0..4).fold(Complex::zero(), |acc, col| acc + matrix[row][col] * psi[col]);
            }
        }
        Ok(())
    }
}

/// Walks the cumulative distribution of `probabilities` with one uniform draw.
///
/// Falls back to the last outcome with non-zero probability when rounding
/// leaves the draw past the end.
pub(crate) fn sample_index<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let total: f64 = probabilities.iter().sum();
    let draw = uniform(rng) * total;
    let mut cumulative = 0.0;
    for (index, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return index;
        }
    }
    probabilities.iter().rposition(|p| *p > 0.0).unwrap_or(0)
}

fn c(re: f64, im: f64) -> Complex<f64> {
    Complex::new(re, im)
}

fn identity() -> Matrix2 {
    [[Complex::one(), Complex::zero()], [Complex::zero(), Complex::one()]]
}

fn hadamard() -> Matrix2 {
    [
        [c(FRAC_1_SQRT_2, 0.0), c(FRAC_1_SQRT_2, 0.0)],
        [c(FRAC_1_SQRT_2, 0.0), c(-FRAC_1_SQRT_2, 0.0)],
    ]
}

fn pauli_x() -> Matrix2 {
    [[Complex::zero(), Complex::one()], [Complex::one(), Complex::zero()]]
}

fn pauli_y() -> Matrix2 {
    [[Complex::zero(), -Complex::i()], [Complex::i(), Complex::zero()]]
}

fn pauli_z() -> Matrix2 {
    [[Complex::one(), Complex::zero()], [Complex::zero(), -Complex::one()]]
}

/// First qubit controls, second is flipped.
fn controlled_not() -> Matrix4 {
    let (o, l) = (Complex::zero(), Complex::one());
    [
        [l, o, o, o],
        [o, l, o, o],
        [o, o, o, l],
        [o, o, l, o],
    ]
}

fn swap() -> Matrix4 {
    let (o, l) = (Complex::zero(), Complex::one());
    [
        [l, o, o, o],
        [o, o, l, o],
        [o, l, o, o],
        [o, o, o, l],
    ]
}
