// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitudes of an `n`-qubit register over the computational basis.
///
/// The vector has `2^n` entries. Basis index bit `k` holds the value of qubit `k`,
/// so qubit 0 is the least significant bit.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the all-zero basis state |0...0> over `num_qubits` qubits.
    pub(crate) fn zero_state(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Self { amplitudes, num_qubits }
    }

    /// Wraps an explicit amplitude vector. Its length must be a power of two.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Self {
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        debug_assert_eq!(1usize << num_qubits, amplitudes.len());
        Self { amplitudes, num_qubits }
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Born-rule probability of every basis state, in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
