// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s over a fixed qubit register, followed by
//! a terminal measurement into a classical register.
//!
//! A game circuit is built once from a game string, executed once by a
//! [`Backend`](crate::backend::Backend) and then discarded.

use crate::core::{QcardsError, QubitId};
use crate::operations::Operation;
use std::fmt;

/// Measurement of one qubit into one classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Measurement {
    /// The measured wire.
    pub qubit: QubitId,
    /// Destination bit in the classical register.
    pub clbit: usize,
}

/// A quantum register, a classical register, the gates applied to the quantum
/// register in order, and the measurements performed after the last gate.
///
/// Analogy: a `qiskit.QuantumCircuit` with a single `QuantumRegister` and a
/// single `ClassicalRegister`.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    /// Order is execution order.
    operations: Vec<Operation>,
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubits and `num_clbits` classical bits.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            operations: Vec::new(),
            measurements: Vec::new(),
        }
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<(), QcardsError> {
        if qubit.index() < self.num_qubits {
            Ok(())
        } else {
            Err(QcardsError::SimulationError {
                message: format!("Qubit {} is outside a {}-qubit register", qubit, self.num_qubits),
            })
        }
    }

    /// Appends a gate to the end of the sequence.
    ///
    /// # Errors
    /// `QcardsError::SimulationError` if the gate addresses a qubit outside the
    /// register, or a two-qubit gate names the same qubit twice.
    pub fn add_operation(&mut self, op: Operation) -> Result<(), QcardsError> {
        let qubits = op.involved_qubits();
        for q in &qubits {
            self.check_qubit(*q)?;
        }
        if op.is_two_qubit() && qubits[0] == qubits[1] {
            return Err(QcardsError::SimulationError {
                message: format!("{} requires two distinct qubits, got {} twice", op.name(), qubits[0]),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Appends several gates in order, stopping at the first rejected one.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<(), QcardsError>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    /// Adds a measurement of `qubit` into classical bit `clbit`.
    pub fn measure(&mut self, qubit: QubitId, clbit: usize) -> Result<(), QcardsError> {
        self.check_qubit(qubit)?;
        if clbit >= self.num_clbits {
            return Err(QcardsError::SimulationError {
                message: format!("Classical bit {} is outside a {}-bit register", clbit, self.num_clbits),
            });
        }
        self.measurements.push(Measurement { qubit, clbit });
        Ok(())
    }

    /// Measures qubit `k` into classical bit `k` for every qubit that has a
    /// matching classical bit.
    pub fn measure_all(&mut self) {
        let width = self.num_qubits.min(self.num_clbits);
        self.measurements
            .extend((0..width).map(|k| Measurement { qubit: QubitId(k), clbit: k }));
    }

    /// Number of qubits in the quantum register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of bits in the classical register.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Terminal measurements, in the order they were added.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Returns the total number of gate operations (measurements excluded).
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no gate operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
///
/// Register bounds are checked once, in [`build`](CircuitBuilder::build).
pub struct CircuitBuilder {
    num_qubits: usize,
    num_clbits: usize,
    operations: Vec<Operation>,
    measure_all: bool,
}

impl CircuitBuilder {
    /// Starts a circuit over `num_qubits` qubits with a classical register of the same width.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits: num_qubits,
            operations: Vec::new(),
            measure_all: false,
        }
    }

    /// Overrides the classical register width.
    pub fn with_clbits(mut self, num_clbits: usize) -> Self {
        self.num_clbits = num_clbits;
        self
    }

    /// Adds a single operation to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    /// Requests a terminal [`Circuit::measure_all`].
    pub fn measure_all(mut self) -> Self {
        self.measure_all = true;
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Result<Circuit, QcardsError> {
        let mut circuit = Circuit::new(self.num_qubits, self.num_clbits);
        circuit.add_operations(self.operations)?;
        if self.measure_all {
            circuit.measure_all();
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "qcards::Circuit[{} operations on {} qubits, {} measurements]",
            self.operations.len(),
            self.num_qubits,
            self.measurements.len()
        )?;
        if self.num_qubits == 0 {
            return Ok(());
        }

        // One column per gate, plus one for the measurement layer.
        let num_cols = self.operations.len() + usize::from(!self.measurements.is_empty());
        let max_label_width = format!("q{}", self.num_qubits - 1).len();
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // grid[row][col] holds the wire segment, v_connect[row][col] the connector below it
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_cols]; self.num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_cols]; self.num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        for (t, op) in self.operations.iter().enumerate() {
            let (rows, symbols): (Vec<usize>, [&str; 2]) = match op {
                Operation::ControlledNot { control, target } => (vec![control.index(), target.index()], ["@", "X"]),
                Operation::Swap { a, b } => (vec![a.index(), b.index()], ["x", "x"]),
                single => (vec![single.involved_qubits()[0].index()], [single.name(), ""]),
            };
            for (row, symbol) in rows.iter().zip(symbols) {
                if let Some(cell) = grid.get_mut(*row).and_then(|r| r.get_mut(t)) {
                    *cell = format_gate(symbol);
                }
            }
            if let &[r1, r2] = rows.as_slice() {
                for row_vec in v_connect.iter_mut().take(r1.max(r2)).skip(r1.min(r2)) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        if !self.measurements.is_empty() {
            let t = num_cols - 1;
            for m in &self.measurements {
                if let Some(row) = grid.get_mut(m.qubit.index()) {
                    row[t] = format_gate(&format!("M{}", m.clbit));
                }
            }
        }

        for r in 0..self.num_qubits {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", grid[r].join(""))?;

            if r < self.num_qubits - 1 && v_connect[r].iter().any(|c| *c != ' ') {
                write!(f, "{}", label_padding)?;
                for connector in &v_connect[r] {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_measure_all_maps_qubit_to_same_clbit() -> Result<(), QcardsError> {
        let circuit = CircuitBuilder::new(3)
            .add_op(Operation::PauliX(QubitId(1)))
            .measure_all()
            .build()?;

        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.num_clbits(), 3);
        let pairs: Vec<(usize, usize)> = circuit.measurements().iter().map(|m| (m.qubit.index(), m.clbit)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
        Ok(())
    }

    #[test]
    fn test_out_of_range_qubit_rejected() {
        let result = CircuitBuilder::new(2).add_op(Operation::Hadamard(QubitId(2))).build();
        assert!(matches!(result, Err(QcardsError::SimulationError { .. })));
    }

    #[test]
    fn test_two_qubit_gate_needs_distinct_qubits() {
        let mut circuit = Circuit::new(2, 2);
        let err = circuit.add_operation(Operation::Swap { a: QubitId(1), b: QubitId(1) });
        assert!(err.is_err());
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_measure_rejects_missing_clbit() {
        let mut circuit = Circuit::new(2, 1);
        assert!(circuit.measure(QubitId(1), 0).is_ok());
        assert!(circuit.measure(QubitId(0), 1).is_err());
        assert_eq!(circuit.measurements().len(), 1);
    }

    #[test]
    fn test_display_draws_every_wire() -> Result<(), QcardsError> {
        let circuit = CircuitBuilder::new(2)
            .add_op(Operation::Hadamard(QubitId(0)))
            .add_op(Operation::ControlledNot { control: QubitId(0), target: QubitId(1) })
            .measure_all()
            .build()?;
        let drawing = circuit.to_string();

        assert!(drawing.starts_with("qcards::Circuit[2 operations on 2 qubits, 2 measurements]"));
        assert!(drawing.contains("q0: "));
        assert!(drawing.contains("q1: "));
        assert!(drawing.contains("───H───"));
        assert!(drawing.contains("───@───"));
        assert!(drawing.contains("──M1───"));
        assert!(drawing.contains('│'));
        Ok(())
    }
}
