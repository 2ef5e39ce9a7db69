// tests/simulation_tests.rs

use qcards::{Backend, Circuit, CircuitBuilder, NoiseProfile, Operation, OutcomeFrequencies, QcardsError, QubitId, Simulator};

// Helper function to create QubitId for tests
fn q(id: usize) -> QubitId {
    QubitId(id)
}

fn run(circuit: &Circuit, shots: u32) -> Result<OutcomeFrequencies, QcardsError> {
    Simulator::new().with_seed(2024).run(circuit, shots)
}

#[test]
fn test_unmeasured_circuit_reports_zero_width_register() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2).with_clbits(0).build()?;
    let outcomes = run(&circuit, 8)?;

    assert_eq!(outcomes.get(""), 8, "all shots land on the empty bitstring");
    Ok(())
}

#[test]
fn test_initial_state_measures_all_zero() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(3).measure_all().build()?;
    let outcomes = run(&circuit, 100)?;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes.get("000"), 100);
    Ok(())
}

#[test]
fn test_identity_operation() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::Identity(q(0)))
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 50)?.get("0"), 50, "identity shouldn't change outcome from |0>");
    Ok(())
}

#[test]
fn test_pauli_x_operation() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::PauliX(q(0)))
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 50)?.get("1"), 50, "X flips |0> to |1>");
    Ok(())
}

#[test]
fn test_pauli_y_flips_and_pauli_z_does_not() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::PauliY(q(0)))
        .add_op(Operation::PauliZ(q(1)))
        .measure_all()
        .build()?;

    // q1 = 0 (Z only changes phase), q0 = 1
    assert_eq!(run(&circuit, 40)?.get("01"), 40);
    Ok(())
}

#[test]
fn test_hadamard_splits_shots() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::Hadamard(q(0)))
        .measure_all()
        .build()?;
    let outcomes = run(&circuit, 4000)?;

    assert_eq!(outcomes.total_shots(), 4000);
    let ones = outcomes.get("1");
    assert!((1700..2300).contains(&ones), "expected about 2000 ones, got {}", ones);
    Ok(())
}

#[test]
fn test_hadamard_twice_interferes_back() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::Hadamard(q(0)))
        .add_op(Operation::Hadamard(q(0)))
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 200)?.get("0"), 200);
    Ok(())
}

#[test]
fn test_cnot_when_control_is_one() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::PauliX(q(0)))
        .add_op(Operation::ControlledNot { control: q(0), target: q(1) })
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 30)?.get("11"), 30);
    Ok(())
}

#[test]
fn test_cnot_when_control_is_zero() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::PauliX(q(1)))
        .add_op(Operation::ControlledNot { control: q(0), target: q(1) })
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 30)?.get("10"), 30, "target stays |1> when control is |0>");
    Ok(())
}

#[test]
fn test_bell_state_correlations() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::Hadamard(q(0)))
        .add_op(Operation::ControlledNot { control: q(0), target: q(1) })
        .measure_all()
        .build()?;
    let outcomes = run(&circuit, 1000)?;

    assert_eq!(outcomes.get("01") + outcomes.get("10"), 0, "Bell pair never disagrees");
    assert_eq!(outcomes.get("00") + outcomes.get("11"), 1000);
    assert!(outcomes.get("00") > 350 && outcomes.get("11") > 350);
    Ok(())
}

#[test]
fn test_swap_moves_excitation() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(3)
        .add_op(Operation::PauliX(q(0)))
        .add_op(Operation::Swap { a: q(0), b: q(2) })
        .measure_all()
        .build()?;

    assert_eq!(run(&circuit, 25)?.get("100"), 25);
    Ok(())
}

#[test]
fn test_seeded_runs_are_reproducible() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(3)
        .add_ops((0..3).map(|i| Operation::Hadamard(q(i))))
        .measure_all()
        .build()?;

    let a = Simulator::new().with_seed(99).run(&circuit, 500)?;
    let b = Simulator::new().with_seed(99).run(&circuit, 500)?;
    assert_eq!(a, b);
    assert_eq!(a.total_shots(), 500);
    Ok(())
}

#[test]
fn test_noisy_simulation_keeps_shot_count_and_adds_errors() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::PauliX(q(0)))
        .measure_all()
        .build()?;
    let noise = NoiseProfile::new(0.0, 0.0, 0.2)?;
    let outcomes = Simulator::new().with_seed(5).with_noise(noise).run(&circuit, 2000)?;

    assert_eq!(outcomes.total_shots(), 2000);
    let clean = outcomes.get("01");
    // Both bits survive readout with probability 0.8 * 0.8 = 0.64.
    assert!((1100..1460).contains(&clean), "expected about 1280 clean shots, got {}", clean);
    assert!(outcomes.len() > 1, "noise should produce more than one outcome");
    Ok(())
}

#[test]
fn test_gate_noise_on_two_qubit_gates() -> Result<(), QcardsError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::ControlledNot { control: q(0), target: q(1) })
        .measure_all()
        .build()?;
    let noise = NoiseProfile::new(0.0, 1.0, 0.0)?;
    let outcomes = Simulator::new().with_seed(8).with_noise(noise).run(&circuit, 600)?;

    // Every shot gets a Pauli on each qubit; only Z errors leave a qubit at 0.
    let untouched = outcomes.get("00");
    assert!((30..110).contains(&untouched), "expected about 67 untouched shots, got {}", untouched);
    Ok(())
}

#[test]
fn test_oversized_register_rejected() {
    let circuit = Circuit::new(qcards::core::MAX_SIMULATED_QUBITS + 1, 0);
    assert!(matches!(run(&circuit, 1), Err(QcardsError::SimulationError { .. })));
}
