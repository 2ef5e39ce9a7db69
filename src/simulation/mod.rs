// src/simulation/mod.rs

//! Local execution of [`Circuit`]s.
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` that evolves the state vector.

pub(crate) mod engine;
mod noise;

pub use noise::NoiseProfile;

use crate::backend::{Backend, OutcomeFrequencies};
use crate::circuits::Circuit;
use crate::core::QcardsError;
use crate::validation::check_normalization;
use engine::{Pauli, SimulationEngine, uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// State-vector simulator implementing [`Backend`].
///
/// Without a noise profile every shot is sampled from one evolved state. With
/// one, every shot runs its own noisy trajectory.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
    noise: Option<NoiseProfile>,
}

impl Simulator {
    /// Creates an ideal simulator drawing fresh entropy for every run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every run reproducible from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables noisy simulation. An all-zero profile behaves as ideal.
    pub fn with_noise(mut self, noise: NoiseProfile) -> Self {
        self.noise = Some(noise);
        self
    }

    /// The configured noise profile, if any.
    pub fn noise(&self) -> Option<&NoiseProfile> {
        self.noise.as_ref()
    }

    /// Runs `circuit` for `shots` shots using the caller's random source.
    ///
    /// # Returns
    /// * `Ok(OutcomeFrequencies)` with counts summing to `shots`. Bitstrings are
    ///   `circuit.num_clbits()` wide; unmeasured classical bits read `0`.
    /// * `Err(QcardsError)` if the circuit is too wide, or the noise profile is invalid.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> Result<OutcomeFrequencies, QcardsError> {
        match self.noise.filter(|n| !n.is_ideal()) {
            None => self.run_ideal(circuit, shots, rng),
            Some(noise) => {
                noise.validate()?;
                self.run_noisy(circuit, shots, &noise, rng)
            }
        }
    }

    fn run_ideal<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> Result<OutcomeFrequencies, QcardsError> {
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        if cfg!(debug_assertions) {
            check_normalization(engine.state(), None)?;
        }
        debug!(qubits = circuit.num_qubits(), shots, "sampling ideal state");

        let mut outcomes = OutcomeFrequencies::new();
        for _ in 0..shots {
            let index = engine.sample(rng);
            outcomes.record(read_out(circuit, index, 0.0, rng), 1);
        }
        Ok(outcomes)
    }

    fn run_noisy<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: &NoiseProfile,
        rng: &mut R,
    ) -> Result<OutcomeFrequencies, QcardsError> {
        debug!(qubits = circuit.num_qubits(), shots, ?noise, "running noisy trajectories");
        let mut outcomes = OutcomeFrequencies::new();
        for _ in 0..shots {
            let mut engine = SimulationEngine::init(circuit.num_qubits())?;
            for op in circuit.operations() {
                engine.apply_operation(op)?;
                let p = if op.is_two_qubit() { noise.two_qubit_error } else { noise.single_qubit_error };
                for qubit in op.involved_qubits() {
                    if uniform(rng) < p {
                        engine.apply_pauli(qubit, Pauli::random(rng))?;
                    }
                }
            }
            let index = engine.sample(rng);
            outcomes.record(read_out(circuit, index, noise.readout_error, rng), 1);
        }
        Ok(outcomes)
    }
}

impl Backend for Simulator {
    fn name(&self) -> &str {
        if self.noise.is_some_and(|n| !n.is_ideal()) { "qcards-noisy-simulator" } else { "qcards-simulator" }
    }

    fn run(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeFrequencies, QcardsError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(circuit, shots, &mut rng)
    }
}

/// Copies measured qubit values out of basis index `index` into the classical
/// register and renders it most significant bit first.
fn read_out<R: Rng + ?Sized>(circuit: &Circuit, index: usize, readout_error: f64, rng: &mut R) -> String {
    let mut clbits = vec![false; circuit.num_clbits()];
    for m in circuit.measurements() {
        let mut bit = (index >> m.qubit.index()) & 1 == 1;
        if readout_error > 0.0 && uniform(rng) < readout_error {
            bit = !bit;
        }
        clbits[m.clbit] = bit;
    }
    clbits.iter().rev().map(|b| if *b { '1' } else { '0' }).collect()
}
