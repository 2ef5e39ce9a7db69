//! Plays a few Q|cards> games on the local simulator and prints the circuits
//! and scores. Set `RUST_LOG=qcards=debug` to watch the pipeline.

use qcards::{
    build_circuit, build_permutation, get_scores, is_valid_game, validate_game, ExecutionMode, Game, GameConfig,
    NoiseProfile, QcardsError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QcardsError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("--- qcards Example: three-player game ---");

    let game_str = "H1C12X3S23";
    let num_players = 3;
    println!("Game string: {} ({} players), valid: {}", game_str, num_players, is_valid_game(game_str, num_players));

    // Show the circuit for one random seating
    let mut rng = StdRng::seed_from_u64(17);
    let permutation = build_permutation(num_players, &mut rng);
    let circuit = build_circuit(game_str, num_players, &permutation)?;
    println!("\nSeating: {}", permutation);
    println!("Circuit Definition:\n{}", circuit);

    // --- Ideal vs noisy ---
    let ideal = Game::new(GameConfig::default().with_seed(17)).play(game_str, num_players)?;
    println!("\nIdeal scores:  {}", ideal);

    let noisy_config = GameConfig::default()
        .with_mode(ExecutionMode::Noisy)
        .with_seed(17)
        .with_noise(NoiseProfile::new(0.01, 0.05, 0.05)?);
    let noisy = Game::new(noisy_config).play(game_str, num_players)?;
    println!("Noisy scores:  {}", noisy);

    // --- Invalid input ---
    for (bad, players) in [("C11", 2), ("H1X", 1), ("Q1", 1)] {
        match validate_game(bad, players) {
            Ok(()) => println!("{:?} unexpectedly valid", bad),
            Err(reason) => println!("\n{:?} rejected: {}", bad, reason),
        }
        println!("  scores: {}", get_scores(bad, players, true, false)?);
    }

    Ok(())
}
