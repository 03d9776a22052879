//! Headless engine-vs-engine match
//!
//! Plays the configured Black and White engines against each other, printing
//! the board after every turn. The first argument is an optional config file
//! (default `reversi.toml`).

use std::path::PathBuf;

use reversi::config::{AppConfig, DEFAULT_CONFIG_PATH};
use reversi::game::{step, EndReason, Game, StepResult};
use reversi::{AIEngine, Side, Strategy};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = AppConfig::load_or_default(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(path = %path.display(), found = path.exists(), "configuration loaded");

    let mut black = AIEngine::with_config(config.black.clone());
    let mut white = AIEngine::with_config(config.white.clone());

    println!(
        "{} {} (Black) vs {} {} (White)\n",
        black.face(),
        black.name(),
        white.face(),
        white.name()
    );

    let mut game = Game::new();
    println!("{}", game.board());

    let outcome = loop {
        let side = game.to_move();
        let strategy: &mut dyn Strategy = match side {
            Side::Black => &mut black,
            Side::White => &mut white,
        };

        match step(&mut game, strategy) {
            StepResult::Played(pos) => println!("{side} plays {pos}\n{}", game.board()),
            StepResult::Passed => println!("{side} passes\n"),
            StepResult::Forfeit(violation) => break game.forfeit(violation),
            StepResult::GameOver => break game.outcome(),
        }
    };

    println!("Black {} - White {}", outcome.black_discs, outcome.white_discs);
    if let EndReason::Forfeit { side, violation } = &outcome.reason {
        println!("{side} forfeits: {violation}");
    }
    match outcome.winner {
        Some(side) => println!("{side} wins after {} turns", outcome.turns.len()),
        None => println!("Draw after {} turns", outcome.turns.len()),
    }

    Ok(())
}
