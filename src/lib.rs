//! Deterministic 6x6 Reversi engine
//!
//! Legal-move generation, disc flipping and a depth-bounded minimax search
//! with alpha-beta pruning over a fixed 6x6 board:
//! - Black moves first from the usual centre cross
//! - A move must bracket at least one opponent run in one of 8 directions
//! - A side without legal moves passes; the game ends when neither can move
//! - Most discs wins
//!
//! # Architecture
//!
//! - [`board`]: Board representation, sides and positions
//! - [`rules`]: Move legality, flipping, corner risk and end of game
//! - [`eval`]: Positional weights plus edge stability
//! - [`search`]: Minimax with alpha-beta pruning
//! - [`engine`]: Move selection with the corner filter, behind [`Strategy`]
//! - [`game`]: Turn loop with passes and forfeits
//! - [`config`]: TOML configuration for the binaries
//!
//! # Quick Start
//!
//! ```
//! use reversi::{AIEngine, Board, EngineConfig, Side};
//!
//! let board = Board::new();
//! let mut engine = AIEngine::with_config(EngineConfig { depth: 3, ..EngineConfig::default() });
//!
//! if let Some(pos) = engine.get_move(&board, Side::Black) {
//!     let board = reversi::rules::apply_move(&board, Side::Black, pos);
//!     println!("Black plays {pos}\n{board}");
//! }
//! ```
//!
//! # Move Selection
//!
//! For every legal move the engine:
//! 1. Drops it if the opponent could then take a corner
//! 2. Scores the reply tree with alpha-beta to the configured depth
//! 3. Keeps the first move with the highest score
//!
//! When every legal move gives away a corner no move is chosen, which the
//! [`game`] driver treats as a forfeit.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, Side, BOARD_SIZE};
pub use config::AppConfig;
pub use engine::{AIEngine, EngineConfig, MoveResult, Strategy};
pub use error::{BoardParseError, ConfigError, RuleViolation};
pub use game::{Game, GameOutcome};
