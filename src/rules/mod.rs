//! Game rules for 6x6 Reversi
//!
//! This module implements:
//! - Legality of a placement and row-major move enumeration
//! - Move application (placement plus flipping)
//! - Corner-risk check used by the move selector
//! - End-of-game detection and disc tally

pub mod flip;
pub mod moves;
pub mod outcome;

// Re-exports for convenient access
pub use flip::{apply_move, flipped_positions};
pub use moves::{gives_opponent_corner, has_legal_move, is_legal, legal_moves};
pub use outcome::{disc_count, is_game_over, winner};
