//! Search module for the Reversi AI
//!
//! Contains the depth-bounded minimax search with alpha-beta pruning used by
//! the move selector.

pub mod alphabeta;

pub use alphabeta::{search, SearchStats, Searcher, INF};
