//! Two-player grid game: a fixed 9-cell board, alternating turns, and win
//! detection recomputed from scratch after every move.
//!
//! The engine is pure: every operation takes a board snapshot and returns a
//! new one, and the winner is always derived, never cached.

mod board;
mod rules;
#[cfg(test)]
mod tests;

pub use board::{Board, Marker, CELLS};
pub use rules::{apply_move, evaluate_winner, next_turn, status_line};
