//! Move acceptance and win detection.

use super::{Board, Marker, CELLS};

/// The eight winning lines: rows first, then columns, then diagonals. Win
/// detection scans them in this order and the first full line decides.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Applies `turn`'s marker at `index` and returns the resulting board.
///
/// The move is silently rejected (the board comes back unchanged) when the
/// cell is already occupied or the game already has a winner. Rejection is
/// not an error condition.
pub fn apply_move(board: &Board, turn: Marker, index: usize) -> Board {
    if index >= CELLS || !board.is_vacant(index) || evaluate_winner(board).is_some() {
        return board.clone();
    }
    board.with_cell(index, turn)
}

/// Strict alternation. Call only after a move was accepted.
pub fn next_turn(turn: Marker) -> Marker {
    turn.opponent()
}

/// Returns the marker holding a full line, or `None` when the game is still
/// open. Derived from the snapshot on every call, never cached.
pub fn evaluate_winner(board: &Board) -> Option<Marker> {
    for [a, b, c] in LINES {
        match board.cell(a) {
            Some(marker) if board.cell(b) == Some(marker) && board.cell(c) == Some(marker) => {
                return Some(marker)
            }
            _ => {}
        }
    }
    None
}

/// Display status for the board view.
pub fn status_line(board: &Board, turn: Marker) -> String {
    match evaluate_winner(board) {
        Some(winner) => format!("Winner: {winner}"),
        None => format!("Next player: {turn}"),
    }
}
