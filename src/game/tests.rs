use super::{apply_move, evaluate_winner, next_turn, status_line, Board, Marker};

fn board_with(moves: &[(usize, Marker)]) -> Board {
    let mut board = Board::new();
    for &(index, marker) in moves {
        board = apply_move(&board, marker, index);
    }
    board
}

#[test]
fn empty_board_has_no_winner() {
    assert_eq!(evaluate_winner(&Board::new()), None);
}

#[test]
fn all_eight_lines_are_detected() {
    let lines: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
    for line in lines {
        let mut board = Board::new();
        for index in line {
            board = board.with_cell(index, Marker::O);
        }
        assert_eq!(
            evaluate_winner(&board),
            Some(Marker::O),
            "line {line:?} should win"
        );
    }
}

#[test]
fn two_in_a_row_is_not_a_win() {
    let board = board_with(&[(0, Marker::X), (3, Marker::O), (1, Marker::X)]);
    assert_eq!(evaluate_winner(&board), None);
}

#[test]
fn occupied_cell_rejects_the_move() {
    let board = board_with(&[(4, Marker::X)]);
    let after = apply_move(&board, Marker::O, 4);
    assert_eq!(after, board);
}

#[test]
fn out_of_range_index_rejects_the_move() {
    let board = Board::new();
    let after = apply_move(&board, Marker::X, 9);
    assert_eq!(after, board);
}

#[test]
fn moves_after_a_winner_are_no_ops() {
    let mut board = Board::new();
    for index in [0, 1, 2] {
        board = board.with_cell(index, Marker::X);
    }
    assert_eq!(evaluate_winner(&board), Some(Marker::X));
    let after = apply_move(&board, Marker::O, 5);
    assert_eq!(after, board);
}

#[test]
fn accepted_moves_strictly_alternate() {
    let mut board = Board::new();
    let mut turn = Marker::X;
    let mut placed = Vec::new();
    for index in [8, 0, 7, 1, 6] {
        let next = apply_move(&board, turn, index);
        assert_ne!(next, board, "move at {index} should be accepted");
        board = next;
        placed.push((index, turn));
        turn = next_turn(turn);
    }
    assert_eq!(
        placed.iter().map(|&(_, marker)| marker).collect::<Vec<_>>(),
        vec![Marker::X, Marker::O, Marker::X, Marker::O, Marker::X]
    );
    for (index, marker) in placed {
        assert_eq!(board.cell(index), Some(marker));
    }
}

#[test]
fn top_row_scenario_wins_for_x_after_fifth_move() {
    let mut board = Board::new();
    let mut turn = Marker::X;
    for (count, index) in [0, 4, 1, 3, 2].into_iter().enumerate() {
        assert_eq!(evaluate_winner(&board), None, "no winner before move {count}");
        board = apply_move(&board, turn, index);
        turn = next_turn(turn);
    }
    assert_eq!(evaluate_winner(&board), Some(Marker::X));
}

#[test]
fn status_reports_turn_then_winner() {
    let board = Board::new();
    assert_eq!(status_line(&board, Marker::X), "Next player: X");
    assert_eq!(status_line(&board, Marker::O), "Next player: O");

    let mut board = board;
    for index in [0, 1, 2] {
        board = board.with_cell(index, Marker::O);
    }
    assert_eq!(status_line(&board, Marker::X), "Winner: O");
}

#[test]
fn first_full_line_in_scan_order_decides() {
    // Impossible under alternation, but the scan order is fixed: the top row
    // is checked before the bottom one.
    let mut board = Board::new();
    for index in [0, 1, 2] {
        board = board.with_cell(index, Marker::X);
    }
    for index in [6, 7, 8] {
        board = board.with_cell(index, Marker::O);
    }
    assert_eq!(evaluate_winner(&board), Some(Marker::X));
}
