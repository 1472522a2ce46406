//! Check detection.

use chess_core::{Color, Position};

use crate::movegen::can_piece_reach;
use crate::Board;

/// Returns true if any piece of color `by` can reach `target`.
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| can_piece_reach(board, from, target))
}

/// Returns true if the king of `color` is attacked by an opposing piece.
///
/// A board without that king is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_position(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king attacked.
///
/// The move is played on a copy of the board; `board` itself is untouched.
pub fn would_be_in_check(board: &Board, from: Position, to: Position) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    is_king_in_check(&board.with_move(from, to), piece.color)
}
