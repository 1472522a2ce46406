//! Piece reachability shared by move generation and check detection.

use chess_core::{PieceKind, Position};

use crate::Board;

/// Knight jump offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight directions; also the king's step offsets.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Returns true if the piece on `from` attacks `to`.
///
/// Turn order, king safety, castling and en passant are ignored: this is pure
/// geometry plus blocking. An empty `from` reaches nothing, and no piece
/// reaches its own square.
pub fn can_piece_reach(board: &Board, from: Position, to: Position) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }

    let dx = (to.x() - from.x()).signum();
    let dy = (to.y() - from.y()).signum();
    let abs_x = (to.x() - from.x()).abs();
    let abs_y = (to.y() - from.y()).abs();

    match piece.kind {
        PieceKind::Pawn => abs_x == 1 && to.y() - from.y() == piece.color.forward(),
        PieceKind::Knight => (abs_x == 1 && abs_y == 2) || (abs_x == 2 && abs_y == 1),
        PieceKind::Bishop => abs_x == abs_y && is_path_clear(board, from, to, dx, dy),
        PieceKind::Rook => (dx == 0 || dy == 0) && is_path_clear(board, from, to, dx, dy),
        PieceKind::Queen => {
            (dx == 0 || dy == 0 || abs_x == abs_y) && is_path_clear(board, from, to, dx, dy)
        }
        PieceKind::King => abs_x <= 1 && abs_y <= 1,
    }
}

/// Returns true if every square strictly between `from` and `to`, walking in
/// steps of `(dx, dy)`, is empty.
///
/// Returns false if the walk leaves the board before reaching `to`.
pub fn is_path_clear(board: &Board, from: Position, to: Position, dx: i8, dy: i8) -> bool {
    if dx == 0 && dy == 0 {
        return false;
    }
    let mut current = from;
    loop {
        current = match current.offset(dx, dy) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if !board.is_empty(current) {
            return false;
        }
    }
}
