//! Move generation.
//!
//! Candidates are produced per piece kind and then filtered for king safety:
//! - [`pseudo_legal_moves`] follows piece geometry only (plus castling, whose
//!   preconditions already involve attack tests)
//! - [`legal_moves`] drops candidates that leave the mover's king attacked
//!   and adds a safe en passant capture

mod attacks;

use chess_core::{Color, PieceKind, Position};

use crate::castling::{CastleSide, CastlingRights, KING_HOME_X};
use crate::check::{is_king_in_check, would_be_in_check};
use crate::Board;

pub use attacks::{
    can_piece_reach, is_path_clear, BISHOP_DIRECTIONS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};

/// The history-dependent state move generation needs besides the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveContext {
    pub castling: CastlingRights,
    /// Square a pawn skipped over on the previous ply, if any.
    pub en_passant: Option<Position>,
}

/// Generates the geometric destinations for the piece on `from`.
///
/// En passant is not included; see [`en_passant_capture`].
pub fn pseudo_legal_moves(board: &Board, from: Position, ctx: &MoveContext) -> Vec<Position> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from),
        PieceKind::Rook => sliding_moves(board, from, &ROOK_DIRECTIONS),
        PieceKind::Knight => step_moves(board, from, &KNIGHT_OFFSETS),
        PieceKind::Bishop => sliding_moves(board, from, &BISHOP_DIRECTIONS),
        PieceKind::Queen => sliding_moves(board, from, &QUEEN_DIRECTIONS),
        PieceKind::King => {
            let mut moves = step_moves(board, from, &QUEEN_DIRECTIONS);
            moves.extend(castling_moves(board, from, ctx.castling));
            moves
        }
    }
}

/// Generates the legal destinations for the piece on `from`.
pub fn legal_moves(board: &Board, from: Position, ctx: &MoveContext) -> Vec<Position> {
    let mut moves: Vec<Position> = pseudo_legal_moves(board, from, ctx)
        .into_iter()
        .filter(|&to| !would_be_in_check(board, from, to))
        .collect();
    moves.extend(en_passant_capture(board, from, ctx));
    moves
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_moves(board: &Board, color: Color, ctx: &MoveContext) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(board, from, ctx).is_empty())
}

/// Single and double pushes plus diagonal captures.
fn pawn_moves(board: &Board, from: Position) -> Vec<Position> {
    let mut moves = Vec::new();
    let Some(pawn) = board.piece_at(from) else {
        return moves;
    };
    let dir = pawn.color.forward();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        moves.push(one);

        if from.y() == pawn.color.pawn_row() as i8 {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| board.is_empty(sq)) {
                moves.push(two);
            }
        }
    }

    for dx in [-1, 1] {
        let Some(target) = from.offset(dx, dir) else {
            continue;
        };
        if board
            .piece_at(target)
            .is_some_and(|victim| victim.color != pawn.color)
        {
            moves.push(target);
        }
    }

    moves
}

/// Returns the en passant destination for the pawn on `from`, if the capture
/// is available and does not expose the mover's king.
///
/// The simulation removes the captured pawn as well, which the generic
/// [`would_be_in_check`] cannot do since the victim is not on the
/// destination square.
pub fn en_passant_capture(board: &Board, from: Position, ctx: &MoveContext) -> Option<Position> {
    let target = ctx.en_passant?;
    let pawn = board.piece_at(from).filter(|p| p.kind == PieceKind::Pawn)?;

    if target.y() != from.y() + pawn.color.forward() || (target.x() - from.x()).abs() != 1 {
        return None;
    }

    let victim_square = Position::new(target.x(), from.y())?;
    let victim = board
        .piece_at(victim_square)
        .filter(|v| v.kind == PieceKind::Pawn && v.color != pawn.color)?;
    if !board.is_empty(target) {
        return None;
    }

    let mut after = board.with_move(from, target);
    after.take(victim_square);
    tracing::trace!(%from, %target, captured = %victim, "testing en passant");

    (!is_king_in_check(&after, pawn.color)).then_some(target)
}

/// Fixed-offset moves onto empty or opposing squares (knight, king).
fn step_moves(board: &Board, from: Position, offsets: &[(i8, i8)]) -> Vec<Position> {
    let Some(mover) = board.piece_at(from) else {
        return Vec::new();
    };

    offsets
        .iter()
        .filter_map(|&(dx, dy)| from.offset(dx, dy))
        .filter(|&to| board.piece_at(to).map_or(true, |p| p.color != mover.color))
        .collect()
}

/// Ray moves: empty squares until a blocker, which is included only when it
/// can be captured.
fn sliding_moves(board: &Board, from: Position, directions: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();
    let Some(mover) = board.piece_at(from) else {
        return moves;
    };

    for &(dx, dy) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            current = next;
            match board.piece_at(next) {
                None => moves.push(next),
                Some(blocker) => {
                    if blocker.color != mover.color {
                        moves.push(next);
                    }
                    break;
                }
            }
        }
    }

    moves
}

/// King destinations for castling that satisfy every precondition: the right
/// is held, the rook is home, the squares between are empty, and the king is
/// neither in check nor passing through or landing on an attacked square.
fn castling_moves(board: &Board, king: Position, rights: CastlingRights) -> Vec<Position> {
    let mut moves = Vec::new();
    let Some(piece) = board.piece_at(king) else {
        return moves;
    };
    let color = piece.color;
    let y = color.home_row() as i8;

    if piece.kind != PieceKind::King || king.x() != KING_HOME_X || king.y() != y {
        return moves;
    }

    for side in CastleSide::ALL {
        if !rights.can_castle(color, side) {
            continue;
        }
        let Some(rook_home) = side.rook_home(color) else {
            continue;
        };
        let rook_in_place = board
            .piece_at(rook_home)
            .is_some_and(|r| r.kind == PieceKind::Rook && r.color == color);
        if !rook_in_place {
            continue;
        }

        let dx = (rook_home.x() - king.x()).signum();
        if !is_path_clear(board, king, rook_home, dx, 0) || is_king_in_check(board, color) {
            continue;
        }

        let (Some(pass), Some(land)) = (
            Position::new(side.rook_target_x(), y),
            Position::new(side.king_target_x(), y),
        ) else {
            continue;
        };
        if !would_be_in_check(board, king, pass) && !would_be_in_check(board, king, land) {
            moves.push(land);
        }
    }

    moves
}
