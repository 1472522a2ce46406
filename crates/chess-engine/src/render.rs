//! Read-only snapshot of a game for views.

use chess_core::{Color, Overlay, Piece, PieceKind, Position, Promotion};

use crate::rules::Outcome;
use crate::Board;

/// Everything a view needs to draw one frame.
///
/// The snapshot borrows from the game, so the game cannot change while a
/// view holds it and the view cannot change the game through it.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub board: &'a Board,
    pub turn: Color,
    pub selected: Option<Position>,
    pub valid_moves: &'a [Position],
    /// Square a pawn skipped on the previous ply, if any.
    pub en_passant: Option<Position>,
    pub captured_by_white: &'a [Piece],
    pub captured_by_black: &'a [Piece],
    pub white_in_check: bool,
    pub black_in_check: bool,
    /// Square of the pawn waiting for a promotion choice.
    pub promotion: Option<Position>,
    pub outcome: Option<Outcome>,
}

impl RenderState<'_> {
    /// Returns the pieces `color` has captured.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => self.captured_by_white,
            Color::Black => self.captured_by_black,
        }
    }

    /// Returns true if the king of `color` is in check.
    pub fn in_check(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }

    /// Returns the choices to offer while a promotion is pending.
    pub fn promotion_choices(&self) -> &'static [Promotion] {
        if self.promotion.is_some() {
            &Promotion::ALL
        } else {
            &[]
        }
    }

    fn is_en_passant_capture(&self, pos: Position) -> bool {
        let selected_pawn = self
            .selected
            .and_then(|from| self.board.piece_at(from))
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        selected_pawn && self.en_passant == Some(pos)
    }

    /// Returns the highlight to draw on `pos`, if any.
    ///
    /// Selection wins over move markers; a checked king is marked even when
    /// nothing is selected. A pawn's en passant destination is empty but
    /// still marked as a capture.
    pub fn overlay_at(&self, pos: Position) -> Option<Overlay> {
        if self.selected == Some(pos) {
            return Some(Overlay::Selected);
        }
        let piece = self.board.piece_at(pos);
        if self.valid_moves.contains(&pos) {
            let captures = piece.is_some() || self.is_en_passant_capture(pos);
            return Some(if captures {
                Overlay::Capture
            } else {
                Overlay::Move
            });
        }
        match piece {
            Some(Piece {
                kind: PieceKind::King,
                color,
            }) if self.in_check(color) => Some(Overlay::Check),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ChessGame;

    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn overlays_follow_selection() {
        let mut game = ChessGame::new();
        game.select(pos("e2")).unwrap();
        let state = game.render_state();
        assert_eq!(state.overlay_at(pos("e2")), Some(Overlay::Selected));
        assert_eq!(state.overlay_at(pos("e3")), Some(Overlay::Move));
        assert_eq!(state.overlay_at(pos("e4")), Some(Overlay::Move));
        assert_eq!(state.overlay_at(pos("e5")), None);
        assert!(state.promotion_choices().is_empty());
    }

    #[test]
    fn capture_and_check_overlays() {
        let board: Board = "....k...
                            ........
                            ........
                            ........
                            ........
                            ........
                            ....q...
                            ...QK..."
            .parse()
            .unwrap();
        let mut game = ChessGame::from_board(board, Color::White);
        {
            let state = game.render_state();
            assert!(state.in_check(Color::White));
            assert!(!state.in_check(Color::Black));
            assert_eq!(state.overlay_at(pos("e1")), Some(Overlay::Check));
        }
        game.select(pos("d1")).unwrap();
        let state = game.render_state();
        assert_eq!(state.overlay_at(pos("e2")), Some(Overlay::Capture));
        assert_eq!(state.valid_moves, &[pos("e2")]);
    }

    #[test]
    fn en_passant_destination_is_a_capture() {
        let mut game = ChessGame::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            game.attempt_move(pos(from), pos(to)).unwrap();
        }
        game.select(pos("e5")).unwrap();
        let state = game.render_state();
        assert_eq!(state.en_passant, Some(pos("d6")));
        assert_eq!(state.overlay_at(pos("d6")), Some(Overlay::Capture));
        assert_eq!(state.overlay_at(pos("e6")), Some(Overlay::Move));
    }

    #[test]
    fn skipped_square_is_a_plain_move_for_other_pieces() {
        let mut game = ChessGame::new();
        for (from, to) in [("h2", "h3"), ("d7", "d6"), ("h3", "h4"), ("c8", "e6"), ("b2", "b4")] {
            game.attempt_move(pos(from), pos(to)).unwrap();
        }
        game.select(pos("e6")).unwrap();
        let state = game.render_state();
        assert_eq!(state.en_passant, Some(pos("b3")));
        assert_eq!(state.overlay_at(pos("b3")), Some(Overlay::Move));
        assert_eq!(state.overlay_at(pos("a2")), Some(Overlay::Capture));
    }
}
