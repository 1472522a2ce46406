//! Interactive game state.
//!
//! [`ChessGame`] is the state machine the view layer drives one input event
//! at a time:
//!
//! ```text
//! Idle --select--> PieceSelected --attempt_move--> Idle
//!                       |                            ^
//!                       +--deselect------------------+
//! PieceSelected --attempt_move (pawn reaches last row)--> PromotionPending
//! PromotionPending --resolve_promotion--> Idle
//! ```
//!
//! Every operation either succeeds or returns a [`GameError`] with the state
//! left exactly as it was, so a caller may treat errors as no-ops.

use chess_core::{Color, Piece, PieceKind, Position, Promotion};
use thiserror::Error;

use crate::castling::{CastleSide, CastlingRights, KING_HOME_X};
use crate::check::is_king_in_check;
use crate::movegen::{has_legal_moves, legal_moves, MoveContext};
use crate::render::RenderState;
use crate::rules::{self, Outcome};
use crate::Board;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// A pawn promotion must be resolved before anything else.
    #[error("a pawn promotion is waiting for a choice")]
    PromotionPending,
    /// `resolve_promotion` was called with no promotion pending.
    #[error("no pawn promotion is pending")]
    NoPromotionPending,
    /// The square holds no piece.
    #[error("no piece on {0}")]
    EmptySquare(Position),
    /// The square holds a piece of the side not to move.
    #[error("the piece on {square} belongs to {owner}, but it is {turn}'s turn")]
    NotYourPiece {
        square: Position,
        owner: Color,
        turn: Color,
    },
    /// The destination is not a legal move for the piece.
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Position, to: Position },
}

/// What kind of move was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    DoublePush,
    Capture,
    EnPassant,
    Castle(CastleSide),
    /// The pawn reached the last row; a choice is now pending.
    Promotion,
}

/// A record of an executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    /// The piece that moved, as it was before the move.
    pub piece: Piece,
    /// The piece removed from the board, including en passant victims.
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

/// A chess game driven by select / move / promote events.
#[derive(Debug, Clone)]
pub struct ChessGame {
    board: Board,
    turn: Color,
    selected: Option<Position>,
    valid_moves: Vec<Position>,
    castling: CastlingRights,
    en_passant: Option<Position>,
    /// Pieces taken, indexed by the capturing color.
    captured: [Vec<Piece>; 2],
    /// Check flags, indexed by color.
    in_check: [bool; 2],
    promotion: Option<Position>,
    outcome: Option<Outcome>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        ChessGame {
            board: Board::standard(),
            turn: Color::White,
            selected: None,
            valid_moves: Vec::new(),
            castling: CastlingRights::ALL,
            en_passant: None,
            captured: [Vec::new(), Vec::new()],
            in_check: [false; 2],
            promotion: None,
            outcome: None,
        }
    }

    /// Creates a game from a custom board with `turn` to move.
    ///
    /// A castling right is granted only where king and rook stand on their
    /// home squares. Check flags and the outcome are computed immediately.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut castling = CastlingRights::NONE;
        for color in Color::ALL {
            let king_home = Position::new(KING_HOME_X, color.home_row() as i8);
            let king_home = king_home.and_then(|sq| board.piece_at(sq));
            if king_home != Some(Piece::new(color, PieceKind::King)) {
                continue;
            }
            for side in CastleSide::ALL {
                let rook = side.rook_home(color).and_then(|sq| board.piece_at(sq));
                if rook == Some(Piece::new(color, PieceKind::Rook)) {
                    castling = castling.with(color, side);
                }
            }
        }

        let mut game = ChessGame {
            board,
            turn,
            castling,
            ..ChessGame::new()
        };
        game.refresh_check_flags();
        game.outcome = rules::evaluate(&game.board, game.turn, &game.context());
        game
    }

    /// Discards all state and starts over from the standard position.
    pub fn reset(&mut self) {
        tracing::debug!("game reset");
        *self = ChessGame::new();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the selected square, if any.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Returns the legal destinations of the selected piece.
    pub fn valid_moves(&self) -> &[Position] {
        &self.valid_moves
    }

    /// Returns the remaining castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the square a pawn skipped on the previous ply, if any.
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    /// Returns the pieces `color` has captured, in capture order.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Returns true if the king of `color` is in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.in_check[color.index()]
    }

    /// Returns the square of the pawn waiting to be promoted, if any.
    pub fn promotion_target(&self) -> Option<Position> {
        self.promotion
    }

    /// Returns the outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_valid_moves(&self, color: Color) -> bool {
        has_legal_moves(&self.board, color, &self.context())
    }

    /// Returns the legal destinations of the piece on `from`, whoever owns it.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Position> {
        legal_moves(&self.board, from, &self.context())
    }

    /// Returns a read-only snapshot for rendering.
    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            board: &self.board,
            turn: self.turn,
            selected: self.selected,
            valid_moves: &self.valid_moves,
            en_passant: self.en_passant,
            captured_by_white: &self.captured[Color::White.index()],
            captured_by_black: &self.captured[Color::Black.index()],
            white_in_check: self.in_check[Color::White.index()],
            black_in_check: self.in_check[Color::Black.index()],
            promotion: self.promotion,
            outcome: self.outcome,
        }
    }

    /// Selects the piece on `pos` and computes its legal moves.
    ///
    /// Fails without touching the current selection if the square is empty,
    /// holds an opposing piece, or the game is not accepting moves.
    pub fn select(&mut self, pos: Position) -> Result<&[Position], GameError> {
        self.ensure_accepting_moves()?;
        self.own_piece_at(pos)?;

        self.selected = Some(pos);
        self.valid_moves = self.legal_moves_from(pos);
        tracing::trace!(square = %pos, moves = self.valid_moves.len(), "selected");
        Ok(&self.valid_moves)
    }

    /// Clears the selection and its cached moves.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// `to` must be a legal destination for a piece of the side to move. When
    /// `from` is the current selection the cached moves are used.
    pub fn attempt_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, GameError> {
        self.ensure_accepting_moves()?;
        let piece = self.own_piece_at(from)?;

        let legal = if self.selected == Some(from) {
            self.valid_moves.contains(&to)
        } else {
            self.legal_moves_from(from).contains(&to)
        };
        if !legal {
            return Err(GameError::IllegalMove { from, to });
        }

        Ok(self.execute(from, to, piece))
    }

    /// Replaces the pawn waiting on the last row with `choice` and passes
    /// the turn.
    pub fn resolve_promotion(&mut self, choice: Promotion) -> Result<Piece, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let square = self.promotion.ok_or(GameError::NoPromotionPending)?;

        let promoted = Piece::new(self.turn, choice.kind());
        self.board.place(square, promoted);
        self.promotion = None;
        tracing::debug!(%square, piece = %promoted, "pawn promoted");

        self.finish_turn();
        Ok(promoted)
    }

    fn context(&self) -> MoveContext {
        MoveContext {
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    fn ensure_accepting_moves(&self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if self.promotion.is_some() {
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    fn own_piece_at(&self, square: Position) -> Result<Piece, GameError> {
        let piece = self
            .board
            .piece_at(square)
            .ok_or(GameError::EmptySquare(square))?;
        if piece.color != self.turn {
            return Err(GameError::NotYourPiece {
                square,
                owner: piece.color,
                turn: self.turn,
            });
        }
        Ok(piece)
    }

    /// Applies a move known to be legal. The steps are order dependent.
    fn execute(&mut self, from: Position, to: Position, piece: Piece) -> MoveRecord {
        let color = piece.color;
        let mut kind = MoveKind::Quiet;
        let mut captured = None;

        // En passant: the victim sits beside the mover, not on `to`.
        if piece.kind == PieceKind::Pawn && self.en_passant == Some(to) && to.x() != from.x() {
            if let Some(victim_square) = Position::new(to.x(), from.y()) {
                if let Some(victim) = self.board.take(victim_square) {
                    self.record_capture(color, victim);
                    captured = Some(victim);
                    kind = MoveKind::EnPassant;
                }
            }
        }

        self.en_passant = None;
        if piece.kind == PieceKind::Pawn && (to.y() - from.y()).abs() == 2 {
            self.en_passant = Position::new(from.x(), (from.y() + to.y()) / 2);
            kind = MoveKind::DoublePush;
        }

        match piece.kind {
            PieceKind::King => self.castling.remove_color(color),
            PieceKind::Rook => self.castling.remove_rook_home(color, from),
            _ => {}
        }

        if piece.kind == PieceKind::King && (to.x() - from.x()).abs() == 2 {
            if let Some(side) = CastleSide::from_king_target(to.x()) {
                let rook_from = Position::new(side.rook_origin_x(), from.y());
                let rook_to = Position::new(side.rook_target_x(), from.y());
                if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                    let rook = self.board.take(rook_from);
                    self.board.set(rook_to, rook);
                    kind = MoveKind::Castle(side);
                }
            }
        }

        if let Some(victim) = self.board.piece_at(to) {
            self.record_capture(color, victim);
            // A rook taken on its corner can never castle.
            if victim.kind == PieceKind::Rook {
                self.castling.remove_rook_home(victim.color, to);
            }
            captured = Some(victim);
            kind = MoveKind::Capture;
        }

        self.board.place(to, piece);
        self.board.take(from);

        self.deselect();

        if piece.kind == PieceKind::Pawn && to.y() == color.promotion_row() as i8 {
            kind = MoveKind::Promotion;
            self.promotion = Some(to);
            self.refresh_check_flags();
            tracing::debug!(%from, %to, %piece, "pawn awaiting promotion");
        } else {
            tracing::debug!(%from, %to, %piece, ?kind, "move executed");
            self.finish_turn();
        }

        MoveRecord {
            from,
            to,
            piece,
            captured,
            kind,
        }
    }

    fn record_capture(&mut self, capturer: Color, victim: Piece) {
        self.captured[capturer.index()].push(victim);
    }

    fn refresh_check_flags(&mut self) {
        for color in Color::ALL {
            self.in_check[color.index()] = is_king_in_check(&self.board, color);
        }
    }

    /// Passes the move to the other side and checks whether it can move.
    fn finish_turn(&mut self) {
        self.turn = self.turn.opposite();
        self.refresh_check_flags();
        self.outcome = rules::evaluate(&self.board, self.turn, &self.context());
        if let Some(outcome) = self.outcome {
            tracing::debug!(%outcome, "game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn play(game: &mut ChessGame, from: &str, to: &str) -> MoveRecord {
        game.select(pos(from)).unwrap();
        game.attempt_move(pos(from), pos(to)).unwrap()
    }

    #[test]
    fn new_game() {
        let game = ChessGame::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.selected(), None);
        assert!(game.valid_moves().is_empty());
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant_target(), None);
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_game_over());
    }

    #[test]
    fn select_own_piece() {
        let mut game = ChessGame::new();
        let moves = game.select(pos("g1")).unwrap().to_vec();
        assert_eq!(moves.len(), 2);
        assert_eq!(game.selected(), Some(pos("g1")));
    }

    #[test]
    fn select_rejections_keep_state() {
        let mut game = ChessGame::new();
        game.select(pos("e2")).unwrap();

        assert_eq!(
            game.select(pos("e4")),
            Err(GameError::EmptySquare(pos("e4")))
        );
        assert_eq!(
            game.select(pos("e7")),
            Err(GameError::NotYourPiece {
                square: pos("e7"),
                owner: Color::Black,
                turn: Color::White,
            })
        );
        assert_eq!(game.selected(), Some(pos("e2")));
        assert_eq!(game.valid_moves().len(), 2);
    }

    #[test]
    fn deselect_clears_cache() {
        let mut game = ChessGame::new();
        game.select(pos("b1")).unwrap();
        game.deselect();
        assert_eq!(game.selected(), None);
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn move_flips_turn_and_clears_selection() {
        let mut game = ChessGame::new();
        let record = play(&mut game, "e2", "e4");
        assert_eq!(record.kind, MoveKind::DoublePush);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.selected(), None);
        assert!(game.valid_moves().is_empty());
        assert_eq!(game.en_passant_target(), Some(pos("e3")));
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut game = ChessGame::new();
        game.select(pos("e2")).unwrap();
        assert_eq!(
            game.attempt_move(pos("e2"), pos("e5")),
            Err(GameError::IllegalMove {
                from: pos("e2"),
                to: pos("e5"),
            })
        );
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn move_without_selection_is_validated() {
        let mut game = ChessGame::new();
        let record = game.attempt_move(pos("g1"), pos("f3")).unwrap();
        assert_eq!(record.kind, MoveKind::Quiet);
        assert!(game.attempt_move(pos("g8"), pos("g6")).is_err());
    }

    #[test]
    fn capture_is_recorded() {
        let mut game = ChessGame::new();
        play(&mut game, "e2", "e4");
        play(&mut game, "d7", "d5");
        let record = play(&mut game, "e4", "d5");
        assert_eq!(record.kind, MoveKind::Capture);
        assert_eq!(
            record.captured,
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(
            game.captured_by(Color::White),
            &[Piece::new(Color::Black, PieceKind::Pawn)]
        );
        assert!(game.captured_by(Color::Black).is_empty());
    }

    #[test]
    fn from_board_derives_castling_rights() {
        let board: Board = "r...k...
                            ........
                            ........
                            ........
                            ........
                            ........
                            ........
                            ....K..R"
            .parse()
            .unwrap();
        let game = ChessGame::from_board(board, Color::White);
        let rights = game.castling_rights();
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn fools_mate() {
        let mut game = ChessGame::new();
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        play(&mut game, "d8", "h4");
        assert!(game.is_in_check(Color::White));
        assert_eq!(
            game.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(!game.has_valid_moves(Color::White));
        assert_eq!(game.select(pos("e1")), Err(GameError::GameOver));
    }

    #[test]
    fn reset_restores_start() {
        let mut game = ChessGame::new();
        play(&mut game, "e2", "e4");
        game.reset();
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn resolve_without_pending_promotion() {
        let mut game = ChessGame::new();
        assert_eq!(
            game.resolve_promotion(Promotion::Queen),
            Err(GameError::NoPromotionPending)
        );
    }
}
