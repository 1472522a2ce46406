//! End-of-game detection.

use chess_core::Color;

use crate::check::is_king_in_check;
use crate::movegen::{has_legal_moves, MoveContext};
use crate::Board;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move has no legal move and is in check.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl Outcome {
    /// Returns the winning color, or `None` for a stalemate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Returns the outcome if `to_move` cannot move, otherwise `None`.
pub fn evaluate(board: &Board, to_move: Color, ctx: &MoveContext) -> Option<Outcome> {
    if has_legal_moves(board, to_move, ctx) {
        return None;
    }
    if is_king_in_check(board, to_move) {
        Some(Outcome::Checkmate {
            winner: to_move.opposite(),
        })
    } else {
        Some(Outcome::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    #[test]
    fn opening_is_not_over() {
        let ctx = MoveContext::default();
        assert_eq!(evaluate(&Board::standard(), Color::White, &ctx), None);
    }

    #[test]
    fn back_rank_mate() {
        let b = board(
            "R.....k.
             .....ppp
             ........
             ........
             ........
             ........
             ........
             ....K...",
        );
        let outcome = evaluate(&b, Color::Black, &MoveContext::default());
        assert_eq!(
            outcome,
            Some(Outcome::Checkmate {
                winner: Color::White
            })
        );
        assert_eq!(outcome.and_then(Outcome::winner), Some(Color::White));
    }

    #[test]
    fn queen_stalemate() {
        let b = board(
            ".......k
             .....Q..
             ......K.
             ........
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            evaluate(&b, Color::Black, &MoveContext::default()),
            Some(Outcome::Stalemate)
        );
        assert_eq!(Outcome::Stalemate.winner(), None);
    }

    #[test]
    fn display() {
        let mate = Outcome::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(mate.to_string(), "Checkmate, Black wins");
        assert_eq!(Outcome::Stalemate.to_string(), "Stalemate");
    }
}
