//! The 8x8 board grid.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chess_core::{Color, Piece, PieceKind, Position, BOARD_SIZE};
use thiserror::Error;

/// Errors that can occur when parsing a board diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("invalid board: expected 8 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("invalid board: row {row} has {len} squares, expected 8")]
    InvalidRowLength { row: usize, len: usize },

    #[error("invalid board: unknown symbol '{symbol}' in row {row}")]
    InvalidSymbol { row: usize, symbol: char },
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of squares, each either empty (`None`) or holding a piece.
///
/// The board is a plain `Copy` value of 64 cells. Move simulation works on a
/// copy, so the live board is never left in an intermediate state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = color.home_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (x, kind) in BACK_RANK.into_iter().enumerate() {
                board.squares[home][x] = Some(Piece::new(color, kind));
                board.squares[pawns][x] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.y() as usize][pos.x() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Puts `piece` (or nothing) on the square, returning what was there.
    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[pos.y() as usize][pos.x() as usize], piece)
    }

    /// Places a piece on the square, returning what was there.
    #[inline]
    pub fn place(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        self.set(pos, Some(piece))
    }

    /// Empties the square, returning what was there.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.set(pos, None)
    }

    /// Iterates over every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square of the given color's king.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(pos, _)| pos)
    }

    /// Returns a copy of the board with the piece on `from` moved to `to`.
    ///
    /// Whatever stood on `to` is overwritten. No rule is checked.
    pub fn with_move(&self, from: Position, to: Position) -> Board {
        let mut next = *self;
        let piece = next.take(from);
        next.set(to, piece);
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        &self.squares[pos.y() as usize][pos.x() as usize]
    }
}

/// Prints one row per line, Black's back rank first, `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.squares.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for square in row {
                let c = square.map_or('.', Piece::to_char);
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}

/// Parses the diagram written by `Display`. Whitespace inside a row and
/// blank lines are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardParseError::InvalidRowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE as usize {
                return Err(BoardParseError::InvalidRowLength {
                    row: y,
                    len: row.len(),
                });
            }
            for (x, &symbol) in row.iter().enumerate() {
                board.squares[y][x] = match symbol {
                    '.' => None,
                    c => Some(
                        Piece::from_char(c)
                            .ok_or(BoardParseError::InvalidSymbol { row: y, symbol: c })?,
                    ),
                };
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(
            board.piece_at(pos("e1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(pos("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board.piece_at(pos("e2")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(board.is_empty(pos("e4")));
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
    }

    #[test]
    fn display_round_trips_standard() {
        let text = Board::standard().to_string();
        assert_eq!(
            text,
            "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR"
        );
        assert_eq!(text.parse::<Board>(), Ok(Board::standard()));
    }

    #[test]
    fn parse_ignores_spacing() {
        let board: Board = "
            . . . . k . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . K . . R
        "
        .parse()
        .unwrap();
        assert_eq!(board.king_position(Color::Black), Some(pos("e8")));
        assert_eq!(board.king_position(Color::White), Some(pos("e1")));
        assert_eq!(
            board[pos("h1")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "........".parse::<Board>(),
            Err(BoardParseError::InvalidRowCount(1))
        );
        let short = "........\n".repeat(7) + ".......";
        assert_eq!(
            short.parse::<Board>(),
            Err(BoardParseError::InvalidRowLength { row: 7, len: 7 })
        );
        let bad = "........\n".repeat(7) + ".......z";
        assert_eq!(
            bad.parse::<Board>(),
            Err(BoardParseError::InvalidSymbol { row: 7, symbol: 'z' })
        );
    }

    #[test]
    fn with_move_leaves_original_untouched() {
        let board = Board::standard();
        let next = board.with_move(pos("e2"), pos("e4"));
        assert!(next.is_empty(pos("e2")));
        assert_eq!(
            next.piece_at(pos("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn set_and_take_return_previous() {
        let mut board = Board::empty();
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        assert_eq!(board.place(pos("a1"), rook), None);
        assert_eq!(board.take(pos("a1")), Some(rook));
        assert!(board.is_empty(pos("a1")));
        assert_eq!(board.king_position(Color::White), None);
    }
}
