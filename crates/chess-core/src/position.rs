//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// Returns true if `(x, y)` lies on the 8x8 board.
#[inline]
pub const fn in_bounds(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_SIZE as i8 && y >= 0 && y < BOARD_SIZE as i8
}

/// Error returned when parsing a position from algebraic notation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid square: '{0}'")]
pub struct PositionParseError(pub String);

/// A square on the board, addressed by column `x` and row `y`.
///
/// Row 0 is Black's back rank (a8..h8) and row 7 is White's (a1..h1).
/// A `Position` can only be built through checked constructors, so every
/// value in hand is on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    y: u8,
    x: u8,
}

impl Position {
    /// Creates a position, or `None` when off the board.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<Self> {
        if in_bounds(x, y) {
            Some(Position {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Returns the column (0-7, file a to h).
    #[inline]
    pub const fn x(self) -> i8 {
        self.x as i8
    }

    /// Returns the row (0-7, rank 8 down to rank 1).
    #[inline]
    pub const fn y(self) -> i8 {
        self.y as i8
    }

    /// Returns the square `(dx, dy)` away, or `None` when that leaves the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Position::new(self.x() + dx, self.y() + dy)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position { x, y }))
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Position::new((file - b'a') as i8, (b'8' - rank) as i8)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.x) as char;
        let rank = (b'8' - self.y) as char;
        format!("{}{}", file, rank)
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_algebraic(s.trim()).ok_or_else(|| PositionParseError(s.to_string()))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {} {})", self.x, self.y, self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
