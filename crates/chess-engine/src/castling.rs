//! Castling rights and geometry.

use chess_core::{Color, Position};

/// The two directions a king may castle in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column of the rook before castling.
    #[inline]
    pub const fn rook_origin_x(self) -> i8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column of the rook after castling; also the square the king passes.
    #[inline]
    pub const fn rook_target_x(self) -> i8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_x(self) -> i8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Returns the side a two-file king move toward `to_x` castles on.
    #[inline]
    pub const fn from_king_target(to_x: i8) -> Option<Self> {
        match to_x {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Returns the rook's home corner for the given color.
    pub fn rook_home(self, color: Color) -> Option<Position> {
        Position::new(self.rook_origin_x(), color.home_row() as i8)
    }

    /// Returns the side whose rook starts on `pos` for `color`, if any.
    pub fn for_rook_home(color: Color, pos: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.rook_home(color) == Some(pos))
    }
}

/// The column every king starts on.
pub const KING_HOME_X: i8 = 4;

/// Castling rights flags.
///
/// Rights are only ever removed: once a flag is cleared nothing sets it again
/// for the lifetime of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns these rights plus one more; only used to build starting rights.
    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> Self {
        CastlingRights(self.0 | Self::flag(color, side))
    }

    /// Returns true if `color` still holds the right to castle on `side`.
    #[inline]
    pub const fn can_castle(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Kingside)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Queenside)
    }

    /// Removes a single right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Removes the right tied to the rook corner `pos`, if it is one.
    pub fn remove_rook_home(&mut self, color: Color, pos: Position) {
        if let Some(side) = CastleSide::for_rook_home(color, pos) {
            self.remove(color, side);
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove(Color::White, CastleSide::Kingside);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_none() {
        let rights = CastlingRights::NONE;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                assert!(!rights.can_castle(color, side));
            }
        }
        assert_eq!(rights.raw(), 0);
    }

    #[test]
    fn remove_rook_home_only_touches_corners() {
        let mut rights = CastlingRights::ALL;
        rights.remove_rook_home(Color::Black, Position::new(3, 0).unwrap());
        assert_eq!(rights, CastlingRights::ALL);

        rights.remove_rook_home(Color::Black, Position::new(0, 0).unwrap());
        assert!(!rights.can_castle_queenside(Color::Black));
        assert!(rights.can_castle_kingside(Color::Black));

        // White's corner on row 0 is not a white rook home.
        rights.remove_rook_home(Color::White, Position::new(7, 0).unwrap());
        assert!(rights.can_castle_kingside(Color::White));
    }

    #[test]
    fn side_geometry() {
        assert_eq!(CastleSide::from_king_target(6), Some(CastleSide::Kingside));
        assert_eq!(CastleSide::from_king_target(2), Some(CastleSide::Queenside));
        assert_eq!(CastleSide::from_king_target(5), None);
        assert_eq!(
            CastleSide::Kingside.rook_home(Color::White),
            Position::from_algebraic("h1")
        );
        assert_eq!(
            CastleSide::Queenside.rook_home(Color::Black),
            Position::from_algebraic("a8")
        );
    }
}
