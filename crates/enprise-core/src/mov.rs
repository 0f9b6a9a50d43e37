//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// A chess move: an origin, a destination and, for a pawn reaching its last
/// rank, the kind it promotes to.
///
/// A move carries no legality information. Castling is a two-file king move
/// and en passant is a diagonal pawn move onto an empty square; the position
/// works out the side effects when the move is executed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move with no promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a pawn move that promotes to `kind`.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion kind, if one was chosen.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns the same move travelling the other way, without a promotion.
    #[inline]
    pub const fn reversed(self) -> Self {
        Move::new(self.to, self.from)
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion {
            Some(kind) => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.letter().to_ascii_lowercase()
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from coordinate notation.
    ///
    /// Accepts an optional fifth character naming the promotion kind. Whether
    /// the kind is a sensible promotion target is checked when the move is
    /// executed, not here.
    pub fn from_coordinate(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s.chars().nth(4) {
            Some(c) => Some(Move::with_promotion(from, to, PieceKind::from_letter(c)?)),
            None => Some(Move::new(from, to)),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_accessors() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
        assert_eq!(m.promotion(), None);
        assert_eq!(m.reversed(), Move::new(e4, e2));
    }

    #[test]
    fn move_coordinate() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::new(e2, e4).to_coordinate(), "e2e4");

        let e7 = Square::new(File::E, Rank::R7);
        assert_eq!(
            Move::with_promotion(e7, Square::E8, PieceKind::Knight).to_coordinate(),
            "e7e8n"
        );
    }

    #[test]
    fn move_from_coordinate() {
        let m = Move::from_coordinate("e2e4").unwrap();
        assert_eq!(m.from().to_algebraic(), "e2");
        assert_eq!(m.to().to_algebraic(), "e4");

        let promo = Move::from_coordinate("e7e8Q").unwrap();
        assert_eq!(promo.promotion(), Some(PieceKind::Queen));

        assert!(Move::from_coordinate("invalid").is_none());
        assert!(Move::from_coordinate("e2e9").is_none());
        assert!(Move::from_coordinate("e7e8x").is_none());
    }

    #[test]
    fn move_from_coordinate_edge_cases() {
        assert!(Move::from_coordinate("e2").is_none());
        assert!(Move::from_coordinate("e2e").is_none());
        assert!(Move::from_coordinate("e2e4qq").is_none());
        assert!(Move::from_coordinate("é2e4").is_none());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::from_coordinate("g1f3").unwrap();
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
