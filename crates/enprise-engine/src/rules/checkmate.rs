//! Checkmate detection.
//!
//! The decision runs from the cheapest and most decisive tests to the
//! exhaustive block search: king escape, capture of a single checker, the
//! cases that cannot be blocked, and finally interposition.

use crate::movegen::{attackers, piece_squares, would_own_king_be_in_check};
use crate::Position;
use enprise_core::{BoardError, Color, PieceKind, Square};
use std::fmt;

/// Why a king is or is not checkmated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MateStatus {
    /// The king is not attacked.
    NotInCheck,
    /// The king can step out of check.
    KingCanEscape { to: Square },
    /// The only checking piece can be taken safely.
    CheckerCanBeCaptured { by: Square },
    /// A piece can interpose between the king and the only checker.
    CheckCanBeBlocked { by: Square, at: Square },
    /// Checkmate: two pieces give check and the king cannot move.
    DoubleCheck,
    /// Checkmate: a knight checks and cannot be taken.
    KnightCheck,
    /// Checkmate: the checker touches the king and cannot be taken.
    ContactCheck,
    /// Checkmate: nothing escapes, captures or blocks.
    NoDefence,
}

impl MateStatus {
    /// Returns true if the king is checkmated.
    pub const fn is_checkmate(self) -> bool {
        matches!(
            self,
            MateStatus::DoubleCheck
                | MateStatus::KnightCheck
                | MateStatus::ContactCheck
                | MateStatus::NoDefence
        )
    }

    /// Returns true if the king is in check, mated or not.
    pub const fn is_check(self) -> bool {
        !matches!(self, MateStatus::NotInCheck)
    }
}

impl fmt::Display for MateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MateStatus::NotInCheck => write!(f, "not in check"),
            MateStatus::KingCanEscape { to } => write!(f, "king can move out of check to {}", to),
            MateStatus::CheckerCanBeCaptured { by } => {
                write!(f, "checking piece can be taken by the piece on {}", by)
            }
            MateStatus::CheckCanBeBlocked { by, at } => {
                write!(f, "piece on {} can block the check on {}", by, at)
            }
            MateStatus::DoubleCheck => {
                write!(f, "checkmate: more than one checking piece, so no block or capture")
            }
            MateStatus::KnightCheck => {
                write!(f, "checkmate: a knight check cannot be blocked")
            }
            MateStatus::ContactCheck => {
                write!(f, "checkmate: an adjacent checker cannot be blocked")
            }
            MateStatus::NoDefence => write!(f, "checkmate: no capture or block"),
        }
    }
}

/// Decides whether the king of `color` is checkmated.
///
/// Every escape, capture and block is played out on a copy of the position,
/// so a king taking its checker while walking into another attack, or a
/// pinned piece stepping off its line, is not counted as a defence.
pub fn checkmate_status(position: &Position, color: Color) -> Result<MateStatus, BoardError> {
    let king_square = position.square_of_piece(color, PieceKind::King)?;
    let checking = attackers(position, king_square, color);
    if checking.is_empty() {
        return Ok(MateStatus::NotInCheck);
    }

    let king = position.occupant_at(king_square)?;
    for to in piece_squares(position, king_square, king) {
        if !would_own_king_be_in_check(position, king_square, to, color)? {
            return Ok(MateStatus::KingCanEscape { to });
        }
    }

    let Some(checker_square) = checking.single() else {
        return Ok(MateStatus::DoubleCheck);
    };

    if let Some(by) = find_capture(position, checker_square, color)? {
        return Ok(MateStatus::CheckerCanBeCaptured { by });
    }

    let checker = position.occupant_at(checker_square)?;
    if checker.kind == PieceKind::Knight {
        return Ok(MateStatus::KnightCheck);
    }
    if checker_square.is_adjacent(king_square) {
        return Ok(MateStatus::ContactCheck);
    }

    for at in king_square.between(checker_square) {
        for (by, defender) in position.pieces(color) {
            if defender.kind == PieceKind::King {
                continue;
            }
            if piece_squares(position, by, defender).contains(at)
                && !would_own_king_be_in_check(position, by, at, color)?
            {
                return Ok(MateStatus::CheckCanBeBlocked { by, at });
            }
        }
    }

    Ok(MateStatus::NoDefence)
}

/// Finds a piece of `color` that can take the checker on `checker_square`
/// without leaving its own king in check.
///
/// Besides pieces landing on the checker's square, a checking pawn that has
/// just advanced two squares may be taken en passant.
fn find_capture(
    position: &Position,
    checker_square: Square,
    color: Color,
) -> Result<Option<Square>, BoardError> {
    for by in attackers(position, checker_square, color.opposite()) {
        if !would_own_king_be_in_check(position, by, checker_square, color)? {
            return Ok(Some(by));
        }
    }

    let checker = position.occupant_at(checker_square)?;
    if checker.kind != PieceKind::Pawn || checker.times_moved != 1 {
        return Ok(None);
    }
    let Some(behind) = checker_square.offset(0, color.pawn_direction()) else {
        return Ok(None);
    };
    for side in [-1, 1] {
        let Some(by) = checker_square.offset(side, 0) else {
            continue;
        };
        let Some(pawn) = position.get(by) else {
            continue;
        };
        if pawn.kind == PieceKind::Pawn
            && pawn.color == color
            && position.is_empty(behind)
            && piece_squares(position, by, pawn).contains(behind)
            && !would_own_king_be_in_check(position, by, behind, color)?
        {
            return Ok(Some(by));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupant;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn put(pos: &mut Position, s: &str, kind: PieceKind, color: Color) {
        pos.place(sq(s), Occupant::new(kind, color));
    }

    #[test]
    fn startpos_not_in_check() {
        let pos = Position::startpos();
        assert_eq!(checkmate_status(&pos, Color::White), Ok(MateStatus::NotInCheck));
        assert!(!MateStatus::NotInCheck.is_check());
    }

    #[test]
    fn back_rank_mate() {
        let mut pos = Position::empty();
        put(&mut pos, "g1", PieceKind::King, Color::White);
        put(&mut pos, "f2", PieceKind::Pawn, Color::White);
        put(&mut pos, "g2", PieceKind::Pawn, Color::White);
        put(&mut pos, "h2", PieceKind::Pawn, Color::White);
        put(&mut pos, "a1", PieceKind::Rook, Color::Black);
        put(&mut pos, "h8", PieceKind::King, Color::Black);

        let status = checkmate_status(&pos, Color::White).unwrap();
        assert_eq!(status, MateStatus::NoDefence);
        assert!(status.is_checkmate());
    }

    #[test]
    fn back_rank_check_blocked() {
        let mut pos = Position::empty();
        put(&mut pos, "g1", PieceKind::King, Color::White);
        put(&mut pos, "f2", PieceKind::Pawn, Color::White);
        put(&mut pos, "g2", PieceKind::Pawn, Color::White);
        put(&mut pos, "h2", PieceKind::Pawn, Color::White);
        put(&mut pos, "d3", PieceKind::Bishop, Color::White);
        put(&mut pos, "a1", PieceKind::Rook, Color::Black);
        put(&mut pos, "h8", PieceKind::King, Color::Black);

        assert_eq!(
            checkmate_status(&pos, Color::White),
            Ok(MateStatus::CheckCanBeBlocked {
                by: sq("d3"),
                at: sq("f1")
            })
        );
    }

    #[test]
    fn pinned_blocker_does_not_help() {
        let mut pos = Position::empty();
        put(&mut pos, "g1", PieceKind::King, Color::White);
        put(&mut pos, "f2", PieceKind::Pawn, Color::White);
        put(&mut pos, "h2", PieceKind::Pawn, Color::White);
        put(&mut pos, "g2", PieceKind::Knight, Color::White);
        put(&mut pos, "g8", PieceKind::Rook, Color::Black);
        put(&mut pos, "a1", PieceKind::Rook, Color::Black);
        put(&mut pos, "h8", PieceKind::King, Color::Black);

        // Ng2-e1 would block, but the knight is pinned by the g8 rook.
        assert_eq!(checkmate_status(&pos, Color::White), Ok(MateStatus::NoDefence));
    }

    #[test]
    fn king_takes_into_check_is_not_a_capture() {
        let mut pos = Position::empty();
        put(&mut pos, "h1", PieceKind::King, Color::White);
        put(&mut pos, "h2", PieceKind::Pawn, Color::White);
        put(&mut pos, "g1", PieceKind::Queen, Color::Black);
        put(&mut pos, "g8", PieceKind::Rook, Color::Black);
        put(&mut pos, "a8", PieceKind::King, Color::Black);

        assert_eq!(checkmate_status(&pos, Color::White), Ok(MateStatus::ContactCheck));
    }

    #[test]
    fn checking_pawn_taken_en_passant() {
        let mut pos = Position::empty();
        put(&mut pos, "a4", PieceKind::King, Color::White);
        put(&mut pos, "a3", PieceKind::Pawn, Color::White);
        put(&mut pos, "b3", PieceKind::Pawn, Color::White);
        put(&mut pos, "b4", PieceKind::Knight, Color::White);
        put(&mut pos, "a5", PieceKind::Bishop, Color::White);
        put(&mut pos, "c5", PieceKind::Pawn, Color::White);
        put(&mut pos, "b7", PieceKind::Pawn, Color::Black);
        put(&mut pos, "b8", PieceKind::Rook, Color::Black);
        put(&mut pos, "h8", PieceKind::King, Color::Black);
        pos.move_piece(sq("b7"), sq("b5")).unwrap();

        assert_eq!(
            checkmate_status(&pos, Color::White),
            Ok(MateStatus::CheckerCanBeCaptured { by: sq("c5") })
        );
    }

    #[test]
    fn display_reasons() {
        assert_eq!(MateStatus::NotInCheck.to_string(), "not in check");
        assert_eq!(
            MateStatus::KingCanEscape { to: Square::F1 }.to_string(),
            "king can move out of check to f1"
        );
        assert!(MateStatus::KnightCheck.to_string().starts_with("checkmate"));
    }
}
