//! Legality filtering: pseudo-legal moves that do not expose the mover's
//! own king.

use super::{attackers, piece_squares, pseudo_legal_squares, MoveList};
use crate::{Bitboard, Position};
use enprise_core::{BoardError, Color, Move, PieceKind, Square};

/// Returns true if `to` is a pseudo-legal destination of the piece on `from`.
///
/// This does not look at king safety; see [`would_own_king_be_in_check`].
pub fn is_move_legal(position: &Position, from: Square, to: Square) -> Result<bool, BoardError> {
    Ok(pseudo_legal_squares(position, from)?.contains(to))
}

/// Plays `from`-`to` on a copy of the position and reports whether the king
/// of `color` is attacked afterwards.
pub fn would_own_king_be_in_check(
    position: &Position,
    from: Square,
    to: Square,
    color: Color,
) -> Result<bool, BoardError> {
    let mut scratch = position.clone();
    scratch.move_piece(from, to)?;
    is_king_in_check(&scratch, color)
}

/// Returns the destinations of the piece on `from` that are pseudo-legal and
/// leave its own king safe.
pub fn legal_squares(position: &Position, from: Square) -> Result<Bitboard, BoardError> {
    let piece = position.occupant_at(from)?;
    let mut squares = Bitboard::EMPTY;
    for to in piece_squares(position, from, piece) {
        if !would_own_king_be_in_check(position, from, to, piece.color)? {
            squares.set(to);
        }
    }
    Ok(squares)
}

/// Generates every legal move of `color`.
///
/// A pawn move onto the last rank appears once per promotion kind.
pub fn legal_moves(position: &Position, color: Color) -> Result<MoveList, BoardError> {
    let mut moves = MoveList::new();
    for (from, piece) in position.pieces(color) {
        for to in legal_squares(position, from)? {
            if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                for kind in PieceKind::PROMOTIONS {
                    moves.push(Move::with_promotion(from, to, kind));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    Ok(moves)
}

/// Returns the squares of the pieces giving check to the king of `color`.
///
/// Fails with [`BoardError::PieceNotFound`] when that king is missing.
pub fn checkers(position: &Position, color: Color) -> Result<Bitboard, BoardError> {
    let king = position.square_of_piece(color, PieceKind::King)?;
    Ok(attackers(position, king, color))
}

/// Returns true if the king of `color` is attacked.
pub fn is_king_in_check(position: &Position, color: Color) -> Result<bool, BoardError> {
    Ok(checkers(position, color)?.is_not_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupant;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        assert_eq!(legal_moves(&pos, Color::White).unwrap().len(), 20);
        assert_eq!(legal_moves(&pos, Color::Black).unwrap().len(), 20);
        assert!(!is_king_in_check(&pos, Color::White).unwrap());
        assert!(!is_king_in_check(&pos, Color::Black).unwrap());
    }

    #[test]
    fn move_legality_by_piece_rule() {
        let pos = Position::startpos();
        assert!(is_move_legal(&pos, sq("e2"), sq("e4")).unwrap());
        assert!(!is_move_legal(&pos, sq("e2"), sq("e5")).unwrap());
        assert!(is_move_legal(&pos, Square::G1, sq("f3")).unwrap());
        assert!(!is_move_legal(&pos, Square::F1, sq("c4")).unwrap());
        assert_eq!(
            is_move_legal(&pos, sq("e4"), sq("e5")),
            Err(BoardError::NotFound(sq("e4")))
        );
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        let mut pos = Position::empty();
        pos.place(Square::E1, Occupant::new(PieceKind::King, Color::White));
        pos.place(sq("e2"), Occupant::new(PieceKind::Knight, Color::White));
        pos.place(Square::E8, Occupant::new(PieceKind::Rook, Color::Black));
        pos.place(Square::A8, Occupant::new(PieceKind::King, Color::Black));

        assert!(is_move_legal(&pos, sq("e2"), sq("c3")).unwrap());
        assert!(would_own_king_be_in_check(&pos, sq("e2"), sq("c3"), Color::White).unwrap());
        assert!(legal_squares(&pos, sq("e2")).unwrap().is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut pos = Position::empty();
        pos.place(Square::E1, Occupant::new(PieceKind::King, Color::White));
        pos.place(sq("d8"), Occupant::new(PieceKind::Rook, Color::Black));
        pos.place(Square::H8, Occupant::new(PieceKind::King, Color::Black));

        let squares = legal_squares(&pos, Square::E1).unwrap();
        assert!(!squares.contains(Square::D1));
        assert!(!squares.contains(sq("d2")));
        assert_eq!(squares.count(), 3);
    }

    #[test]
    fn what_if_leaves_live_position_alone() {
        let pos = Position::startpos();
        let before = pos.clone();
        assert!(!would_own_king_be_in_check(&pos, sq("e2"), sq("e4"), Color::White).unwrap());
        assert_eq!(pos, before);
    }

    #[test]
    fn promotions_are_expanded() {
        let mut pos = Position::empty();
        pos.place(sq("a7"), Occupant::new(PieceKind::Pawn, Color::White));
        pos.place(Square::E1, Occupant::new(PieceKind::King, Color::White));
        pos.place(Square::H8, Occupant::new(PieceKind::King, Color::Black));
        let moves = legal_moves(&pos, Color::White).unwrap();
        let promotions = moves
            .as_slice()
            .iter()
            .filter(|m| m.promotion().is_some())
            .count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn missing_king_is_reported() {
        let pos = Position::empty();
        assert_eq!(
            checkers(&pos, Color::White),
            Err(BoardError::PieceNotFound {
                color: Color::White,
                kind: PieceKind::King
            })
        );
    }
}
