//! Move generation.
//!
//! Pseudo-legal destinations are produced per piece kind: rays for sliding
//! pieces, fixed offsets for knights and kings, and the pawn's push, capture
//! and en passant rules. Castling is part of the king's destinations but is
//! left out of [`piece_reach`], which is what the attack query uses, so that
//! asking "is this square attacked" never asks about castling in turn.

mod attacks;
mod legal;

use crate::{Bitboard, Occupant, Position};
use enprise_core::{BoardError, Color, File, Move, PieceKind, Square};

pub use attacks::{attackers, is_en_prise};
pub use legal::{
    checkers, is_king_in_check, is_move_legal, legal_moves, legal_squares,
    would_own_king_be_in_check,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    const PLACEHOLDER: Move = Move::new(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::PLACEHOLDER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Returns the pseudo-legal destinations of the piece standing on `origin`.
///
/// Fails with [`BoardError::NotFound`] when `origin` is empty.
pub fn pseudo_legal_squares(position: &Position, origin: Square) -> Result<Bitboard, BoardError> {
    let occupant = position.occupant_at(origin)?;
    Ok(piece_squares(position, origin, occupant))
}

/// Returns the pseudo-legal destinations of `piece` if it stood on `origin`.
///
/// "Pseudo-legal" follows the piece's movement rule and the board's
/// occupancy, but ignores whether the move would expose its own king.
pub fn piece_squares(position: &Position, origin: Square, piece: Occupant) -> Bitboard {
    match piece.kind {
        PieceKind::King => piece_reach(position, origin, piece) | castling_squares(position, origin, piece),
        _ => piece_reach(position, origin, piece),
    }
}

/// Returns every square `piece` on `origin` could move to, castling aside.
pub fn piece_reach(position: &Position, origin: Square, piece: Occupant) -> Bitboard {
    match piece.kind {
        PieceKind::Pawn => pawn_squares(position, origin, piece),
        PieceKind::Knight => step_squares(position, origin, piece.color, &KNIGHT_JUMPS),
        PieceKind::Bishop => ray_squares(position, origin, piece.color, &DIAGONALS),
        PieceKind::Rook => ray_squares(position, origin, piece.color, &ORTHOGONALS),
        PieceKind::Queen => {
            ray_squares(position, origin, piece.color, &ORTHOGONALS)
                | ray_squares(position, origin, piece.color, &DIAGONALS)
        }
        PieceKind::King => step_squares(position, origin, piece.color, &KING_STEPS),
    }
}

/// Walks each ray outward until the edge, stopping before an own piece and
/// on (including) an enemy piece.
fn ray_squares(position: &Position, origin: Square, color: Color, rays: &[(i8, i8)]) -> Bitboard {
    let mut squares = Bitboard::EMPTY;
    for &(df, dr) in rays {
        let mut current = origin;
        while let Some(next) = current.offset(df, dr) {
            match position.get(next) {
                None => squares.set(next),
                Some(other) => {
                    if other.color != color {
                        squares.set(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    squares
}

/// Each offset is admissible when it stays on the board and does not land on
/// an own piece.
fn step_squares(position: &Position, origin: Square, color: Color, steps: &[(i8, i8)]) -> Bitboard {
    steps
        .iter()
        .filter_map(|&(df, dr)| origin.offset(df, dr))
        .filter(|&sq| !matches!(position.get(sq), Some(other) if other.color == color))
        .collect()
}

fn pawn_squares(position: &Position, origin: Square, pawn: Occupant) -> Bitboard {
    let forward = pawn.color.pawn_direction();
    let mut squares = Bitboard::EMPTY;

    if let Some(single) = origin.offset(0, forward) {
        if position.is_empty(single) {
            squares.set(single);
            if origin.rank() == pawn.color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if position.is_empty(double) {
                        squares.set(double);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = origin.offset(side, forward) else {
            continue;
        };
        match position.get(target) {
            Some(victim) if victim.color != pawn.color => squares.set(target),
            Some(_) => {}
            None if can_take_en_passant(position, origin, pawn, side) => squares.set(target),
            None => {}
        }
    }

    squares
}

/// A pawn on its en passant rank may take an enemy pawn standing beside it
/// that has moved exactly once, i.e. that has just made its two-square
/// advance.
fn can_take_en_passant(position: &Position, origin: Square, pawn: Occupant, side: i8) -> bool {
    if origin.rank() != pawn.color.en_passant_rank() {
        return false;
    }
    let Some(beside) = origin.offset(side, 0) else {
        return false;
    };
    matches!(
        position.get(beside),
        Some(victim) if victim.kind == PieceKind::Pawn
            && victim.color != pawn.color
            && victim.times_moved == 1
    )
}

/// Castling destinations for an unmoved king.
///
/// A side is available when its corner holds an unmoved rook of the king's
/// color, everything between king and rook is empty, and none of the king's
/// square, the square it crosses, or its destination is en prise.
fn castling_squares(position: &Position, origin: Square, king: Occupant) -> Bitboard {
    let mut squares = Bitboard::EMPTY;
    if king.has_moved() {
        return squares;
    }

    for (corner_file, direction) in [(File::H, 1), (File::A, -1)] {
        let corner = Square::new(corner_file, origin.rank());
        let rook_ready = matches!(
            position.get(corner),
            Some(rook) if rook.kind == PieceKind::Rook
                && rook.color == king.color
                && !rook.has_moved()
        );
        if !rook_ready || !position.are_squares_empty_between(origin, corner) {
            continue;
        }

        let (Some(crossed), Some(destination)) =
            (origin.offset(direction, 0), origin.offset(2 * direction, 0))
        else {
            continue;
        };
        if !origin.between(corner).contains(&destination) {
            continue;
        }

        let safe = [origin, crossed, destination]
            .into_iter()
            .all(|sq| !is_en_prise(position, sq, king.color));
        if safe {
            squares.set(destination);
        }
    }

    squares
}
