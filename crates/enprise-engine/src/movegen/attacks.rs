//! The attack query: which enemy pieces could land on a square.

use std::borrow::Cow;

use super::piece_reach;
use crate::{Bitboard, Occupant, Position};
use enprise_core::{Color, PieceKind, Square};

/// Returns the squares of every piece of the color opposite to `color` that
/// could move onto `target`.
///
/// `target` is judged as if it held a piece of `color`: an empty target is
/// filled with a stand-in on a copy of the position. A pawn push therefore
/// never counts as an attack, and a pawn's diagonal always does.
///
/// Attacks are computed from [`piece_reach`], which leaves out castling and
/// does not filter for legality; a pinned piece still attacks.
pub fn attackers(position: &Position, target: Square, color: Color) -> Bitboard {
    let board = if position.is_empty(target) {
        let mut filled = position.clone();
        filled.place(target, Occupant::new(PieceKind::Pawn, color));
        Cow::Owned(filled)
    } else {
        Cow::Borrowed(position)
    };

    board
        .pieces(color.opposite())
        .filter(|&(origin, piece)| piece_reach(&board, origin, piece).contains(target))
        .map(|(origin, _)| origin)
        .collect()
}

/// Returns true if a piece of the color opposite to `color` could move onto
/// `target`.
#[inline]
pub fn is_en_prise(position: &Position, target: Square, color: Color) -> bool {
    attackers(position, target, color).is_not_empty()
}
