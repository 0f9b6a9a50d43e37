//! Errors raised by board lookups and coordinate conversions.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when querying or mutating a board.
///
/// All of these describe a caller precondition that was not met. None of
/// them are raised after a board has been partially modified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The queried square holds no piece.
    #[error("no piece found at {0}")]
    NotFound(Square),

    /// No piece of the requested color and kind is on the board.
    #[error("piece {color} {kind} not found")]
    PieceNotFound { color: Color, kind: PieceKind },

    /// A row/column pair outside the 8x8 grid.
    #[error("coordinates out of range: row {row}, column {col}")]
    OutOfRange { row: i32, col: i32 },

    /// A pawn may only promote to a queen, rook, bishop, or knight.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    /// A move whose origin and destination are the same square.
    #[error("piece on {0} cannot move onto its own square")]
    NullMove(Square),
}
