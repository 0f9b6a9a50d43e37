//! Core types for the enprise chess rules engine.
//!
//! This crate provides the fundamental types shared by the engine and its
//! drivers:
//! - [`PieceKind`] and [`Color`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for a from/to pair with an optional promotion
//! - [`BoardError`] for coordinate and lookup failures

mod color;
mod error;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::BoardError;
pub use mov::Move;
pub use piece::PieceKind;
pub use square::{File, Rank, Square};
