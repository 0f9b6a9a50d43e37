//! Chess rules engine built around a square-indexed board.
//!
//! This crate provides:
//! - [`Position`] - the 8x8 board, each occupied square holding an [`Occupant`]
//!   with its kind, colour and move count
//! - [`Bitboard`] - a set of squares, used for destinations and attackers
//! - Move generation: per-piece pseudo-legal destinations, the attack query
//!   ([`is_en_prise`]) and the legality filter
//! - [`checkmate_status`] - the ordered checkmate decision
//! - [`Game`] - turn handling with history and result tracking
//!
//! # Example
//!
//! ```
//! use enprise_core::{Color, Move, Square};
//! use enprise_engine::{is_en_prise, legal_moves, Game, Position};
//!
//! let position = Position::startpos();
//! let moves = legal_moves(&position, Color::White).unwrap();
//! assert_eq!(moves.len(), 20);
//! assert!(!is_en_prise(&position, Square::E1, Color::White));
//!
//! let mut game = Game::new();
//! game.make_move(Move::from_coordinate("e2e4").unwrap()).unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! ```

mod bitboard;
mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use bitboard::Bitboard;
pub use game::{Game, GameError, GameMove};
pub use movegen::{
    attackers, checkers, is_en_prise, is_king_in_check, is_move_legal, legal_moves,
    legal_squares, pseudo_legal_squares, would_own_king_be_in_check, MoveList,
};
pub use position::{Occupant, Position};
pub use rules::{checkmate_status, GameResult, MateStatus};
