//! Turn-by-turn game management.
//!
//! [`Game`] drives the engine the way a player would: it checks that the
//! piece belongs to the side to move, that the destination follows the
//! piece's rule, and that the mover's king stays safe, then executes the move
//! and evaluates the opponent's check and checkmate status.

use crate::movegen::{is_move_legal, legal_squares, would_own_king_be_in_check};
use crate::rules::{checkmate_status, GameResult, MateStatus};
use crate::{Bitboard, Occupant, Position};
use enprise_core::{BoardError, Color, Move, Square};
use thiserror::Error;
use tracing::{debug, info};

/// A recorded move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    /// The move as played.
    pub mov: Move,
    /// The piece that moved, as it stood before moving.
    pub mover: Occupant,
    /// The piece taken by the move, if any.
    pub captured: Option<Occupant>,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A board lookup failed, e.g. the origin square is empty.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The piece on the origin square belongs to the other player.
    #[error("piece on {square} isn't of the correct colour ({expected})")]
    WrongColor { square: Square, expected: Color },
    /// The destination does not follow the piece's movement rule.
    #[error("not a legal move: {0}")]
    IllegalMove(Move),
    /// The move would leave the mover's own king in check.
    #[error("not a legal move: {0} leaves your king in check")]
    LeavesKingInCheck(Move),
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
}

/// A chess game between two players at one board.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current position.
    position: Position,
    /// The side to move.
    turn: Color,
    /// Move history.
    moves: Vec<GameMove>,
    /// Check status of the side to move.
    status: MateStatus,
    /// Game result if the game has ended.
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            position: Position::startpos(),
            turn: Color::White,
            moves: Vec::new(),
            status: MateStatus::NotInCheck,
            result: None,
        }
    }

    /// Creates a game from a custom position with `turn` to move.
    ///
    /// The position is evaluated immediately, so a position that is already
    /// checkmate yields a finished game. Fails when `turn` has no king.
    pub fn from_position(position: Position, turn: Color) -> Result<Self, GameError> {
        let status = checkmate_status(&position, turn)?;
        let result = status
            .is_checkmate()
            .then(|| GameResult::win_for(turn.opposite()));
        Ok(Game {
            position,
            turn,
            moves: Vec::new(),
            status,
            result,
        })
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the check status of the side to move.
    pub fn status(&self) -> MateStatus {
        self.status
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.status.is_check()
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the legal destinations of the piece on `from`.
    pub fn legal_squares(&self, from: Square) -> Result<Bitboard, GameError> {
        Ok(legal_squares(&self.position, from)?)
    }

    /// Plays `m` for the side to move.
    ///
    /// On success the turn passes to the opponent, whose check status is
    /// returned. A checkmate ends the game.
    pub fn make_move(&mut self, m: Move) -> Result<MateStatus, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let (from, to) = (m.from(), m.to());
        let mover = self.position.occupant_at(from)?;
        if mover.color != self.turn {
            return Err(GameError::WrongColor {
                square: from,
                expected: self.turn,
            });
        }
        if !is_move_legal(&self.position, from, to)? {
            return Err(GameError::IllegalMove(m));
        }
        if would_own_king_be_in_check(&self.position, from, to, self.turn)? {
            return Err(GameError::LeavesKingInCheck(m));
        }

        let captured = self.position.make_move(m)?;
        debug!(%m, piece = %mover, ?captured, "move played");
        self.moves.push(GameMove {
            mov: m,
            mover,
            captured,
        });

        self.turn = self.turn.opposite();
        self.status = checkmate_status(&self.position, self.turn)?;
        if self.status.is_checkmate() {
            let result = GameResult::win_for(self.turn.opposite());
            info!(%result, reason = %self.status, "checkmate");
            self.result = Some(result);
        } else if self.status.is_check() {
            debug!(king = %self.turn, defence = %self.status, "check");
        }

        Ok(self.status)
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<GameResult, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let result = GameResult::win_for(self.turn.opposite());
        info!(loser = %self.turn, %result, "resignation");
        self.result = Some(result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enprise_core::PieceKind;

    fn mv(s: &str) -> Move {
        Move::from_coordinate(s).unwrap()
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.turn(), Color::White);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        game.make_move(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        game.make_move(mv("e7e5")).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.ply_count(), 2);
        assert_eq!(game.move_history()[0].mover.kind, PieceKind::Pawn);
    }

    #[test]
    fn rejects_empty_origin() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e4e5")),
            Err(GameError::Board(BoardError::NotFound(sq("e4"))))
        );
    }

    #[test]
    fn rejects_wrong_color() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e7e5")),
            Err(GameError::WrongColor {
                square: sq("e7"),
                expected: Color::White
            })
        );
    }

    #[test]
    fn rejects_illegal_destination() {
        let mut game = Game::new();
        assert_eq!(game.make_move(mv("e2e5")), Err(GameError::IllegalMove(mv("e2e5"))));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn rejects_self_check() {
        let mut game = Game::new();
        for m in ["e2e4", "e7e5", "d1h5", "f7f6"] {
            game.make_move(mv(m)).unwrap();
        }
        game.make_move(mv("h5e5")).unwrap();
        assert!(game.is_check());
        // Black is in check from the e5 queen; a knight move elsewhere is illegal.
        assert_eq!(
            game.make_move(mv("b8c6")),
            Err(GameError::LeavesKingInCheck(mv("b8c6")))
        );
        game.make_move(mv("g8e7")).unwrap();
        assert!(!game.is_check());
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        for m in ["f2f3", "e7e5", "g2g4"] {
            game.make_move(mv(m)).unwrap();
        }
        let status = game.make_move(mv("d8h4")).unwrap();
        assert!(status.is_checkmate());
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(game.make_move(mv("a2a3")), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn from_position_detects_mate() {
        let mut position = Position::empty();
        position.place(Square::H1, Occupant::new(PieceKind::King, Color::White));
        position.place(sq("g2"), Occupant::new(PieceKind::Queen, Color::Black));
        position.place(sq("f3"), Occupant::new(PieceKind::King, Color::Black));
        let game = Game::from_position(position, Color::White).unwrap();
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(game.status(), MateStatus::ContactCheck);
    }

    #[test]
    fn from_position_without_king() {
        assert_eq!(
            Game::from_position(Position::empty(), Color::White).unwrap_err(),
            GameError::Board(BoardError::PieceNotFound {
                color: Color::White,
                kind: PieceKind::King
            })
        );
    }

    #[test]
    fn resign() {
        let mut game = Game::new();
        assert_eq!(game.resign(), Ok(GameResult::BlackWins));
        assert!(game.is_game_over());
        assert_eq!(game.resign(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn legal_squares_for_driver() {
        let game = Game::new();
        assert_eq!(game.legal_squares(Square::G1).unwrap().count(), 2);
        assert!(game.legal_squares(sq("e4")).is_err());
    }
}
