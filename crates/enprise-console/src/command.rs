//! Parsing of the lines typed at the prompt.

use enprise_core::{PieceKind, Square};
use thiserror::Error;

/// A request from the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the piece on `from` to `to`, promoting to `promotion` if given.
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    /// List the legal destinations of the piece on the square.
    Moves(Square),
    /// Give up the game.
    Resign,
    /// Leave the program.
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("please enter a move such as e2e4")]
    Empty,
    #[error("not a square on the board: {0}")]
    BadSquare(String),
    #[error("cannot promote to {0:?} (expected one of q, r, b, n)")]
    BadPromotion(char),
    #[error("didn't understand {0:?}; try e2e4, e2 e4, e7e8q, moves e2, resign or quit")]
    Unrecognised(String),
}

/// Parses one input line.
///
/// Accepts `e2e4`, `e2 e4`, `e7e8q`, `e7 e8 q`, `moves e2`, `resign` and
/// `quit`, case-insensitively.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim().to_ascii_lowercase();
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => Err(CommandError::Empty),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        ["resign"] => Ok(Command::Resign),
        ["moves", square] => Ok(Command::Moves(square_arg(square)?)),
        [joined] if joined.len() == 4 || joined.len() == 5 => {
            if !joined.is_ascii() {
                return Err(CommandError::Unrecognised(line.clone()));
            }
            let (from, rest) = joined.split_at(2);
            let (to, promotion) = rest.split_at(2);
            move_command(from, to, promotion)
        }
        [from, to] => move_command(from, to, ""),
        [from, to, promotion] => move_command(from, to, promotion),
        _ => Err(CommandError::Unrecognised(line.clone())),
    }
}

fn square_arg(s: &str) -> Result<Square, CommandError> {
    Square::from_algebraic(s).ok_or_else(|| CommandError::BadSquare(s.to_string()))
}

fn move_command(from: &str, to: &str, promotion: &str) -> Result<Command, CommandError> {
    let from = square_arg(from)?;
    let to = square_arg(to)?;
    let mut letters = promotion.chars();
    let promotion = match (letters.next(), letters.next()) {
        (None, _) => None,
        (Some(c), None) => Some(
            PieceKind::from_letter(c)
                .filter(|kind| kind.is_promotion_target())
                .ok_or(CommandError::BadPromotion(c))?,
        ),
        (Some(_), Some(_)) => return Err(CommandError::Unrecognised(promotion.to_string())),
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}
