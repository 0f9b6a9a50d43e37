//! The interactive turn loop.

use crate::command::{self, Command};
use crate::config::ConsoleConfig;
use crate::render::render_board;
use enprise_core::{Move, PieceKind, Square};
use enprise_engine::{Game, MateStatus};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// A game at the terminal: reads commands from `input` and writes the board
/// and replies to `output`.
pub struct Session {
    game: Game,
    config: ConsoleConfig,
    promotion: PieceKind,
}

impl Session {
    pub fn new(game: Game, config: ConsoleConfig, promotion: PieceKind) -> Self {
        Session {
            game,
            config,
            promotion,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends, the player quits, or input runs out.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            write!(output, "{}", render_board(self.game.position(), &self.config))?;
            if let Some(result) = self.game.result() {
                writeln!(output, "Game over: {}", result)?;
                return Ok(());
            }
            write!(output, "{} to move: ", self.game.turn())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                info!("input closed");
                return Ok(());
            }
            let command = match command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };
            debug!(?command, "command");

            match command {
                Command::Quit => return Ok(()),
                Command::Resign => {
                    let loser = self.game.turn();
                    self.game.resign()?;
                    writeln!(output, "{} resigns.", loser)?;
                }
                Command::Moves(square) => match self.game.legal_squares(square) {
                    Ok(squares) if squares.is_empty() => {
                        writeln!(output, "No legal moves from {}.", square)?;
                    }
                    Ok(squares) => {
                        let list: Vec<String> = squares.into_iter().map(|s| s.to_algebraic()).collect();
                        writeln!(output, "{}: {}", square, list.join(" "))?;
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                },
                Command::Move {
                    from,
                    to,
                    promotion,
                } => {
                    let m = self.complete_move(from, to, promotion);
                    match self.game.make_move(m) {
                        Ok(status) => self.report(status, output)?,
                        Err(e) => writeln!(output, "{}", e)?,
                    }
                }
            }
        }
    }

    /// Attaches the configured promotion to a pawn move onto the last rank
    /// that did not name one.
    fn complete_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Move {
        let promotes = self.game.position().get(from).is_some_and(|o| {
            o.kind == PieceKind::Pawn && to.rank() == o.color.promotion_rank()
        });
        match promotion {
            Some(kind) => Move::with_promotion(from, to, kind),
            None if promotes => Move::with_promotion(from, to, self.promotion),
            None => Move::new(from, to),
        }
    }

    fn report<W: Write>(&self, status: MateStatus, output: &mut W) -> anyhow::Result<()> {
        if status.is_checkmate() {
            writeln!(output, "Checkmate! {}", status)?;
        } else if status.is_check() {
            writeln!(output, "{} is in check.", self.game.turn())?;
        }
        Ok(())
    }
}
