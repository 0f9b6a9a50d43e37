//! Two players share one terminal: the board is printed after every move and
//! the side to move types its move in coordinate form.

mod command;
mod config;
mod render;
mod session;

use clap::Parser;
use config::ConsoleConfig;
use enprise_engine::Game;
use session::Session;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "enprise")]
#[command(about = "Play chess against a friend at the terminal")]
struct Cli {
    /// Configuration file (defaults to enprise.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostic log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Hide the `*` marker on pieces that have moved
    #[arg(long)]
    no_moved_marker: bool,

    /// Hide rank numbers and file letters
    #[arg(long)]
    no_coordinates: bool,

    /// Piece a pawn promotes to when the move names none (q, r, b or n)
    #[arg(long)]
    promotion: Option<char>,
}

impl Cli {
    fn apply(&self, config: &mut ConsoleConfig) {
        if self.no_moved_marker {
            config.show_moved_marker = false;
        }
        if self.no_coordinates {
            config.show_coordinates = false;
        }
        if let Some(letter) = self.promotion {
            config.default_promotion = letter;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load_from(path)?,
        None => ConsoleConfig::load()?,
    };
    cli.apply(&mut config);
    let promotion = config.promotion_kind()?;
    tracing::info!(?config, "starting game");

    let mut session = Session::new(Game::new(), config, promotion);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    if let Some(result) = session.game().result() {
        tracing::info!(%result, plies = session.game().ply_count(), "game finished");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["enprise", "--no-coordinates", "--promotion", "n"]);
        let mut config = ConsoleConfig::default();
        cli.apply(&mut config);
        assert!(!config.show_coordinates);
        assert!(config.show_moved_marker);
        assert_eq!(config.default_promotion, 'n');
        assert_eq!(cli.log_level, Level::WARN);
    }
}
