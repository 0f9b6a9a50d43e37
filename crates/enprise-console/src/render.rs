//! Text rendering of a position.

use crate::config::ConsoleConfig;
use enprise_core::{File, Rank, Square};
use enprise_engine::{Occupant, Position};

/// Renders `position` as text, rank 8 at the top, one `|`-separated cell
/// per square.
pub fn render_board(position: &Position, config: &ConsoleConfig) -> String {
    let mut out = String::new();
    for rank in Rank::ALL.into_iter().rev() {
        if config.show_coordinates {
            out.push_str(&format!("{} ", rank));
        }
        for file in File::ALL {
            let label = position
                .get(Square::new(file, rank))
                .map(|o| label(o, config))
                .unwrap_or_default();
            out.push_str(&format!("|{:<3}", label));
        }
        out.push_str("|\n");
    }
    if config.show_coordinates {
        let mut footer = String::from("  ");
        for file in File::ALL {
            footer.push_str(&format!(" {:<3}", file.to_char()));
        }
        out.push_str(footer.trim_end());
        out.push('\n');
    }
    out
}

fn label(occupant: Occupant, config: &ConsoleConfig) -> String {
    if config.show_moved_marker {
        occupant.describe()
    } else {
        format!("{}{}", occupant.color.letter(), occupant.kind.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enprise_core::Move;

    #[test]
    fn startpos_rows() {
        let text = render_board(&Position::startpos(), &ConsoleConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 |BR |BN |BB |BQ |BK |BB |BN |BR |");
        assert_eq!(lines[4], "4 |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[7], "1 |WR |WN |WB |WQ |WK |WB |WN |WR |");
        assert_eq!(lines[8], "   a   b   c   d   e   f   g   h");
    }

    #[test]
    fn moved_marker() {
        let mut position = Position::startpos();
        position
            .make_move(Move::from_coordinate("e2e4").unwrap())
            .unwrap();
        let text = render_board(&position, &ConsoleConfig::default());
        assert!(text.lines().nth(4).unwrap().contains("|WP*|"));

        let plain = ConsoleConfig {
            show_moved_marker: false,
            show_coordinates: false,
            ..ConsoleConfig::default()
        };
        let text = render_board(&position, &plain);
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().nth(4).unwrap(), "|   |   |   |   |WP |   |   |   |");
    }
}
