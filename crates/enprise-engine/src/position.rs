//! Board position: an 8x8 grid of optional occupants.

use enprise_core::{BoardError, Color, File, Move, PieceKind, Rank, Square};
use std::fmt;

/// A piece standing on a square, with the number of times it has moved.
///
/// The move count serves every rule that cares about history: a king or rook
/// that has moved may no longer castle, and a pawn that has moved exactly
/// once (and stands where a two-square advance lands) may be taken en
/// passant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub kind: PieceKind,
    pub color: Color,
    pub times_moved: u32,
}

impl Occupant {
    /// Creates an occupant that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Occupant {
            kind,
            color,
            times_moved: 0,
        }
    }

    /// Returns true once the piece has been relocated at least once.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.times_moved > 0
    }

    /// Compact label for board rendering: color letter, kind letter, and a
    /// `*` once the piece has moved (e.g. `WK`, `BP*`).
    pub fn describe(self) -> String {
        let marker = if self.has_moved() { "*" } else { "" };
        format!("{}{}{}", self.color.letter(), self.kind.letter(), marker)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// The state of the board.
///
/// A position is an owned value. Anything that needs to ask "what if" clones
/// it and plays on the clone, so the live position is only ever changed
/// through `&mut self` by its owner.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Occupant>; 64],
}

/// Back rank layout from file A to file H.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// Creates an empty position.
    pub const fn empty() -> Self {
        Position {
            squares: [None; 64],
        }
    }

    /// Creates the standard 32-piece starting position.
    pub fn startpos() -> Self {
        let mut position = Position::empty();
        for color in Color::ALL {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                position.place(
                    Square::new(file, color.back_rank()),
                    Occupant::new(kind, color),
                );
                position.place(
                    Square::new(file, color.pawn_rank()),
                    Occupant::new(PieceKind::Pawn, color),
                );
            }
        }
        position
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    /// Returns the occupant of `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Occupant> {
        self.squares[sq.index() as usize]
    }

    /// Returns the occupant of `sq`.
    ///
    /// Fails with [`BoardError::NotFound`] when the square is empty; use
    /// [`Position::is_empty`] to merely test occupancy.
    pub fn occupant_at(&self, sq: Square) -> Result<Occupant, BoardError> {
        self.get(sq).ok_or(BoardError::NotFound(sq))
    }

    /// Puts `occupant` on `sq`, replacing whatever stood there.
    #[inline]
    pub fn place(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.index() as usize] = Some(occupant);
    }

    /// Empties `sq`, returning what stood there.
    #[inline]
    pub fn clear(&mut self, sq: Square) -> Option<Occupant> {
        self.squares[sq.index() as usize].take()
    }

    /// Iterates over every piece of `color`, from a1 to h8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| match slot {
                Some(occupant) if occupant.color == color => {
                    Some((Square::from_index_masked(index as u8), *occupant))
                }
                _ => None,
            })
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the squares strictly between `a` and `b`.
    ///
    /// See [`Square::between`]; empty unless the squares share a line and
    /// are neither equal nor adjacent.
    #[inline]
    pub fn squares_between(&self, a: Square, b: Square) -> Vec<Square> {
        a.between(b)
    }

    /// Returns true if there is at least one square between `a` and `b` and
    /// all of them are empty.
    ///
    /// Equal, adjacent and unaligned pairs have nothing in between and so
    /// always return false.
    pub fn are_squares_empty_between(&self, a: Square, b: Square) -> bool {
        let between = a.between(b);
        !between.is_empty() && between.iter().all(|&sq| self.is_empty(sq))
    }

    /// Finds a piece of the given color and kind.
    ///
    /// Scans the board from rank 8 down to rank 1, files A to H, and returns
    /// the first match.
    pub fn square_of_piece(&self, color: Color, kind: PieceKind) -> Result<Square, BoardError> {
        Rank::ALL
            .into_iter()
            .rev()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(file, rank)))
            .find(|&sq| matches!(self.get(sq), Some(o) if o.color == color && o.kind == kind))
            .ok_or(BoardError::PieceNotFound { color, kind })
    }

    /// Relocates the piece on `from` to `to`.
    ///
    /// Shorthand for [`Position::make_move`] without a promotion choice.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Occupant>, BoardError> {
        self.make_move(Move::new(from, to))
    }

    /// Executes `m` without checking that it is legal, returning the captured
    /// piece if there was one.
    ///
    /// The moving piece's move count is incremented. On top of the plain
    /// relocation:
    /// - a king moving two files also brings the corner rook on that side to
    ///   the square the king passed over;
    /// - a pawn moving diagonally onto an empty square removes the enemy pawn
    ///   it passed (en passant);
    /// - a pawn reaching its last rank becomes the move's promotion kind, or
    ///   a queen when none was chosen.
    ///
    /// Errors are raised before anything is changed.
    pub fn make_move(&mut self, m: Move) -> Result<Option<Occupant>, BoardError> {
        let (from, to) = (m.from(), m.to());
        let mut mover = self.occupant_at(from)?;
        if from == to {
            return Err(BoardError::NullMove(from));
        }
        if let Some(kind) = m.promotion() {
            if !kind.is_promotion_target() {
                return Err(BoardError::InvalidPromotion(kind));
            }
        }

        let (file_delta, _) = from.delta(to);
        let mut captured = self.clear(to);

        if mover.kind == PieceKind::Pawn && file_delta != 0 && captured.is_none() {
            let passed = Square::new(to.file(), from.rank());
            if matches!(self.get(passed), Some(p) if p.kind == PieceKind::Pawn && p.color != mover.color)
            {
                captured = self.clear(passed);
            }
        }

        if mover.kind == PieceKind::Pawn && to.rank() == mover.color.promotion_rank() {
            mover.kind = m.promotion().unwrap_or(PieceKind::Queen);
        }

        self.clear(from);
        mover.times_moved = mover.times_moved.saturating_add(1);
        self.place(to, mover);

        if mover.kind == PieceKind::King && file_delta.abs() == 2 {
            self.castle_rook(from, file_delta.signum(), mover.color);
        }

        Ok(captured)
    }

    /// Brings the corner rook next to a king that castled from `king_from`
    /// toward `direction` (+1 for the H side, -1 for the A side).
    fn castle_rook(&mut self, king_from: Square, direction: i8, color: Color) {
        let corner_file = if direction > 0 { File::H } else { File::A };
        let corner = Square::new(corner_file, king_from.rank());
        let Some(passed_over) = king_from.offset(direction, 0) else {
            return;
        };
        if let Some(mut rook) = self.get(corner) {
            if rook.kind == PieceKind::Rook && rook.color == color {
                self.clear(corner);
                rook.times_moved = rook.times_moved.saturating_add(1);
                self.place(passed_over, rook);
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position(")?;
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                match self.get(Square::new(file, rank)) {
                    Some(o) => write!(f, "{:<4}", o.describe())?,
                    None => write!(f, "{:<4}", ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, ")")
    }
}
