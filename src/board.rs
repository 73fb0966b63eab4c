// This file is part of the arbiter library.
// Copyright (C) 2017-2021 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::fmt::{self, Write as _};

use crate::{color::Color, m::Move, role::Role, square::Square, types::Piece};

/// [`Piece`] positions on an 8×8 board.
///
/// Every square holds at most one piece. Access is bounds-checked by
/// construction: only a [`Square`] can address the board.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Color::Black.king()));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// The standard initial position.
    pub fn new() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in (0..).zip(BACKRANK) {
                board.set_piece_at(Square::new(color.backrank(), file), role.of(color));
                board.set_piece_at(Square::new(color.pawn_rank(), file), color.pawn());
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[usize::from(sq.rank())][usize::from(sq.file())]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Puts a piece on a square, returning the piece that was there.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[usize::from(sq.rank())][usize::from(sq.file())].replace(piece)
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[usize::from(sq.rank())][usize::from(sq.file())].take()
    }

    /// Overwrites a square with exactly the given contents.
    pub(crate) fn restore(&mut self, sq: Square, contents: Option<Piece>) {
        self.squares[usize::from(sq.rank())][usize::from(sq.file())] = contents;
    }

    /// Moves whatever stands on the origin square to the destination
    /// square, leaving the origin empty. Returns the piece that was on the
    /// destination.
    pub fn relocate(&mut self, m: Move) -> Option<Piece> {
        match self.remove_piece_at(m.from()) {
            Some(piece) => self.set_piece_at(m.to(), piece),
            None => self.remove_piece_at(m.to()),
        }
    }

    /// Occupied squares with their pieces, in rank-major order starting
    /// at a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Occupied squares of one color.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
    }

    /// Number of occupied squares.
    pub fn count(&self) -> usize {
        self.pieces().count()
    }

    /// The first square holding the given piece.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.pieces().find(|&(_, p)| p == piece).map(|(sq, _)| sq)
    }

    /// Renders the board with rank 8 at the top.
    pub fn diagram(&self) -> Diagram<'_> {
        Diagram {
            board: self,
            glyphs: false,
            flipped: false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8 {
            for file in 0..8 {
                f.write_char(
                    self.piece_at(Square::new(rank, file))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

/// Human readable rendering of a [`Board`], with rank numbers and file
/// letters.
#[derive(Debug, Clone)]
pub struct Diagram<'a> {
    board: &'a Board,
    glyphs: bool,
    flipped: bool,
}

impl Diagram<'_> {
    /// Use Unicode chess symbols instead of letters.
    #[must_use]
    pub fn glyphs(mut self, glyphs: bool) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Show the board from Black's side.
    #[must_use]
    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = |i: u8| if self.flipped { 7 - i } else { i };

        for rank in (0..8).map(order) {
            write!(f, "{} ", 8 - rank)?;
            for file in (0..8).map(order) {
                let ch = match self.board.piece_at(Square::new(rank, file)) {
                    Some(piece) if self.glyphs => piece.glyph(),
                    Some(piece) => piece.char(),
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            f.write_char('\n')?;
        }

        f.write_str("  ")?;
        for file in (0..8).map(order) {
            write!(f, " {}", char::from(b'a' + file))?;
        }
        f.write_char('\n')
    }
}
