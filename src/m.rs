// This file is part of the arbiter library.
// Copyright (C) 2017-2022 Niklas Fiekas <niklas.fiekas@backscattering.de>
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

use std::fmt;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{errors::IllegalMove, role::Role, square::Square, types::Piece};

/// A single piece relocation.
///
/// A `Move` does not encode special-move semantics. Whether it castles,
/// captures en passant or promotes is derived from the board at validation
/// time, see [`LegalMove`].
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) as origin and destination
/// joined by a dash, e.g. `e2-e4`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /// Builds a move from raw coordinates, rejecting anything off the board.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::InvalidSquare`] if any coordinate is not in
    /// `0..8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::{IllegalMove, Move, Square};
    ///
    /// assert_eq!(Move::from_coords(6, 4, 4, 4), Ok(Move::new(Square::E2, Square::E4)));
    /// assert_eq!(Move::from_coords(6, 4, 8, 4), Err(IllegalMove::InvalidSquare));
    /// ```
    pub fn from_coords(
        from_rank: i32,
        from_file: i32,
        to_rank: i32,
        to_file: i32,
    ) -> Result<Move, IllegalMove> {
        match (
            Square::from_coords(from_rank, from_file),
            Square::from_coords(to_rank, to_file),
        ) {
            (Some(from), Some(to)) => Ok(Move { from, to }),
            _ => Err(IllegalMove::InvalidSquare),
        }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Signed rank and file deltas from origin to destination.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        (
            i32::from(self.to.rank()) - i32::from(self.from.rank()),
            i32::from(self.to.file()) - i32::from(self.from.file()),
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Unchecked move coordinates as they come from the input layer.
///
/// Any value is representable. Conversion into a [`Move`] is the first
/// validation step.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Coords {
    pub from_rank: i32,
    pub from_file: i32,
    pub to_rank: i32,
    pub to_file: i32,
}

impl TryFrom<Coords> for Move {
    type Error = IllegalMove;

    fn try_from(coords: Coords) -> Result<Move, IllegalMove> {
        Move::from_coords(
            coords.from_rank,
            coords.from_file,
            coords.to_rank,
            coords.to_file,
        )
    }
}

impl From<Move> for Coords {
    fn from(m: Move) -> Coords {
        Coords {
            from_rank: i32::from(m.from.rank()),
            from_file: i32::from(m.from.file()),
            to_rank: i32::from(m.to.rank()),
            to_file: i32::from(m.to.file()),
        }
    }
}

/// Side effect of a move on a second square.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Displacement {
    /// The rook of a castling move.
    Relocate(Move),
    /// The pawn captured en passant.
    Remove(Square),
}

bitflags! {
    /// Properties of a validated move.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MoveFlags: u8 {
        const CAPTURE = 1;
        const DOUBLE_PUSH = 1 << 1;
        const CASTLE = 1 << 2;
        const EN_PASSANT = 1 << 3;
        const PROMOTION = 1 << 4;
    }
}

/// A move that passed validation in a specific position, with everything
/// needed to apply it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LegalMove {
    pub m: Move,
    pub piece: Piece,
    pub aux: Option<Displacement>,
    pub flags: MoveFlags,
}

impl LegalMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.intersects(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    /// Checks if the move resets the half-move counter.
    #[inline]
    pub fn is_zeroing(&self) -> bool {
        self.piece.role == Role::Pawn || self.is_capture()
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space to hold the legal
/// moves of any chess position.
pub type MoveList = ArrayVec<LegalMove, 256>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_from_coords() {
        assert_eq!(
            Move::from_coords(7, 6, 5, 5),
            Ok(Move::new(Square::G1, Square::F3))
        );
        assert_eq!(Move::from_coords(-1, 0, 0, 0), Err(IllegalMove::InvalidSquare));
        assert_eq!(Move::from_coords(0, 0, 0, 8), Err(IllegalMove::InvalidSquare));
    }

    #[test]
    fn test_coords() {
        let m = Move::new(Square::E7, Square::E5);
        assert_eq!(Move::try_from(Coords::from(m)), Ok(m));
        assert_eq!(m.delta(), (2, 0));
        assert_eq!(m.to_string(), "e7-e5");
    }

    #[test]
    fn test_zeroing() {
        let quiet = LegalMove {
            m: Move::new(Square::G1, Square::F3),
            piece: Color::White.knight(),
            aux: None,
            flags: MoveFlags::empty(),
        };
        assert!(!quiet.is_zeroing());
        assert!(LegalMove { flags: MoveFlags::CAPTURE, ..quiet }.is_zeroing());
        assert!(LegalMove { piece: Color::White.pawn(), ..quiet }.is_zeroing());
    }
}
