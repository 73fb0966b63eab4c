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

use std::{error::Error, fmt, hash, iter::FusedIterator, str::FromStr};

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square of the 8×8 board.
///
/// Rank index 0 is Black's back rank (the eighth rank), rank index 7 is
/// White's back rank (the first rank). File index 0 is the a-file.
///
/// # Examples
///
/// ```
/// use arbiter::Square;
///
/// let sq = Square::new(6, 4);
/// assert_eq!(sq, Square::E2);
/// assert_eq!(sq.to_string(), "e2");
/// assert_eq!("e2".parse(), Ok(sq));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square from in-range indexes.
    ///
    /// # Panics
    ///
    /// Panics if `rank` or `file` is not in `0..8`.
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Square {
        assert!(rank < 8 && file < 8);
        Square { rank, file }
    }

    /// Creates a square from possibly out-of-range coordinates.
    #[inline]
    pub fn from_coords(rank: i32, file: i32) -> Option<Square> {
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Parses an algebraic square name like `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square::new(b'8' - rank, file - b'a'))
            }
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Index in rank-major order, `0` for a8 up to `63` for h1.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    #[inline]
    pub fn offset(self, ranks: i32, files: i32) -> Option<Square> {
        Square::from_coords(i32::from(self.rank) + ranks, i32::from(self.file) + files)
    }

    /// Steps one unit toward `target` on each axis that differs.
    #[must_use]
    pub fn toward(self, target: Square) -> Square {
        fn step(from: u8, to: u8) -> u8 {
            match from.cmp(&to) {
                std::cmp::Ordering::Less => from + 1,
                std::cmp::Ordering::Greater => from - 1,
                std::cmp::Ordering::Equal => from,
            }
        }

        Square {
            rank: step(self.rank, target.rank),
            file: step(self.file, target.file),
        }
    }

    /// Squares strictly between `self` and `target`, walked one unit at a
    /// time toward `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::Square;
    ///
    /// let between: Vec<Square> = Square::A1.between(Square::D4).collect();
    /// assert_eq!(between, [Square::B2, Square::C3]);
    /// ```
    pub fn between(self, target: Square) -> Between {
        Between {
            current: self,
            target,
        }
    }

    /// All 64 squares in rank-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square::new(rank, file)))
    }

    pub const A1: Square = Square::new(7, 0);
    pub const B1: Square = Square::new(7, 1);
    pub const C1: Square = Square::new(7, 2);
    pub const D1: Square = Square::new(7, 3);
    pub const E1: Square = Square::new(7, 4);
    pub const F1: Square = Square::new(7, 5);
    pub const G1: Square = Square::new(7, 6);
    pub const H1: Square = Square::new(7, 7);
    pub const A2: Square = Square::new(6, 0);
    pub const B2: Square = Square::new(6, 1);
    pub const C2: Square = Square::new(6, 2);
    pub const D2: Square = Square::new(6, 3);
    pub const E2: Square = Square::new(6, 4);
    pub const F2: Square = Square::new(6, 5);
    pub const G2: Square = Square::new(6, 6);
    pub const H2: Square = Square::new(6, 7);
    pub const A3: Square = Square::new(5, 0);
    pub const B3: Square = Square::new(5, 1);
    pub const C3: Square = Square::new(5, 2);
    pub const D3: Square = Square::new(5, 3);
    pub const E3: Square = Square::new(5, 4);
    pub const F3: Square = Square::new(5, 5);
    pub const G3: Square = Square::new(5, 6);
    pub const H3: Square = Square::new(5, 7);
    pub const A4: Square = Square::new(4, 0);
    pub const B4: Square = Square::new(4, 1);
    pub const C4: Square = Square::new(4, 2);
    pub const D4: Square = Square::new(4, 3);
    pub const E4: Square = Square::new(4, 4);
    pub const F4: Square = Square::new(4, 5);
    pub const G4: Square = Square::new(4, 6);
    pub const H4: Square = Square::new(4, 7);
    pub const A5: Square = Square::new(3, 0);
    pub const B5: Square = Square::new(3, 1);
    pub const C5: Square = Square::new(3, 2);
    pub const D5: Square = Square::new(3, 3);
    pub const E5: Square = Square::new(3, 4);
    pub const F5: Square = Square::new(3, 5);
    pub const G5: Square = Square::new(3, 6);
    pub const H5: Square = Square::new(3, 7);
    pub const A6: Square = Square::new(2, 0);
    pub const B6: Square = Square::new(2, 1);
    pub const C6: Square = Square::new(2, 2);
    pub const D6: Square = Square::new(2, 3);
    pub const E6: Square = Square::new(2, 4);
    pub const F6: Square = Square::new(2, 5);
    pub const G6: Square = Square::new(2, 6);
    pub const H6: Square = Square::new(2, 7);
    pub const A7: Square = Square::new(1, 0);
    pub const B7: Square = Square::new(1, 1);
    pub const C7: Square = Square::new(1, 2);
    pub const D7: Square = Square::new(1, 3);
    pub const E7: Square = Square::new(1, 4);
    pub const F7: Square = Square::new(1, 5);
    pub const G7: Square = Square::new(1, 6);
    pub const H7: Square = Square::new(1, 7);
    pub const A8: Square = Square::new(0, 0);
    pub const B8: Square = Square::new(0, 1);
    pub const C8: Square = Square::new(0, 2);
    pub const D8: Square = Square::new(0, 3);
    pub const E8: Square = Square::new(0, 4);
    pub const F8: Square = Square::new(0, 5);
    pub const G8: Square = Square::new(0, 6);
    pub const H8: Square = Square::new(0, 7);
}

impl hash::Hash for Square {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u8(self.index() as u8);
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'8' - self.rank)
        )
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square::new(u.int_in_range(0..=7)?, u.int_in_range(0..=7)?))
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (2, Some(2))
    }
}

/// Iterator over the squares strictly between two squares.
#[derive(Debug, Clone)]
pub struct Between {
    current: Square,
    target: Square,
}

impl Iterator for Between {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.current == self.target {
            return None;
        }
        self.current = self.current.toward(self.target);
        if self.current == self.target {
            None
        } else {
            Some(self.current)
        }
    }
}

impl FusedIterator for Between {}
