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

//! Check detection.

use std::ops::Deref;

use arrayvec::ArrayVec;
use tracing::trace;

use crate::{
    board::Board,
    color::Color,
    errors::PositionError,
    m::{Displacement, Move},
    movement,
    square::Square,
    types::Piece,
};

/// Finds the king of `color`.
///
/// # Errors
///
/// Returns [`PositionError::NoKing`] if there is none.
pub fn king_square(board: &Board, color: Color) -> Result<Square, PositionError> {
    board
        .find(color.king())
        .ok_or(PositionError::NoKing { color })
}

/// Finds an enemy piece attacking the king of `color`, as a move from the
/// attacker to the king.
///
/// # Errors
///
/// Returns [`PositionError::NoKing`] if `color` has no king.
pub fn checker(board: &Board, color: Color) -> Result<Option<Move>, PositionError> {
    let king = king_square(board, color)?;
    let attack = board
        .squares_of(!color)
        .map(|from| Move::new(from, king))
        .find(|&m| movement::attacks(board, m));

    if let Some(m) = attack {
        trace!(%color, %m, "king attacked");
    }

    Ok(attack)
}

/// Checks if the king of `color` is attacked.
///
/// # Errors
///
/// Returns [`PositionError::NoKing`] if `color` has no king.
pub fn is_king_in_check(board: &Board, color: Color) -> Result<bool, PositionError> {
    checker(board, color).map(|attack| attack.is_some())
}

/// A move tentatively applied to a board.
///
/// The squares a move touches are saved when the guard is created, and
/// written back when it is dropped, on every exit path. While the guard
/// lives, the board can only be read through it.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Move, Speculation, Square};
///
/// let mut board = Board::new();
/// {
///     let speculation = Speculation::new(&mut board, Move::new(Square::E2, Square::E4), None);
///     assert!(speculation.piece_at(Square::E2).is_none());
/// }
/// assert_eq!(board, Board::new());
/// ```
#[derive(Debug)]
pub struct Speculation<'a> {
    board: &'a mut Board,
    saved: ArrayVec<(Square, Option<Piece>), 4>,
}

impl<'a> Speculation<'a> {
    pub fn new(board: &'a mut Board, m: Move, aux: Option<Displacement>) -> Speculation<'a> {
        let mut saved: ArrayVec<(Square, Option<Piece>), 4> = ArrayVec::new();
        let mut save = |sq: Square| saved.push((sq, board.piece_at(sq)));

        save(m.from());
        save(m.to());
        match aux {
            Some(Displacement::Relocate(r)) => {
                save(r.from());
                save(r.to());
            }
            Some(Displacement::Remove(sq)) => save(sq),
            None => (),
        }

        board.relocate(m);
        match aux {
            Some(Displacement::Relocate(r)) => {
                board.relocate(r);
            }
            Some(Displacement::Remove(sq)) => {
                board.remove_piece_at(sq);
            }
            None => (),
        }

        Speculation { board, saved }
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        while let Some((sq, contents)) = self.saved.pop() {
            self.board.restore(sq, contents);
        }
    }
}

/// Checks if playing `m` (with its side effect `aux`) would leave the king
/// of `color` attacked. The board is unchanged afterwards.
///
/// # Errors
///
/// Returns [`PositionError::NoKing`] if `color` has no king.
pub fn would_leave_king_in_check(
    board: &mut Board,
    m: Move,
    aux: Option<Displacement>,
    color: Color,
) -> Result<bool, PositionError> {
    let speculation = Speculation::new(board, m, aux);
    is_king_in_check(&speculation, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lone_kings() -> Board {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board
    }

    #[test]
    fn test_checker() {
        let mut board = lone_kings();
        assert_eq!(checker(&board, Color::White), Ok(None));

        board.set_piece_at(Square::B4, Color::Black.bishop());
        assert_eq!(
            checker(&board, Color::White),
            Ok(Some(Move::new(Square::B4, Square::E1)))
        );

        board.set_piece_at(Square::D2, Color::White.pawn());
        assert_eq!(is_king_in_check(&board, Color::White), Ok(false));
    }

    #[test]
    fn test_pawn_checks_diagonally() {
        let mut board = lone_kings();
        board.set_piece_at(Square::E2, Color::Black.pawn());
        assert_eq!(is_king_in_check(&board, Color::White), Ok(false));
        board.set_piece_at(Square::F2, Color::Black.pawn());
        assert_eq!(is_king_in_check(&board, Color::White), Ok(true));
    }

    #[test]
    fn test_no_king() {
        assert_eq!(
            is_king_in_check(&Board::empty(), Color::Black),
            Err(PositionError::NoKing {
                color: Color::Black
            })
        );
    }

    #[test]
    fn test_speculation_restores() {
        let mut board = lone_kings();
        board.set_piece_at(Square::E2, Color::White.rook());
        board.set_piece_at(Square::E5, Color::Black.rook());
        let before = board.clone();

        // Pinned rook stepping aside exposes the king.
        assert_eq!(
            would_leave_king_in_check(&mut board, Move::new(Square::E2, Square::A2), None, Color::White),
            Ok(true)
        );
        assert_eq!(board, before);

        // Capturing the pinning rook is safe.
        assert_eq!(
            would_leave_king_in_check(&mut board, Move::new(Square::E2, Square::E5), None, Color::White),
            Ok(false)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_speculation_restores_on_error() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::A1, Color::White.rook());
        board.set_piece_at(Square::A5, Color::Black.knight());
        let before = board.clone();

        assert_eq!(
            would_leave_king_in_check(&mut board, Move::new(Square::A1, Square::A5), None, Color::White),
            Err(PositionError::NoKing {
                color: Color::White
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_speculation_with_displacement() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::H1, Color::White.rook());
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::D5, Color::Black.pawn());
        board.set_piece_at(Square::E5, Color::White.pawn());
        let before = board.clone();

        {
            let castled = Speculation::new(
                &mut board,
                Move::new(Square::E1, Square::G1),
                Some(Displacement::Relocate(Move::new(Square::H1, Square::F1))),
            );
            assert_eq!(castled.piece_at(Square::G1), Some(Color::White.king()));
            assert_eq!(castled.piece_at(Square::F1), Some(Color::White.rook()));
            assert_eq!(castled.piece_at(Square::H1), None);
        }
        assert_eq!(board, before);

        {
            let captured = Speculation::new(
                &mut board,
                Move::new(Square::E5, Square::D6),
                Some(Displacement::Remove(Square::D5)),
            );
            assert_eq!(captured.piece_at(Square::D5), None);
            assert_eq!(captured.piece_at(Square::D6), Some(Color::White.pawn()));
        }
        assert_eq!(board, before);
    }
}
