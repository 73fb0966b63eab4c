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

//! Move validation.
//!
//! [`validate()`] decides whether a move is legal for the side to move and
//! classifies it. Checks run in a fixed order and the first failing one is
//! reported:
//!
//! 1. the origin holds a piece of the side to move,
//! 2. the destination does not hold a piece of the side to move,
//! 3. the piece can move like that ([`IllegalMove::IncompatibleMovement`]),
//! 4. nothing stands in the way, knights excepted,
//! 5. the own king is not left in check.
//!
//! Off-board coordinates never get this far: they cannot be represented
//! as a [`Move`] at all.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::{
    board::Board,
    check,
    color::Color,
    errors::{IllegalMove, PlayError, PositionError},
    history::History,
    m::{Displacement, LegalMove, Move, MoveFlags, MoveList},
    role::Role,
    square::Square,
    types::Piece,
};

/// File of the king at the start of the game.
const KING_FILE: u8 = 4;

/// How a move relocates pieces, once its geometry is known to fit the piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Shape {
    Ordinary,
    DoublePush,
    Castle { rook: Move },
    EnPassant { captured: Square },
}

impl Shape {
    fn displacement(self) -> Option<Displacement> {
        match self {
            Shape::Ordinary | Shape::DoublePush => None,
            Shape::Castle { rook } => Some(Displacement::Relocate(rook)),
            Shape::EnPassant { captured } => Some(Displacement::Remove(captured)),
        }
    }

    fn flags(self) -> MoveFlags {
        match self {
            Shape::Ordinary => MoveFlags::empty(),
            Shape::DoublePush => MoveFlags::DOUBLE_PUSH,
            Shape::Castle { .. } => MoveFlags::CASTLE,
            Shape::EnPassant { .. } => MoveFlags::EN_PASSANT,
        }
    }
}

/// Validates a move by `turn` in the given position.
///
/// The board is borrowed mutably to test for self-check, but it is always
/// left exactly as it was.
///
/// # Errors
///
/// Returns [`PlayError::Illegal`] with the first failing rule, or
/// [`PlayError::Corrupted`] if a king is missing from the board.
pub fn validate(
    board: &mut Board,
    history: &History,
    m: Move,
    turn: Color,
) -> Result<LegalMove, PlayError> {
    let piece = match board.piece_at(m.from()) {
        Some(piece) if piece.color == turn => piece,
        _ => return Err(IllegalMove::NotYourPiece.into()),
    };

    if board.color_at(m.to()) == Some(turn) {
        return Err(IllegalMove::OwnPieceCaptured.into());
    }

    let shape = shape(board, history, m, piece)?.ok_or(IllegalMove::IncompatibleMovement)?;

    if piece.role != Role::Knight && is_path_blocked(board, m) {
        return Err(IllegalMove::PathBlocked.into());
    }

    let aux = shape.displacement();
    if check::would_leave_king_in_check(board, m, aux, turn)? {
        return Err(IllegalMove::KingInCheck.into());
    }

    let mut flags = shape.flags();
    flags.set(MoveFlags::CAPTURE, board.color_at(m.to()) == Some(!turn));
    flags.set(
        MoveFlags::PROMOTION,
        piece.role == Role::Pawn && m.to().rank() == (!turn).backrank(),
    );

    Ok(LegalMove {
        m,
        piece,
        aux,
        flags,
    })
}

/// Checks if the piece can move like that, and how.
fn shape(
    board: &mut Board,
    history: &History,
    m: Move,
    piece: Piece,
) -> Result<Option<Shape>, PositionError> {
    let (dr, df) = m.delta();

    Ok(match piece.role {
        Role::Bishop => is_diagonal(dr, df).then_some(Shape::Ordinary),
        Role::Rook => is_straight(dr, df).then_some(Shape::Ordinary),
        Role::Queen => (is_diagonal(dr, df) || is_straight(dr, df)).then_some(Shape::Ordinary),
        Role::Knight => is_knight_jump(dr, df).then_some(Shape::Ordinary),
        Role::King => {
            if is_king_step(dr, df) {
                Some(Shape::Ordinary)
            } else {
                castle(board, history, m, piece.color)?
            }
        }
        Role::Pawn => pawn(board, history, m, piece.color),
    })
}

fn is_diagonal(dr: i32, df: i32) -> bool {
    dr != 0 && dr.abs() == df.abs()
}

fn is_straight(dr: i32, df: i32) -> bool {
    (dr == 0) != (df == 0)
}

fn is_knight_jump(dr: i32, df: i32) -> bool {
    matches!((dr.abs(), df.abs()), (2, 1) | (1, 2))
}

fn is_king_step(dr: i32, df: i32) -> bool {
    dr.abs() <= 1 && df.abs() <= 1 && (dr, df) != (0, 0)
}

fn pawn(board: &Board, history: &History, m: Move, color: Color) -> Option<Shape> {
    let (dr, df) = m.delta();
    let forward = color.forward();

    if dr == forward && df == 0 {
        (!board.is_occupied(m.to())).then_some(Shape::Ordinary)
    } else if dr == forward && df.abs() == 1 {
        if board.is_occupied(m.to()) {
            Some(Shape::Ordinary)
        } else {
            en_passant(board, history, m, color)
        }
    } else if dr == 2 * forward && df == 0 && m.from().rank() == color.pawn_rank() {
        (!board.is_occupied(m.to())).then_some(Shape::DoublePush)
    } else {
        None
    }
}

/// An enemy pawn that just advanced two squares can be captured as if it
/// had advanced only one.
fn en_passant(board: &Board, history: &History, m: Move, color: Color) -> Option<Shape> {
    let (last, mover) = history.last_move()?;
    if mover == color || board.piece_at(last.to()) != Some(mover.pawn()) {
        return None;
    }

    let (dr, df) = last.delta();
    let double_push = dr == 2 * mover.forward() && df == 0 && last.from().rank() == mover.pawn_rank();

    (double_push
        && last.to().rank() == m.from().rank()
        && last.to().file().abs_diff(m.from().file()) == 1
        && m.to() == last.from().toward(last.to()))
    .then_some(Shape::EnPassant {
        captured: last.to(),
    })
}

/// The king moves two squares toward a rook that, like the king, has never
/// moved. The king may not be in check, and may neither pass through nor
/// land on an attacked square.
fn castle(
    board: &mut Board,
    history: &History,
    m: Move,
    color: Color,
) -> Result<Option<Shape>, PositionError> {
    let rank = color.backrank();
    let king = Square::new(rank, KING_FILE);

    if m.from() != king || m.to().rank() != rank {
        return Ok(None);
    }

    let (rook_file, rook_to_file) = match m.to().file() {
        2 => (0, 3),
        6 => (7, 5),
        _ => return Ok(None),
    };
    let rook = Square::new(rank, rook_file);

    if board.piece_at(rook) != Some(color.rook())
        || history.has_moved_from(king)
        || history.has_moved_from(rook)
        || king.between(rook).any(|sq| board.is_occupied(sq))
    {
        return Ok(None);
    }

    if check::is_king_in_check(board, color)? {
        return Ok(None);
    }

    for sq in king.between(m.to()).chain([m.to()]) {
        if check::would_leave_king_in_check(board, Move::new(king, sq), None, color)? {
            trace!(%m, %sq, "castling through attacked square");
            return Ok(None);
        }
    }

    Ok(Some(Shape::Castle {
        rook: Move::new(rook, Square::new(rank, rook_to_file)),
    }))
}

/// Checks if any square strictly between origin and destination is
/// occupied.
pub fn is_path_blocked(board: &Board, m: Move) -> bool {
    m.from().between(m.to()).any(|sq| board.is_occupied(sq))
}

/// Checks if the piece on the origin square attacks the destination square.
///
/// This is movement geometry and blocking only. Castling and en passant
/// never attack, and pawns attack only diagonally forward.
pub fn attacks(board: &Board, m: Move) -> bool {
    let Some(piece) = board.piece_at(m.from()) else {
        return false;
    };
    let (dr, df) = m.delta();

    let fits = match piece.role {
        Role::Pawn => dr == piece.color.forward() && df.abs() == 1,
        Role::Knight => return is_knight_jump(dr, df),
        Role::Bishop => is_diagonal(dr, df),
        Role::Rook => is_straight(dr, df),
        Role::Queen => is_diagonal(dr, df) || is_straight(dr, df),
        Role::King => is_king_step(dr, df),
    };

    fits && !is_path_blocked(board, m)
}

/// All legal moves of `turn`, one per origin and destination. Promotions
/// are listed once; the promotion role is chosen when playing.
///
/// # Errors
///
/// Returns [`PositionError`] if a king is missing from the board, or
/// [`PositionError::TooManyPieces`] if the material of `turn` has more legal
/// moves than a [`MoveList`] holds.
pub fn legal_moves(
    board: &mut Board,
    history: &History,
    turn: Color,
) -> Result<MoveList, PositionError> {
    let mut moves = MoveList::new();
    let mut full = false;
    for_each_legal_move(board, history, turn, |legal| {
        full = moves.try_push(legal).is_err();
        !full
    })?;
    if full {
        return Err(PositionError::TooManyPieces { color: turn });
    }
    Ok(moves)
}

/// Checks if `turn` has any legal move at all.
///
/// # Errors
///
/// Returns [`PositionError`] if a king is missing from the board.
pub fn has_legal_move(
    board: &mut Board,
    history: &History,
    turn: Color,
) -> Result<bool, PositionError> {
    let mut found = false;
    for_each_legal_move(board, history, turn, |_| {
        found = true;
        false
    })?;
    Ok(found)
}

/// Tries every destination for every piece of `turn`, until `f` returns
/// `false`.
fn for_each_legal_move<F>(
    board: &mut Board,
    history: &History,
    turn: Color,
    mut f: F,
) -> Result<(), PositionError>
where
    F: FnMut(LegalMove) -> bool,
{
    let origins: ArrayVec<Square, 64> = board.squares_of(turn).collect();

    for from in origins {
        for to in Square::all() {
            match validate(board, history, Move::new(from, to), turn) {
                Ok(legal) => {
                    if !f(legal) {
                        return Ok(());
                    }
                }
                Err(PlayError::Illegal(_)) => (),
                Err(PlayError::Corrupted(err)) => return Err(err),
            }
        }
    }

    Ok(())
}
