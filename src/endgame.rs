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

//! Detection of the end of the game.

use std::fmt;

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    check,
    color::{ByColor, Color},
    errors::{PlayError, PositionError},
    history::History,
    m::Move,
    movement,
    role::Role,
    square::Square,
};

/// Half-moves without a pawn move or capture that end the game in a draw.
pub const FIFTY_MOVES: u32 = 100;

/// How a game ended.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoves,
    ThreefoldRepetition,
    InsufficientMaterial,
    Resignation { winner: Color },
    DrawAgreed,
}

impl Outcome {
    /// The winning side, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::Resignation { winner } => Some(winner),
            _ => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        self.winner().is_none()
    }

    /// Stable lowercase name of the way the game ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::{Color, Outcome};
    ///
    /// assert_eq!(Outcome::Checkmate { winner: Color::White }.tag(), "checkmate");
    /// assert_eq!(Outcome::FiftyMoves.tag(), "fifty-move");
    /// ```
    pub const fn tag(self) -> &'static str {
        match self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::FiftyMoves => "fifty-move",
            Outcome::ThreefoldRepetition => "threefold-repetition",
            Outcome::InsufficientMaterial => "insufficient-material",
            Outcome::Resignation { .. } => "resignation",
            Outcome::DrawAgreed => "draw-accepted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Outcome::Stalemate => f.write_str("stalemate, the game is a draw"),
            Outcome::FiftyMoves => f.write_str("draw by the fifty-move rule"),
            Outcome::ThreefoldRepetition => f.write_str("draw by threefold repetition"),
            Outcome::InsufficientMaterial => f.write_str("draw by insufficient material"),
            Outcome::Resignation { winner } => write!(f, "{} resigned, {winner} wins", !winner),
            Outcome::DrawAgreed => f.write_str("draw by agreement"),
        }
    }
}

/// State of the side to move after a move completes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Verdict {
    pub in_check: bool,
    pub outcome: Option<Outcome>,
}

/// Decides whether the game is over for `turn`, the side to move.
///
/// Conditions are tried in order: checkmate (when in check) or stalemate
/// (when not), then the fifty-move rule, threefold repetition and
/// insufficient material.
///
/// # Errors
///
/// Returns [`PositionError`] if a king is missing from the board.
pub fn evaluate(board: &mut Board, history: &History, turn: Color) -> Result<Verdict, PositionError> {
    let attack = check::checker(board, turn)?;

    let outcome = match attack {
        Some(attack) if is_checkmate(board, history, turn, attack)? => {
            Some(Outcome::Checkmate { winner: !turn })
        }
        None if is_stalemate(board, history, turn)? => Some(Outcome::Stalemate),
        _ if is_fifty_moves(history) => Some(Outcome::FiftyMoves),
        _ if history.is_threefold_repetition() => Some(Outcome::ThreefoldRepetition),
        _ if is_insufficient_material(board) => Some(Outcome::InsufficientMaterial),
        _ => None,
    };

    Ok(Verdict {
        in_check: attack.is_some(),
        outcome,
    })
}

/// Checks if the king of `turn`, attacked by `attack`, cannot escape.
///
/// Escapes are tried in order: stepping the king aside, interposing a piece
/// on the line of a sliding attacker, and capturing the attacker. With two
/// attackers, interposing or capturing leaves the king attacked by the
/// other, so only king steps remain.
///
/// # Errors
///
/// Returns [`PositionError`] if a king is missing from the board.
pub fn is_checkmate(
    board: &mut Board,
    history: &History,
    turn: Color,
    attack: Move,
) -> Result<bool, PositionError> {
    Ok(!can_king_move(board, turn, attack.to())?
        && !can_cover(board, history, turn, attack)?
        && !can_capture(board, history, turn, attack.from())?)
}

fn can_king_move(board: &mut Board, turn: Color, king: Square) -> Result<bool, PositionError> {
    for dr in -1..=1 {
        for df in -1..=1 {
            let Some(to) = king.offset(dr, df) else {
                continue;
            };
            if to == king || board.color_at(to) == Some(turn) {
                continue;
            }
            if !check::would_leave_king_in_check(board, Move::new(king, to), None, turn)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn can_cover(
    board: &mut Board,
    history: &History,
    turn: Color,
    attack: Move,
) -> Result<bool, PositionError> {
    if !board.role_at(attack.from()).is_some_and(Role::is_slider) {
        return Ok(false);
    }
    for sq in attack.from().between(attack.to()) {
        if can_reach(board, history, turn, sq)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn can_capture(
    board: &mut Board,
    history: &History,
    turn: Color,
    attacker: Square,
) -> Result<bool, PositionError> {
    if can_reach(board, history, turn, attacker)? {
        return Ok(true);
    }

    // A checking pawn that just advanced two squares may be taken en
    // passant.
    match history.last_move() {
        Some((last, _)) if last.to() == attacker && board.role_at(attacker) == Some(Role::Pawn) => {
            let passed = last.from().toward(attacker);
            Ok(passed != attacker && can_reach(board, history, turn, passed)?)
        }
        _ => Ok(false),
    }
}

/// Checks if any piece of `turn` can legally move to `target`.
fn can_reach(
    board: &mut Board,
    history: &History,
    turn: Color,
    target: Square,
) -> Result<bool, PositionError> {
    let origins: ArrayVec<Square, 64> = board.squares_of(turn).collect();
    for from in origins {
        match movement::validate(board, history, Move::new(from, target), turn) {
            Ok(_) => return Ok(true),
            Err(PlayError::Illegal(_)) => (),
            Err(PlayError::Corrupted(err)) => return Err(err),
        }
    }
    Ok(false)
}

/// Checks if `turn` has no legal move.
///
/// # Errors
///
/// Returns [`PositionError`] if a king is missing from the board.
pub fn is_stalemate(board: &mut Board, history: &History, turn: Color) -> Result<bool, PositionError> {
    movement::has_legal_move(board, history, turn).map(|any| !any)
}

pub fn is_fifty_moves(history: &History) -> bool {
    history.halfmoves() >= FIFTY_MOVES
}

/// Checks if neither side can possibly mate: no queens, rooks or pawns,
/// and at most one bishop or knight per side.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = ByColor::<u8>::default();

    for (_, piece) in board.pieces() {
        match piece.role {
            Role::Queen | Role::Rook | Role::Pawn => return false,
            role if role.is_minor() => *minors.get_mut(piece.color) += 1,
            _ => (),
        }
    }

    minors.find(|&count| count >= 2).is_none()
}
