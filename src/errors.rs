// This file is part of the arbiter library.
// Copyright (C) 2017-2018 Niklas Fiekas <niklas.fiekas@backscattering.de>
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

use std::{error::Error, fmt};

use crate::color::Color;

/// Reason a move was rejected.
///
/// Validation reports the first failing check, in the order the variants
/// are listed here. None of these are fatal: the game is unchanged and
/// waits for another move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IllegalMove {
    /// A coordinate is off the board.
    InvalidSquare,
    /// The origin square does not hold a piece of the side to move.
    NotYourPiece,
    /// The destination square holds a piece of the side to move.
    OwnPieceCaptured,
    /// The piece cannot move like that.
    IncompatibleMovement,
    /// A piece stands between origin and destination.
    PathBlocked,
    /// The move would leave the own king attacked.
    KingInCheck,
    /// The promotion choice is not a knight, bishop, rook or queen, or the
    /// move does not promote.
    InvalidPromotion,
    /// The game has already ended.
    GameOver,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IllegalMove::InvalidSquare => "you've entered an invalid square",
            IllegalMove::NotYourPiece => "you must choose a piece of your color",
            IllegalMove::OwnPieceCaptured => "you can't capture your own piece",
            IllegalMove::IncompatibleMovement => "this movement is incompatible with your piece",
            IllegalMove::PathBlocked => "your piece can't jump over other pieces",
            IllegalMove::KingInCheck => {
                "you can't do this move, because your king would be in check"
            }
            IllegalMove::InvalidPromotion => "a pawn can only promote to a knight, bishop, rook or queen",
            IllegalMove::GameOver => "the game is over",
        })
    }
}

impl Error for IllegalMove {}

/// Reasons for a board not being a playable position.
///
/// Seeing one of these during play means the game state is corrupted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PositionError {
    NoKing { color: Color },
    TooManyKings { color: Color },
    /// More than 16 pieces of one color.
    TooManyPieces { color: Color },
    /// The side not to move is in check, so its king could be captured.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NoKing { color } => write!(f, "no {color} king on the board"),
            PositionError::TooManyKings { color } => write!(f, "more than one {color} king"),
            PositionError::TooManyPieces { color } => write!(f, "more than 16 {color} pieces"),
            PositionError::OppositeCheck => f.write_str("the side not to move is in check"),
        }
    }
}

impl Error for PositionError {}

/// Error when playing a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlayError {
    /// The move was rejected. The game goes on.
    Illegal(IllegalMove),
    /// The position violates a board invariant. The session should be
    /// aborted.
    Corrupted(PositionError),
}

impl PlayError {
    /// The rejection reason, if the move was merely illegal.
    pub fn illegal(self) -> Option<IllegalMove> {
        match self {
            PlayError::Illegal(reason) => Some(reason),
            PlayError::Corrupted(_) => None,
        }
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Illegal(reason) => reason.fmt(f),
            PlayError::Corrupted(err) => write!(f, "corrupted game state: {err}"),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayError::Illegal(reason) => Some(reason),
            PlayError::Corrupted(err) => Some(err),
        }
    }
}

impl From<IllegalMove> for PlayError {
    fn from(reason: IllegalMove) -> PlayError {
        PlayError::Illegal(reason)
    }
}

impl From<PositionError> for PlayError {
    fn from(err: PositionError) -> PlayError {
        PlayError::Corrupted(err)
    }
}
