// This file is part of the arbiter library.
// Copyright (C) 2017 Niklas Fiekas <niklas.fiekas@backscattering.de>
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

use crate::{errors::PlayError, game::Game};

/// Counts legal move paths of a given length.
///
/// Paths that end the game are not continued. Useful for comparing, testing
/// and debugging move validation.
///
/// # Errors
///
/// Returns [`PlayError::Corrupted`] if a king goes missing along the way.
///
/// # Examples
///
/// ```
/// use arbiter::{perft, Game};
///
/// let game = Game::new();
/// assert_eq!(perft(&game, 1)?, 20);
/// assert_eq!(perft(&game, 2)?, 400);
/// # Ok::<_, arbiter::PlayError>(())
/// ```
pub fn perft(game: &Game, depth: u32) -> Result<u64, PlayError> {
    if depth < 1 {
        return Ok(1);
    }

    let mut parent = game.clone();
    let moves = parent.legal_moves()?;

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for legal in moves {
        let mut child = game.clone();
        child.play(legal.m)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}
