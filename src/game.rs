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

use tracing::{debug, info, trace};

use crate::{
    board::Board,
    check,
    color::Color,
    endgame::{self, Outcome},
    errors::{IllegalMove, PlayError, PositionError},
    history::History,
    m::{Coords, Displacement, LegalMove, Move, MoveList},
    role::Role,
};

/// A game session.
///
/// Owns the board and the history of positions, and tracks whose turn it
/// is. Moves are validated before they are applied, and after every move
/// the position is checked for the end of the game. Once an [`Outcome`] is
/// reached the session is frozen.
///
/// # Examples
///
/// ```
/// use arbiter::{Color, Game, Move, Outcome, Square};
///
/// let mut game = Game::new();
/// for (from, to) in [
///     (Square::F2, Square::F3),
///     (Square::E7, Square::E5),
///     (Square::G2, Square::G4),
///     (Square::D8, Square::H4),
/// ] {
///     game.play(Move::new(from, to))?;
/// }
///
/// assert!(game.is_check());
/// assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
/// # Ok::<_, arbiter::PlayError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: History,
    turn: Color,
    in_check: bool,
    outcome: Option<Outcome>,
}

impl Game {
    /// A game from the standard initial position, white to move.
    pub fn new() -> Game {
        let board = Board::new();
        Game {
            history: History::new(&board, Color::White),
            board,
            turn: Color::White,
            in_check: false,
            outcome: None,
        }
    }

    /// A game from an arbitrary position, with no recorded moves.
    ///
    /// The position is evaluated right away, so it may already be over.
    ///
    /// # Errors
    ///
    /// Each side must have exactly one king and at most 16 pieces, and the
    /// side not to move must not be in check.
    pub fn from_board(board: Board, turn: Color) -> Result<Game, PositionError> {
        for color in Color::ALL {
            match board.pieces().filter(|&(_, piece)| piece == color.king()).count() {
                0 => return Err(PositionError::NoKing { color }),
                1 => (),
                _ => return Err(PositionError::TooManyKings { color }),
            }
            if board.squares_of(color).count() > 16 {
                return Err(PositionError::TooManyPieces { color });
            }
        }
        if check::is_king_in_check(&board, !turn)? {
            return Err(PositionError::OppositeCheck);
        }

        let mut game = Game {
            history: History::new(&board, turn),
            board,
            turn,
            in_check: false,
            outcome: None,
        };
        game.evaluate()?;
        Ok(game)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Checks if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.history.halfmoves()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Validates a move for the side to move without playing it.
    ///
    /// # Errors
    ///
    /// See [`Game::play()`].
    pub fn validate(&mut self, m: Move) -> Result<LegalMove, PlayError> {
        if self.outcome.is_some() {
            return Err(IllegalMove::GameOver.into());
        }
        crate::movement::validate(&mut self.board, &self.history, m, self.turn)
    }

    /// Plays a move. A pawn reaching the last rank becomes a queen.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Illegal`] if the move is rejected, in which case
    /// the game is unchanged. Returns [`PlayError::Corrupted`] if the board
    /// violates an invariant. The session should not be continued after
    /// that.
    pub fn play(&mut self, m: Move) -> Result<LegalMove, PlayError> {
        self.apply(m, None)
    }

    /// Plays a move, promoting a pawn that reaches the last rank to `role`.
    ///
    /// # Errors
    ///
    /// As [`Game::play()`]. In addition, the move is rejected with
    /// [`IllegalMove::InvalidPromotion`] if it does not promote or `role` is
    /// not a knight, bishop, rook or queen.
    pub fn play_promoting(&mut self, m: Move, role: Role) -> Result<LegalMove, PlayError> {
        self.apply(m, Some(role))
    }

    /// Plays a move given as raw coordinates, as they come from the input
    /// layer.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::InvalidSquare`] if a coordinate is off the
    /// board, otherwise as [`Game::play_promoting()`].
    pub fn play_coords(
        &mut self,
        coords: Coords,
        promotion: Option<Role>,
    ) -> Result<LegalMove, PlayError> {
        if self.outcome.is_some() {
            return Err(IllegalMove::GameOver.into());
        }
        let m = Move::try_from(coords)?;
        self.apply(m, promotion)
    }

    fn apply(&mut self, m: Move, promotion: Option<Role>) -> Result<LegalMove, PlayError> {
        let legal = self.validate(m).inspect_err(|err| {
            trace!(%m, turn = %self.turn, %err, "move rejected");
        })?;

        let promoted = match promotion {
            Some(role) if !role.is_promotion_target() || !legal.is_promotion() => {
                return Err(IllegalMove::InvalidPromotion.into());
            }
            Some(role) => Some(role),
            None => legal.is_promotion().then_some(Role::Queen),
        };

        self.board.relocate(m);
        match legal.aux {
            Some(Displacement::Relocate(rook)) => {
                self.board.relocate(rook);
            }
            Some(Displacement::Remove(sq)) => {
                self.board.remove_piece_at(sq);
            }
            None => (),
        }
        if let Some(role) = promoted {
            self.board.set_piece_at(m.to(), role.of(self.turn));
        }

        self.history
            .push(&self.board, m, self.turn, legal.is_zeroing());
        debug!(%m, mover = %self.turn, flags = ?legal.flags, "move played");

        self.turn = !self.turn;
        self.evaluate()?;
        Ok(legal)
    }

    fn evaluate(&mut self) -> Result<(), PositionError> {
        let verdict = endgame::evaluate(&mut self.board, &self.history, self.turn)?;
        self.in_check = verdict.in_check;
        self.outcome = verdict.outcome;
        if let Some(outcome) = self.outcome {
            info!(tag = outcome.tag(), %outcome, "game over");
        }
        Ok(())
    }

    /// All legal moves of the side to move. Empty once the game is over.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if a king is missing from the board, or if
    /// there are more legal moves than a [`MoveList`] holds.
    pub fn legal_moves(&mut self) -> Result<MoveList, PositionError> {
        if self.outcome.is_some() {
            return Ok(MoveList::new());
        }
        crate::movement::legal_moves(&mut self.board, &self.history, self.turn)
    }

    /// The side to move gives up.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::GameOver`] if the game has already ended.
    pub fn resign(&mut self) -> Result<Outcome, IllegalMove> {
        self.conclude(Outcome::Resignation { winner: !self.turn })
    }

    /// Both sides agree to a draw.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::GameOver`] if the game has already ended.
    pub fn accept_draw(&mut self) -> Result<Outcome, IllegalMove> {
        self.conclude(Outcome::DrawAgreed)
    }

    fn conclude(&mut self, outcome: Outcome) -> Result<Outcome, IllegalMove> {
        if self.outcome.is_some() {
            return Err(IllegalMove::GameOver);
        }
        info!(tag = outcome.tag(), %outcome, "game over");
        self.outcome = Some(outcome);
        Ok(outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
