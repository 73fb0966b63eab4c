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

//! Parse commands typed by a player.
//!
//! A move is two squares, each a file letter followed by a rank number,
//! optionally separated by a single character that is not a letter or
//! digit: `e2e4`, `e2 e4`, `c7-c5`, `g1$f3`. A pawn reaching the last rank
//! may name its promotion, directly or after `=` or a separator: `e7e8q`,
//! `e7 e8=N`. `:r` resigns and `:d` offers a draw.
//!
//! The parser only checks the shape of the input. Squares off the board,
//! like `i9`, are passed on as [`Coords`] for the game to reject.
//!
//! # Examples
//!
//! ```
//! use arbiter::{Command, Coords};
//!
//! let command: Command = "e2-e4".parse()?;
//! assert_eq!(command, Command::Play {
//!     coords: Coords { from_rank: 6, from_file: 4, to_rank: 4, to_file: 4 },
//!     promotion: None,
//! });
//!
//! assert_eq!(":r".parse::<Command>()?, Command::Resign);
//! # Ok::<_, arbiter::ParseCommandError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Coords, role::Role};

/// Error when parsing an invalid command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseCommandError;

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid command")
    }
}

impl Error for ParseCommandError {}

/// Something a player asks for on their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    Play {
        coords: Coords,
        promotion: Option<Role>,
    },
    Resign,
    OfferDraw,
}

impl Command {
    /// Parses a command from ASCII, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCommandError`] if the input is not shaped like a
    /// command.
    pub fn from_ascii(s: &[u8]) -> Result<Command, ParseCommandError> {
        match s.trim_ascii() {
            b":r" | b":R" => Ok(Command::Resign),
            b":d" | b":D" => Ok(Command::OfferDraw),
            s => parse_move(s),
        }
    }
}

fn parse_move(s: &[u8]) -> Result<Command, ParseCommandError> {
    let (from_rank, from_file, s) = parse_square(s)?;
    let s = skip_separator(s);
    let (to_rank, to_file, s) = parse_square(s)?;

    let promotion = match s {
        [] => None,
        [b'=' | b' ' | b'-' | b'/', ch] | [ch] => {
            Some(Role::from_char(char::from(*ch)).ok_or(ParseCommandError)?)
        }
        _ => return Err(ParseCommandError),
    };

    Ok(Command::Play {
        coords: Coords {
            from_rank,
            from_file,
            to_rank,
            to_file,
        },
        promotion,
    })
}

/// Parses a file letter and a rank number into rank and file indexes,
/// returning the rest of the input.
fn parse_square(s: &[u8]) -> Result<(i32, i32, &[u8]), ParseCommandError> {
    let (&letter, rest) = s.split_first().ok_or(ParseCommandError)?;
    if !letter.is_ascii_alphabetic() {
        return Err(ParseCommandError);
    }
    let file = i32::from(letter.to_ascii_lowercase() - b'a');

    let digits = rest.iter().take_while(|ch| ch.is_ascii_digit()).count();
    let (number, rest) = rest.split_at(digits);
    let number: i32 = btoi::btou(number).map_err(|_| ParseCommandError)?;

    Ok((8 - number, file, rest))
}

fn skip_separator(s: &[u8]) -> &[u8] {
    match s.split_first() {
        Some((ch, rest)) if !ch.is_ascii_alphanumeric() => rest,
        _ => s,
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Command, ParseCommandError> {
        Command::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(from_rank: i32, from_file: i32, to_rank: i32, to_file: i32) -> Command {
        Command::Play {
            coords: Coords {
                from_rank,
                from_file,
                to_rank,
                to_file,
            },
            promotion: None,
        }
    }

    #[test]
    fn test_separators() {
        let e2e4 = play(6, 4, 4, 4);
        for s in ["e2e4", "e2 e4", "e2-e4", "e2$e4", "  E2 E4\n"] {
            assert_eq!(s.parse(), Ok(e2e4), "{s:?}");
        }
        assert_eq!("e2--e4".parse::<Command>(), Err(ParseCommandError));
    }

    #[test]
    fn test_out_of_range_squares_pass() {
        assert_eq!("i9 a0".parse(), Ok(play(-1, 8, 8, 0)));
        assert_eq!("a12b1".parse(), Ok(play(-4, 0, 7, 1)));
    }

    #[test]
    fn test_promotion() {
        let Ok(Command::Play { promotion, .. }) = "e7e8q".parse::<Command>() else {
            panic!("expected move");
        };
        assert_eq!(promotion, Some(Role::Queen));

        let Ok(Command::Play { promotion, .. }) = "e7 e8=N".parse::<Command>() else {
            panic!("expected move");
        };
        assert_eq!(promotion, Some(Role::Knight));

        assert_eq!("e7e8x".parse::<Command>(), Err(ParseCommandError));
        assert_eq!("e7e8qq".parse::<Command>(), Err(ParseCommandError));
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(":r".parse(), Ok(Command::Resign));
        assert_eq!(" :D ".parse(), Ok(Command::OfferDraw));
        assert_eq!(":x".parse::<Command>(), Err(ParseCommandError));
        assert_eq!("".parse::<Command>(), Err(ParseCommandError));
        assert_eq!("e2".parse::<Command>(), Err(ParseCommandError));
    }
}
