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

//! Chess for two players sharing a terminal.

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use arbiter::{Color, Command, Coords, Game, Move, PlayError, Role};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Opt {
    /// Draw pieces as letters instead of Unicode chess symbols.
    #[arg(long)]
    ascii: bool,
    /// Do not clear the terminal between turns.
    #[arg(long)]
    no_clear: bool,
    /// Show the board from Black's side.
    #[arg(long)]
    flip: bool,
}

const HELP: &str = "\
How to move a piece:
    Type the square of the piece and the square to move it to, optionally
    with a character between them. Examples: e2 e4, c7-c5, g1$f3, e2e4.
    To choose a promotion, add the piece letter: e7e8q, e7 e8=N.

How to resign:
    Type: :r

How to offer a draw:
    Type: :d
";

/// Terminal session: reads commands and renders the game.
struct Terminal<R> {
    input: R,
    opt: Opt,
}

impl<R: BufRead> Terminal<R> {
    fn clear(&self) {
        if !self.opt.no_clear {
            print!("\x1b[2J\x1b[H");
        }
    }

    /// Reads a line, or `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;

        let mut line = String::new();
        Ok(match self.input.read_line(&mut line)? {
            0 => None,
            _ => Some(line.trim().to_owned()),
        })
    }

    fn pause(&mut self) -> io::Result<()> {
        self.prompt("\nPress Enter to continue.")?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            match self.prompt(&format!("{question} (y/n) "))?.as_deref() {
                Some("y" | "Y") => return Ok(true),
                Some("n" | "N") | None => return Ok(false),
                Some(_) => (),
            }
        }
    }

    fn render(&self, game: &Game) {
        let mut header = format!("{} to move", capitalized(game.turn()));
        if game.is_check() {
            header.push_str(", check!");
        }
        println!("{header}\n");
        println!(
            "{}",
            game.board()
                .diagram()
                .glyphs(!self.opt.ascii)
                .flipped(self.opt.flip)
        );
    }

    fn menu(&mut self) -> io::Result<ExitCode> {
        loop {
            self.clear();
            println!("\tArbiter chess\n1. Play\n2. Help\n0. Exit\n");
            match self.prompt("> ")?.as_deref() {
                Some("1") => {
                    if let Err(err) = self.play()? {
                        error!(%err, "aborting game");
                        eprintln!("{err}");
                        return Ok(ExitCode::FAILURE);
                    }
                }
                Some("2") => {
                    self.clear();
                    print!("{HELP}");
                    self.pause()?;
                }
                Some("0") | None => return Ok(ExitCode::SUCCESS),
                Some(_) => (),
            }
        }
    }

    /// Plays one game. The inner result is an error if the game state got
    /// corrupted.
    fn play(&mut self) -> io::Result<Result<(), PlayError>> {
        let mut game = Game::new();

        let outcome = loop {
            if let Some(outcome) = game.outcome() {
                break outcome;
            }

            self.clear();
            self.render(&game);

            let Some(line) = self.prompt("> ")? else {
                return Ok(Ok(()));
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    println!("\n{err}, type a move like e2 e4.");
                    self.pause()?;
                    continue;
                }
            };

            match command {
                Command::Resign => {
                    if self.confirm("Are you sure you want to resign?")? {
                        if let Ok(outcome) = game.resign() {
                            break outcome;
                        }
                    }
                }
                Command::OfferDraw => {
                    let question = format!("{}, do you accept a draw?", capitalized(!game.turn()));
                    if self.confirm(&question)? {
                        if let Ok(outcome) = game.accept_draw() {
                            break outcome;
                        }
                    }
                }
                Command::Play { coords, promotion } => {
                    match self.play_move(&mut game, coords, promotion)? {
                        Ok(()) => (),
                        Err(PlayError::Illegal(reason)) => {
                            println!("\n{}.", capitalized_str(&reason.to_string()));
                            self.pause()?;
                        }
                        Err(err @ PlayError::Corrupted(_)) => return Ok(Err(err)),
                    }
                }
            }
        };

        self.clear();
        self.render(&game);
        println!("{}.", capitalized_str(&outcome.to_string()));
        self.pause()?;
        Ok(Ok(()))
    }

    /// Asks for the promotion piece when a pawn reaches the last rank and
    /// none was given.
    fn play_move(
        &mut self,
        game: &mut Game,
        coords: Coords,
        promotion: Option<Role>,
    ) -> io::Result<Result<(), PlayError>> {
        let promotion = match (promotion, Move::try_from(coords)) {
            (None, Ok(m)) => match game.validate(m) {
                Ok(legal) if legal.is_promotion() => Some(self.ask_promotion()?),
                _ => None,
            },
            (promotion, _) => promotion,
        };

        Ok(game.play_coords(coords, promotion).map(|_| ()))
    }

    fn ask_promotion(&mut self) -> io::Result<Role> {
        loop {
            let answer = self.prompt("Promote to (q)ueen, (r)ook, (b)ishop or k(n)ight? ")?;
            let Some(answer) = answer else {
                return Ok(Role::Queen);
            };
            match answer.chars().next().and_then(Role::from_char) {
                Some(role) if role.is_promotion_target() => return Ok(role),
                _ => (),
            }
        }
    }
}

fn capitalized(color: Color) -> &'static str {
    color.fold("White", "Black")
}

fn capitalized_str(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut terminal = Terminal {
        input: io::stdin().lock(),
        opt: Opt::parse(),
    };

    match terminal.menu() {
        Ok(code) => code,
        Err(err) => {
            error!(%err, "terminal i/o failed");
            ExitCode::FAILURE
        }
    }
}
