//! A chess rules engine: move validation, special moves and the end of the
//! game.
//!
//! # Examples
//!
//! Play moves:
//!
//! ```
//! use arbiter::{Color, Game, Move, Square};
//!
//! let mut game = Game::new();
//!
//! // 1. e4
//! game.play(Move::new(Square::E2, Square::E4))?;
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, arbiter::PlayError>(())
//! ```
//!
//! Rejected moves report why, and leave the game unchanged:
//!
//! ```
//! use arbiter::{Game, IllegalMove, Move, PlayError, Square};
//!
//! let mut game = Game::new();
//! assert_eq!(
//!     game.play(Move::new(Square::F1, Square::C4)),
//!     Err(PlayError::Illegal(IllegalMove::PathBlocked))
//! );
//! assert_eq!(game.history().len(), 1);
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use arbiter::Game;
//!
//! let game = Game::new();
//! assert!(!game.is_check());
//! assert_eq!(game.outcome(), None); // no winner yet
//! ```
//!
//! Enumerate legal moves:
//!
//! ```
//! use arbiter::Game;
//!
//! let mut game = Game::new();
//! assert_eq!(game.legal_moves()?.len(), 20);
//! # Ok::<_, arbiter::PositionError>(())
//! ```
//!
//! # Feature flags
//!
//! * `cli`: Builds the `arbiter` binary, a terminal game for two players.
//!   Enabled by default.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/arbiter/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod color;
mod errors;
mod game;
mod m;
mod perft;
mod role;
mod square;
mod types;

pub mod board;
pub mod check;
pub mod command;
pub mod endgame;
pub mod history;
pub mod movement;

pub use board::{Board, Diagram};
pub use check::Speculation;
pub use color::{ByColor, Color, ParseColorError};
pub use command::{Command, ParseCommandError};
pub use endgame::{Outcome, Verdict};
pub use errors::{IllegalMove, PlayError, PositionError};
pub use game::Game;
pub use history::{History, Placement, Snapshot, SnapshotId};
pub use m::{Coords, Displacement, LegalMove, Move, MoveFlags, MoveList};
pub use perft::perft;
pub use role::Role;
pub use square::{Between, ParseSquareError, Square};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
