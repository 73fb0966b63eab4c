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

//! Append-only log of the positions of a game.
//!
//! Every completed half-move appends an immutable [`Snapshot`]. Snapshots
//! live in an arena and point back to their predecessor by index, so the
//! whole chain is released at once when the [`History`] is dropped.

use std::iter::FusedIterator;

use arrayvec::ArrayVec;

use crate::{board::Board, color::Color, m::Move, square::Square, types::Piece};

/// An occupied square.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub piece: Piece,
    pub square: Square,
}

/// Index of a [`Snapshot`] in its [`History`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SnapshotId(usize);

/// Immutable record of a position.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Snapshot {
    placements: ArrayVec<Placement, 64>,
    turn: Color,
    cause: Option<(Move, Color)>,
    prev: Option<SnapshotId>,
}

impl Snapshot {
    fn capture(board: &Board, turn: Color, cause: Option<(Move, Color)>, prev: Option<SnapshotId>) -> Snapshot {
        Snapshot {
            placements: board
                .pieces()
                .map(|(square, piece)| Placement { piece, square })
                .collect(),
            turn,
            cause,
            prev,
        }
    }

    /// Occupied squares in rank-major order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of pieces on the board.
    pub fn count(&self) -> usize {
        self.placements.len()
    }

    /// Side to move in this position.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The move that produced this position and the color that played it.
    /// `None` for the starting position.
    pub fn cause(&self) -> Option<(Move, Color)> {
        self.cause
    }

    pub fn prev(&self) -> Option<SnapshotId> {
        self.prev
    }

    /// Same pieces on the same squares, with the same side to move.
    pub fn is_same_position(&self, other: &Snapshot) -> bool {
        self.turn == other.turn && self.placements == other.placements
    }
}

/// The log of positions of a game, newest first, with the half-move
/// counter for the fifty-move rule.
#[derive(Clone, Debug)]
pub struct History {
    nodes: Vec<Snapshot>,
    head: SnapshotId,
    halfmoves: u32,
}

impl History {
    /// Starts a log at the given position.
    pub fn new(board: &Board, turn: Color) -> History {
        History {
            nodes: vec![Snapshot::capture(board, turn, None, None)],
            head: SnapshotId(0),
            halfmoves: 0,
        }
    }

    /// Records the position after `mover` played `m`.
    ///
    /// `zeroing` resets the half-move counter (pawn moves and captures).
    pub fn push(&mut self, board: &Board, m: Move, mover: Color, zeroing: bool) -> SnapshotId {
        let id = SnapshotId(self.nodes.len());
        self.nodes
            .push(Snapshot::capture(board, !mover, Some((m, mover)), Some(self.head)));
        self.head = id;
        self.halfmoves = if zeroing { 0 } else { self.halfmoves + 1 };
        id
    }

    #[inline]
    pub fn head(&self) -> &Snapshot {
        &self.nodes[self.head.0]
    }

    #[inline]
    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.nodes.get(id.0)
    }

    /// Walks the chain from the newest snapshot to the starting position.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            history: self,
            next: Some(self.head),
        }
    }

    /// The most recent move and the color that played it.
    pub fn last_move(&self) -> Option<(Move, Color)> {
        self.head().cause()
    }

    /// Checks if any recorded move started on `sq`.
    pub fn has_moved_from(&self, sq: Square) -> bool {
        self.iter()
            .filter_map(Snapshot::cause)
            .any(|(m, _)| m.from() == sq)
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Occurrences of the current position, counting the current one.
    ///
    /// Stops at the first snapshot with a different number of pieces, since
    /// pieces are never added back to the board.
    pub fn repetitions(&self) -> usize {
        let head = self.head();
        self.iter()
            .take_while(|snapshot| snapshot.count() == head.count())
            .filter(|snapshot| snapshot.is_same_position(head))
            .count()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    /// Number of snapshots, including the starting position.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a log holds at least the starting position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator over the snapshots of a [`History`], newest first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    history: &'a History,
    next: Option<SnapshotId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Snapshot;

    fn next(&mut self) -> Option<&'a Snapshot> {
        let snapshot = self.history.get(self.next?)?;
        self.next = snapshot.prev();
        Some(snapshot)
    }
}

impl FusedIterator for Iter<'_> {}
