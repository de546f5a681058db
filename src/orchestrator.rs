/*
orchestrator.rs

Copyright 2025 Hervé Quatremain

This file is part of Jigswap.

Jigswap is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Jigswap is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Jigswap. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Sequence the puzzles of a session.
//!
//! A normal level has a single [`TileSet`]. A hard level has three, played one after the other:
//! only the active set receives moves, and completing it moves on to the lowest-indexed set that
//! is not complete yet. Completed sets are frozen (all their tiles are solved, so all locked).

use log::debug;

use crate::tile_set::TileSet;

/// Number of puzzles in a hard level.
pub const HARD_LEVEL_SETS: usize = 3;

/// What happened after the active set changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The active set is not complete, or nothing changed.
    Stay,

    /// The active set is complete and another set becomes active.
    Advanced { from: usize, to: usize },

    /// All the sets are complete. Reported once per session.
    Finished,
}

/// Puzzles of a session.
#[derive(Debug, Clone)]
pub struct PuzzleSets {
    sets: Vec<TileSet>,
    active: usize,
    finished: bool,
}

impl PuzzleSets {
    /// Create a [`PuzzleSets`] object. The first set is active.
    ///
    /// Return None if `sets` is empty.
    pub fn new(sets: Vec<TileSet>) -> Option<Self> {
        if sets.is_empty() {
            return None;
        }
        Some(Self {
            sets,
            active: 0,
            finished: false,
        })
    }

    /// The set that receives the moves.
    pub fn active(&self) -> &TileSet {
        &self.sets[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn sets(&self) -> &[TileSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Whether all the sets are complete.
    pub fn is_complete(&self) -> bool {
        self.sets.iter().all(TileSet::is_complete)
    }

    /// Percentage of solved tiles over all the sets.
    pub fn progress(&self) -> f64 {
        let total: usize = self.sets.iter().map(TileSet::len).sum();
        if total == 0 {
            return 0.0;
        }
        let solved: usize = self.sets.iter().map(TileSet::solved_count).sum();
        solved as f64 * 100.0 / total as f64
    }

    /// Replace the active set with a new snapshot and settle the sequence.
    pub fn replace_active(&mut self, set: TileSet) -> Transition {
        self.sets[self.active] = set;
        self.settle()
    }

    /// Move on if the active set is complete.
    pub fn settle(&mut self) -> Transition {
        if self.finished || !self.active().is_complete() {
            return Transition::Stay;
        }
        debug!("Set {} complete", self.active);
        match self.sets.iter().position(|s| !s.is_complete()) {
            Some(next) => {
                let from: usize = self.active;
                self.active = next;
                debug!("Advancing from set {from} to set {next}");
                Transition::Advanced { from, to: next }
            }
            None => {
                self.finished = true;
                debug!("All {} sets complete", self.sets.len());
                Transition::Finished
            }
        }
    }
}
