/*
view.rs

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

//! Snapshots of the session for the presentation layer.

use crate::grid::{GridSize, TileMerge};

/// One tile, as the front end draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: usize,

    /// Slot the tile occupies.
    pub slot: usize,

    /// Slot the tile must reach.
    pub correct_pos: usize,

    /// Description of the tile image.
    pub label: String,

    /// Whether the tile is in its correct slot (and locked).
    pub solved: bool,

    pub selected: bool,
    pub hinted: bool,

    /// Merge metadata, for solved tiles only.
    pub merge: Option<TileMerge>,
}

/// State of the session at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// Level number, None for a random game.
    pub level: Option<u32>,

    /// Name of the image of the active puzzle.
    pub image_name: String,

    pub grid: GridSize,

    /// Tiles of the active puzzle, in slot order.
    pub tiles: Vec<TileView>,

    /// Slot of the selected tile.
    pub selected: Option<usize>,

    /// Identifier of the hinted tile.
    pub hinted_tile: Option<usize>,

    pub moves: u32,
    pub elapsed_secs: u64,

    /// Elapsed time as `m:ss`, or `--:--` for untimed games.
    pub time_label: String,

    /// Percentage of solved tiles over all the puzzles.
    pub progress: f64,

    /// Whether all the puzzles are solved.
    pub complete: bool,

    /// Index of the active puzzle.
    pub active_set: usize,

    /// Number of puzzles in the session.
    pub set_count: usize,
}

impl SessionView {
    /// Whether the session is a hard level (several puzzles).
    pub fn is_hard(&self) -> bool {
        self.set_count > 1
    }
}
