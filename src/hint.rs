/*
hint.rs

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

//! Hints: highlight a misplaced tile for a short time.

use std::time::Duration;

use crate::scheduler::TimerId;
use crate::tile_set::TileSet;

/// How long a hint stays visible.
pub const HINT_DURATION: Duration = Duration::from_millis(2000);

/// Hint in progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HintState {
    /// Slot of the hinted tile.
    pub slot: usize,

    /// Identifier of the hinted tile.
    pub tile_id: usize,

    /// Pending expiry.
    pub expiry: TimerId,
}

/// Return the slot and the identifier of the tile to hint: the misplaced tile in the lowest slot.
pub fn pick(set: &TileSet) -> Option<(usize, usize)> {
    let slot: usize = set.first_misplaced()?;
    set.tile_at(slot).map(|t| (slot, t.id))
}
