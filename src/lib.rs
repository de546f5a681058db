/*
lib.rs

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

//! Swap jigsaw puzzle engine.
//!
//! An image is cut into a grid of tiles, the tiles are shuffled, and the player swaps pairs of
//! tiles until every tile is back in its original slot.
//!
//! The engine is organized as follows:
//!
//! * [`tile::Tile`] and [`tile_set::TileSet`] hold the puzzle. A tile set is an immutable
//!   snapshot: swapping and shuffling return a new snapshot. Solved tiles are locked.
//! * [`orchestrator::PuzzleSets`] sequences the puzzles of a level: one for normal levels, three
//!   for hard levels.
//! * [`session::PuzzleSession`] is the game in progress. It handles clicks, drags, shuffles, and
//!   hints, counts the moves, tracks the time through a [`scheduler::Clock`], and runs its delayed
//!   actions (hint expiry, completion report) from a [`scheduler::Scheduler`].
//! * [`scoring`] turns the completion time into stars, and [`progress`] keeps the best result per
//!   level.
//! * [`launcher::Launcher`] starts sessions from the [`catalog`] and the tiles provided by a
//!   [`splitter::TileSource`], and records the results.

pub mod catalog;
pub mod drag;
pub mod error;
pub mod grid;
pub mod hint;
pub mod launcher;
pub mod level;
pub mod orchestrator;
pub mod progress;
pub mod saver;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod shuffle;
pub mod splitter;
pub mod tile;
pub mod tile_set;
pub mod view;
