/*
tile.rs

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

//! Puzzle tiles.
//!
//! A [`Tile`] is one piece of a split image. Its identity ([`Tile::id`], [`Tile::set_index`])
//! and its target slot ([`Tile::correct_pos`]) never change. Only [`Tile::current_pos`] moves,
//! and only through the [`crate::tile_set::TileSet`] that owns the tile.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

/// Visual content of a tile, as produced by a [`crate::splitter::TileSource`].
///
/// The engine never looks at the pixels. They are carried along for the presentation layer.
#[derive(Clone)]
pub struct TileImage {
    /// Short description of the piece, such as `"Sunset Lake #4"`.
    pub label: String,

    /// Cropped pixels of the piece.
    pub pixels: Arc<RgbaImage>,
}

impl TileImage {
    /// Create a [`TileImage`] object.
    pub fn new(label: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            label: label.into(),
            pixels: Arc::new(pixels),
        }
    }
}

impl fmt::Debug for TileImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TileImage")
            .field("label", &self.label)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

/// One piece of the puzzle.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Identifier, unique within the tile set.
    pub id: usize,

    /// Index of the tile set (puzzle) the tile belongs to.
    pub set_index: usize,

    /// Slot that the tile currently occupies.
    pub current_pos: usize,

    /// Slot that the tile must reach.
    pub correct_pos: usize,

    /// Visual content.
    pub image: TileImage,
}

impl Tile {
    /// Create a tile that sits in its correct slot.
    pub fn new(id: usize, set_index: usize, correct_pos: usize, image: TileImage) -> Self {
        Self {
            id,
            set_index,
            current_pos: correct_pos,
            correct_pos,
            image,
        }
    }

    /// Whether the tile is in its correct slot. Solved tiles are locked.
    pub fn is_solved(&self) -> bool {
        self.current_pos == self.correct_pos
    }
}
