/*
tile_set.rs

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

//! One puzzle: the tiles of a single image.
//!
//! A [`TileSet`] is an immutable snapshot. [`TileSet::swapped`] and [`TileSet::shuffled`] return
//! a new snapshot instead of updating the tiles in place, so that a snapshot handed to the
//! presentation layer never changes under its feet.
//!
//! The tiles are always sorted by current position: `tiles()[slot].current_pos == slot`.

use log::debug;
use rand::Rng;

use crate::grid::{self, GridSize, TileMerge};
use crate::shuffle;
use crate::tile::{Tile, TileImage};

/// Image the tile set has been cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Display name.
    pub name: String,

    /// Path or URL of the image.
    pub location: String,
}

/// Tiles of one puzzle.
#[derive(Debug, Clone)]
pub struct TileSet {
    /// Index of the set in the session.
    index: usize,

    /// Tiles, sorted by current position.
    tiles: Vec<Tile>,

    /// Grid dimensions.
    grid: GridSize,

    /// Image the tiles come from.
    source: SourceImage,
}

impl TileSet {
    /// Create a solved [`TileSet`] object from the ordered tile images.
    ///
    /// Tile `i` gets the identifier `i` and the correct position `i`.
    /// Return None if the number of images does not match the grid.
    pub fn new(
        index: usize,
        grid: GridSize,
        source: SourceImage,
        images: Vec<TileImage>,
    ) -> Option<Self> {
        if images.len() != grid.len() {
            return None;
        }
        let tiles: Vec<Tile> = images
            .into_iter()
            .enumerate()
            .map(|(i, image)| Tile::new(i, index, i, image))
            .collect();
        Some(Self {
            index,
            tiles,
            grid,
            source,
        })
    }

    /// Index of the set in the session.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tiles sorted by current position.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile in the given slot.
    pub fn tile_at(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether every tile is in its correct slot.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Tile::is_solved)
    }

    /// Whether the tile in the given slot exists and is not solved yet.
    pub fn is_movable(&self, slot: usize) -> bool {
        self.tile_at(slot).is_some_and(|t| !t.is_solved())
    }

    /// Number of tiles in their correct slot.
    pub fn solved_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_solved()).count()
    }

    /// Return a copy of the set with the tiles in slots `a` and `b` exchanged.
    ///
    /// Return None, the move being rejected, if `a == b`, if a slot is out of range, or if one of
    /// the two tiles is already solved.
    pub fn swapped(&self, a: usize, b: usize) -> Option<TileSet> {
        if a == b || !self.is_movable(a) || !self.is_movable(b) {
            return None;
        }
        let mut tiles: Vec<Tile> = self.tiles.clone();
        tiles[a].current_pos = b;
        tiles[b].current_pos = a;
        tiles.sort_by_key(|t| t.current_pos);
        debug!(
            "Set {}: swapped slots {a} and {b} ({}/{} solved)",
            self.index,
            tiles.iter().filter(|t| t.is_solved()).count(),
            tiles.len()
        );
        Some(TileSet {
            tiles,
            ..self.clone_meta()
        })
    }

    /// Return a copy of the set with all the tile positions randomized.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> TileSet {
        TileSet {
            tiles: shuffle::shuffled(&self.tiles, rng),
            ..self.clone_meta()
        }
    }

    /// Return a copy of the set with tile `i` moved to slot `positions[i]`, solved tiles included.
    ///
    /// Used to restore a known arrangement. Return None if `positions` is not a permutation of
    /// the slots.
    pub fn arranged(&self, positions: &[usize]) -> Option<TileSet> {
        if positions.len() != self.tiles.len() {
            return None;
        }
        let mut taken: Vec<bool> = vec![false; positions.len()];
        for &pos in positions {
            if pos >= taken.len() || taken[pos] {
                return None;
            }
            taken[pos] = true;
        }
        let mut tiles: Vec<Tile> = self.tiles.clone();
        for tile in tiles.iter_mut() {
            tile.current_pos = *positions.get(tile.id)?;
        }
        tiles.sort_by_key(|t| t.current_pos);
        Some(TileSet {
            tiles,
            ..self.clone_meta()
        })
    }

    /// Slot of the first tile, in slot order, that is not in its correct slot.
    pub fn first_misplaced(&self) -> Option<usize> {
        self.tiles.iter().position(|t| !t.is_solved())
    }

    /// Merge metadata of every slot. See [`grid::merge_map`].
    pub fn merge_map(&self) -> Vec<Option<TileMerge>> {
        let solved: Vec<bool> = self.tiles.iter().map(Tile::is_solved).collect();
        grid::merge_map(self.grid, &solved)
    }

    /// Copy everything but the tiles.
    fn clone_meta(&self) -> TileSet {
        TileSet {
            index: self.index,
            tiles: Vec::new(),
            grid: self.grid,
            source: self.source.clone(),
        }
    }

    /// Build a set from explicit positions: tile `i` currently sits in `positions[i]`.
    #[cfg(test)]
    pub(crate) fn from_positions(index: usize, grid: GridSize, positions: &[usize]) -> TileSet {
        use crate::tile::tests::blank_image;

        let mut tiles: Vec<Tile> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Tile {
                current_pos: pos,
                ..Tile::new(i, index, i, blank_image(&format!("t{i}")))
            })
            .collect();
        tiles.sort_by_key(|t| t.current_pos);
        TileSet {
            index,
            tiles,
            grid,
            source: SourceImage {
                name: format!("Image {index}"),
                location: format!("image-{index}.png"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn positions(set: &TileSet) -> Vec<usize> {
        // correct position of the tile in each slot
        set.tiles().iter().map(|t| t.correct_pos).collect()
    }

    fn is_permutation(set: &TileSet) -> bool {
        set.tiles()
            .iter()
            .enumerate()
            .all(|(slot, t)| t.current_pos == slot)
            && set.len() == set.grid().len()
    }

    #[test]
    fn new_rejects_wrong_image_count() {
        let images = vec![crate::tile::tests::blank_image("a")];
        let source = SourceImage {
            name: "A".to_string(),
            location: "a.png".to_string(),
        };
        assert!(TileSet::new(0, GridSize::square(3), source, images).is_none());
    }

    #[test]
    fn swap_exchanges_two_unsolved_tiles() {
        // Slot 0 holds tile 1, slot 1 holds tile 0
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[1, 0, 2]);
        assert_eq!(positions(&set), vec![1, 0, 2]);
        let swapped = set.swapped(0, 1).expect("both tiles are misplaced");
        assert_eq!(positions(&swapped), vec![0, 1, 2]);
        assert!(swapped.is_complete());
        assert!(is_permutation(&swapped));
        // The original snapshot is untouched
        assert_eq!(positions(&set), vec![1, 0, 2]);
    }

    #[test]
    fn swap_with_solved_tile_is_rejected() {
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[1, 0, 2]);
        assert!(set.swapped(0, 2).is_none());
        assert!(set.swapped(2, 1).is_none());
    }

    #[test]
    fn self_swap_is_rejected() {
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[1, 2, 0]);
        for slot in 0..3 {
            assert!(set.swapped(slot, slot).is_none());
        }
    }

    #[test]
    fn out_of_range_swap_is_rejected() {
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[1, 2, 0]);
        assert!(set.swapped(0, 3).is_none());
        assert!(set.swapped(9, 1).is_none());
    }

    #[test]
    fn completion_matches_positions_after_random_swaps() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut set = TileSet::from_positions(0, GridSize::square(3), &[0, 1, 2, 3, 4, 5, 6, 7, 8])
            .shuffled(&mut rng);
        for _ in 0..200 {
            let a: usize = rng.random_range(0..9);
            let b: usize = rng.random_range(0..9);
            if let Some(next) = set.swapped(a, b) {
                set = next;
            }
            assert!(is_permutation(&set));
            assert_eq!(
                set.is_complete(),
                set.tiles().iter().all(|t| t.current_pos == t.correct_pos)
            );
        }
    }

    #[test]
    fn shuffle_keeps_identity() {
        let mut rng = StdRng::seed_from_u64(9);
        let set = TileSet::from_positions(2, GridSize::square(3), &[3, 1, 2, 0, 4, 5, 6, 8, 7]);
        let shuffled = set.shuffled(&mut rng);
        assert!(is_permutation(&shuffled));
        assert_eq!(shuffled.index(), 2);
        assert!(shuffled.tiles().iter().all(|t| t.set_index == 2));
        let mut ids: Vec<usize> = shuffled.tiles().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..9).collect::<Vec<usize>>());
    }

    #[test]
    fn first_misplaced_is_lowest_slot() {
        let set = TileSet::from_positions(0, GridSize::square(3), &[0, 1, 2, 3, 5, 4, 6, 7, 8]);
        assert_eq!(set.first_misplaced(), Some(4));
        let solved = TileSet::from_positions(0, GridSize::new(1, 2), &[0, 1]);
        assert_eq!(solved.first_misplaced(), None);
    }

    #[test]
    fn merge_map_follows_swaps() {
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[1, 0, 2]);
        let before = set.merge_map();
        assert!(before[0].is_none());
        assert!(before[2].is_some_and(|m| !m.merged.left));

        let after = set.swapped(0, 1).expect("both tiles are misplaced").merge_map();
        assert!(after.iter().all(Option::is_some));
        assert!(after[1].is_some_and(|m| m.merged.left && m.merged.right));
    }

    #[test]
    fn arranged_restores_positions() {
        let set = TileSet::from_positions(0, GridSize::new(1, 3), &[0, 1, 2]);
        // Tile 0 goes to slot 2, tile 1 to slot 0, tile 2 to slot 1
        let arranged = set.arranged(&[2, 0, 1]).expect("valid permutation");
        assert_eq!(positions(&arranged), vec![1, 2, 0]);
        assert_eq!(arranged.tile_at(0).map(|t| t.id), Some(1));
        assert!(set.arranged(&[0, 0, 1]).is_none());
        assert!(set.arranged(&[0, 1]).is_none());
        assert!(set.arranged(&[0, 1, 3]).is_none());
    }
}
