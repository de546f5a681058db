/*
shuffle.rs

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

//! Randomize the tile positions.
//!
//! The current positions of all the tiles are shuffled together, including the positions of the
//! tiles that are already solved. Every one of the N! arrangements is equally likely, the
//! identity included.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::tile::Tile;

/// Return a copy of the tiles with a random permutation of their current positions.
///
/// The returned tiles are sorted by current position. Identifiers, correct positions, and images
/// are kept.
pub fn shuffled<R: Rng + ?Sized>(tiles: &[Tile], rng: &mut R) -> Vec<Tile> {
    let mut positions: Vec<usize> = tiles.iter().map(|t| t.current_pos).collect();
    // Fisher-Yates
    positions.shuffle(rng);

    let mut ret: Vec<Tile> = tiles
        .iter()
        .zip(positions)
        .map(|(tile, pos)| Tile {
            current_pos: pos,
            ..tile.clone()
        })
        .collect();
    ret.sort_by_key(|t| t.current_pos);
    debug!(
        "Shuffled {} tiles: {:?}",
        ret.len(),
        ret.iter().map(|t| t.correct_pos).collect::<Vec<usize>>()
    );
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tests::blank_image;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn solved_tiles(n: usize) -> Vec<Tile> {
        (0..n)
            .map(|i| Tile::new(i, 0, i, blank_image(&format!("t{i}"))))
            .collect()
    }

    #[test]
    fn positions_stay_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=16 {
            let tiles = shuffled(&solved_tiles(n), &mut rng);
            let mut positions: Vec<usize> = tiles.iter().map(|t| t.current_pos).collect();
            positions.sort_unstable();
            assert_eq!(positions, (0..n).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn result_is_sorted_by_current_position() {
        let mut rng = StdRng::seed_from_u64(11);
        let tiles = shuffled(&solved_tiles(9), &mut rng);
        for (slot, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.current_pos, slot);
        }
    }

    #[test]
    fn identity_and_targets_are_kept() {
        let mut rng = StdRng::seed_from_u64(3);
        let tiles = shuffled(&solved_tiles(9), &mut rng);
        for tile in &tiles {
            assert_eq!(tile.id, tile.correct_pos);
            assert_eq!(tile.image.label, format!("t{}", tile.id));
        }
    }

    #[test]
    fn single_tile_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let tiles = shuffled(&solved_tiles(1), &mut rng);
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].is_solved());
        assert!(shuffled(&[], &mut rng).is_empty());
    }

    #[test]
    fn all_arrangements_of_three_tiles_show_up() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..6000 {
            let tiles = shuffled(&solved_tiles(3), &mut rng);
            let key: Vec<usize> = tiles.iter().map(|t| t.id).collect();
            *seen.entry(key).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        // Each arrangement is expected about 1000 times
        assert!(seen.values().all(|&count| (800..1200).contains(&count)));
    }
}
