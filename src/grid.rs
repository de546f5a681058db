/*
grid.rs

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

//! Grid geometry and merge metadata for solved tiles.
//!
//! Slots are numbered in row-major order: slot `row * cols + col`.
//! Solved tiles that touch each other are drawn as one seamless block. [`merge_map`] tells the
//! presentation layer which sides and corners of each solved tile are shared with another solved
//! tile, and which sides form the outer border of the block.

use strum_macros::FromRepr;

/// Number of rows and columns of the puzzle grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(3)
    }
}

impl GridSize {
    /// Create a [`GridSize`] object.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Create a grid with the same number of rows and columns.
    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Number of slots (and tiles).
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the (row, column) of the slot, or None if the slot is outside the grid.
    pub fn coords(&self, slot: usize) -> Option<(usize, usize)> {
        if slot >= self.len() {
            return None;
        }
        Some((slot / self.cols, slot % self.cols))
    }

    /// Return the slot at the given offset from `slot`, or None if that falls off the grid.
    pub fn neighbor(&self, slot: usize, direction: Direction) -> Option<usize> {
        let (row, col) = self.coords(slot)?;
        let (dr, dc) = direction.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }
}

/// The eight neighbor directions, orthogonal ones first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: u8 = 8;

    /// Iterate over the eight directions.
    pub fn all() -> impl Iterator<Item = Direction> {
        (0..Self::COUNT).filter_map(Direction::from_repr)
    }

    /// Row and column offsets.
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
            Direction::TopLeft => (-1, -1),
            Direction::TopRight => (-1, 1),
            Direction::BottomLeft => (1, -1),
            Direction::BottomRight => (1, 1),
        }
    }
}

/// Neighbors of a solved tile that are solved too.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MergeFlags {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl MergeFlags {
    /// Return the flag for the given direction.
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
            Direction::TopLeft => self.top_left,
            Direction::TopRight => self.top_right,
            Direction::BottomLeft => self.bottom_left,
            Direction::BottomRight => self.bottom_right,
        }
    }

    fn set(&mut self, direction: Direction, value: bool) {
        let flag: &mut bool = match direction {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
            Direction::TopLeft => &mut self.top_left,
            Direction::TopRight => &mut self.top_right,
            Direction::BottomLeft => &mut self.bottom_left,
            Direction::BottomRight => &mut self.bottom_right,
        };
        *flag = value;
    }

    /// Whether the tile shares at least one side or corner with another solved tile.
    pub fn any(&self) -> bool {
        Direction::all().any(|d| self.get(d))
    }
}

/// Sides of a solved tile that are on the outer border of its merged block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GroupEdges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Merge metadata of a solved tile.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TileMerge {
    pub merged: MergeFlags,
    pub edges: GroupEdges,
}

/// Compute the merge metadata of every slot.
///
/// `solved[slot]` tells whether the tile in that slot is solved. The returned vector has one
/// entry per slot: None for unsolved tiles.
pub fn merge_map(grid: GridSize, solved: &[bool]) -> Vec<Option<TileMerge>> {
    let is_solved =
        |slot: Option<usize>| slot.is_some_and(|s| solved.get(s).copied() == Some(true));

    (0..solved.len())
        .map(|slot| {
            if !solved[slot] {
                return None;
            }
            let mut merge = TileMerge::default();
            for direction in Direction::all() {
                let shared: bool = is_solved(grid.neighbor(slot, direction));
                merge.merged.set(direction, shared);
            }
            merge.edges = GroupEdges {
                top: !merge.merged.top,
                right: !merge.merged.right,
                bottom: !merge.merged.bottom,
                left: !merge.merged.left,
            };
            Some(merge)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_are_row_major() {
        let grid = GridSize::new(2, 3);
        assert_eq!(grid.coords(0), Some((0, 0)));
        assert_eq!(grid.coords(4), Some((1, 1)));
        assert_eq!(grid.coords(5), Some((1, 2)));
        assert_eq!(grid.coords(6), None);
    }

    #[test]
    fn corner_has_three_neighbors() {
        let grid = GridSize::square(3);
        let neighbors: Vec<usize> = Direction::all()
            .filter_map(|d| grid.neighbor(0, d))
            .collect();
        assert_eq!(neighbors, vec![1, 3, 4]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        let grid = GridSize::square(3);
        assert_eq!(
            Direction::all().filter_map(|d| grid.neighbor(4, d)).count(),
            8
        );
        assert_eq!(grid.neighbor(4, Direction::TopLeft), Some(0));
        assert_eq!(grid.neighbor(4, Direction::BottomRight), Some(8));
    }

    #[test]
    fn neighbors_do_not_wrap_rows() {
        let grid = GridSize::square(3);
        assert_eq!(grid.neighbor(2, Direction::Right), None);
        assert_eq!(grid.neighbor(3, Direction::Left), None);
    }

    #[test]
    fn unsolved_slots_have_no_merge() {
        let map = merge_map(GridSize::square(3), &[false; 9]);
        assert!(map.iter().all(Option::is_none));
    }

    #[test]
    fn lone_solved_tile_is_bordered_on_all_sides() {
        let mut solved = [false; 9];
        solved[4] = true;
        let map = merge_map(GridSize::square(3), &solved);
        let merge = map[4].expect("slot 4 is solved");
        assert!(!merge.merged.any());
        assert_eq!(
            merge.edges,
            GroupEdges {
                top: true,
                right: true,
                bottom: true,
                left: true
            }
        );
    }

    #[test]
    fn adjacent_solved_tiles_share_edges_and_corners() {
        // Solved: 0, 1, 4
        let mut solved = [false; 9];
        solved[0] = true;
        solved[1] = true;
        solved[4] = true;
        let map = merge_map(GridSize::square(3), &solved);

        let m0 = map[0].expect("slot 0 is solved");
        assert!(m0.merged.right);
        assert!(m0.merged.bottom_right);
        assert!(!m0.merged.bottom);
        assert!(m0.edges.top && m0.edges.left && m0.edges.bottom && !m0.edges.right);

        let m4 = map[4].expect("slot 4 is solved");
        assert!(m4.merged.top);
        assert!(m4.merged.top_left);
        assert!(!m4.merged.left);
        assert!(!m4.edges.top);
    }
}
