/*
level.rs

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

//! Level selection.
//!
//! Levels are numbered from 1, one per catalog image. Every fifth level is a hard level made of
//! three puzzles: the level's image and the next two images in catalog order, wrapping around.
//! A level number outside the catalog falls back to the first image, without progress tracking.

use log::debug;
use rand::Rng;

use crate::catalog::{Catalog, CatalogImage};
use crate::orchestrator::HARD_LEVEL_SETS;

/// Every level that is a multiple of this number is a hard level.
pub const HARD_LEVEL_EVERY: u32 = 5;

/// What the player asked to play.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelChoice {
    /// A numbered level, starting at 1.
    Level(u32),

    /// A random image, untracked.
    Random,
}

/// Whether the level is a hard level.
pub fn is_hard(level: u32) -> bool {
    level > 0 && level % HARD_LEVEL_EVERY == 0
}

/// Images to play and the level they count for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPlan {
    /// Level number, None for untracked games.
    pub level: Option<u32>,

    /// One image per puzzle.
    pub images: Vec<CatalogImage>,
}

/// Resolve the player's choice against the catalog.
pub fn plan<R: Rng + ?Sized>(catalog: &Catalog, choice: LevelChoice, rng: &mut R) -> LevelPlan {
    let count: usize = catalog.len();
    let images = |indices: &[usize]| -> Vec<CatalogImage> {
        indices
            .iter()
            .filter_map(|&i| catalog.get(i % count).cloned())
            .collect()
    };

    let plan: LevelPlan = match choice {
        LevelChoice::Level(level) if level >= 1 && (level as usize) <= count => {
            let base: usize = level as usize - 1;
            let indices: Vec<usize> = if is_hard(level) {
                (0..HARD_LEVEL_SETS).map(|i| base + i).collect()
            } else {
                vec![base]
            };
            LevelPlan {
                level: Some(level),
                images: images(&indices),
            }
        }
        LevelChoice::Level(level) => {
            debug!("Level {level} is out of range, using the first image");
            LevelPlan {
                level: None,
                images: images(&[0]),
            }
        }
        LevelChoice::Random => LevelPlan {
            level: None,
            images: images(&[rng.random_range(0..count.max(1))]),
        },
    };
    debug!(
        "Level plan: {:?} with {:?}",
        plan.level,
        plan.images.iter().map(|i| &i.file_name).collect::<Vec<&String>>()
    );
    plan
}

/// Level after `level`, if the catalog has one.
pub fn next_level(catalog: &Catalog, level: u32) -> Option<u32> {
    let next: u32 = level.checked_add(1)?;
    ((next as usize) <= catalog.len()).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::Path;

    fn catalog(count: usize) -> Catalog {
        Catalog::from_files(
            Path::new("img"),
            (0..count).map(|i| format!("image{i:02}.png")).collect(),
        )
        .expect("the list is not empty")
    }

    fn files(plan: &LevelPlan) -> Vec<&str> {
        plan.images.iter().map(|i| i.file_name.as_str()).collect()
    }

    #[test]
    fn hard_levels() {
        assert!(!is_hard(1));
        assert!(!is_hard(4));
        assert!(is_hard(5));
        assert!(is_hard(10));
        assert!(!is_hard(0));
    }

    #[test]
    fn normal_level_uses_its_image() {
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan(&catalog(8), LevelChoice::Level(3), &mut rng);
        assert_eq!(plan.level, Some(3));
        assert_eq!(files(&plan), vec!["image02.png"]);
    }

    #[test]
    fn hard_level_uses_three_images() {
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan(&catalog(8), LevelChoice::Level(5), &mut rng);
        assert_eq!(plan.level, Some(5));
        assert_eq!(files(&plan), vec!["image04.png", "image05.png", "image06.png"]);
    }

    #[test]
    fn hard_level_wraps_around_the_catalog() {
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan(&catalog(5), LevelChoice::Level(5), &mut rng);
        assert_eq!(files(&plan), vec!["image04.png", "image00.png", "image01.png"]);
    }

    #[test]
    fn out_of_range_level_falls_back_to_first_image() {
        let mut rng = StdRng::seed_from_u64(0);
        for level in [0, 9, 100] {
            let plan = plan(&catalog(8), LevelChoice::Level(level), &mut rng);
            assert_eq!(plan.level, None);
            assert_eq!(files(&plan), vec!["image00.png"]);
        }
    }

    #[test]
    fn random_game_is_untracked() {
        let mut rng = StdRng::seed_from_u64(4);
        let plan = plan(&catalog(8), LevelChoice::Random, &mut rng);
        assert_eq!(plan.level, None);
        assert_eq!(plan.images.len(), 1);
    }

    #[test]
    fn next_level_stops_at_catalog_end() {
        let catalog = catalog(3);
        assert_eq!(next_level(&catalog, 1), Some(2));
        assert_eq!(next_level(&catalog, 3), None);
    }
}
