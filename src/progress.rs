/*
progress.rs

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

//! Level progress: best time and star rating per level.
//!
//! The [`ProgressStore`] trait is the storage port the game writes completed levels to.
//! [`ProgressBook`] keeps the records in memory, and [`FileProgressStore`] keeps a
//! [`ProgressBook`] in sync with the `progress.json` file through a [`JsonSaver`].
//! Storage failures never reach the player: they are logged and the in-memory records are used.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

use crate::saver::{JsonFormat, JsonSaver};
use crate::scoring::{self, Stars};

/// Name of the progress file in the data directory.
pub const PROGRESS_FILE: &str = "progress.json";

/// Best result for a level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelProgress {
    /// Level number, starting at 1.
    pub level: u32,

    /// Star rating of the best result.
    pub stars: Stars,

    /// Time of the best result, in whole seconds.
    pub best_time: u64,

    /// Whether the level has been completed. Always true for stored records.
    pub completed: bool,

    /// When the record was set.
    pub when: SystemTime,
}

impl LevelProgress {
    /// Create a record for a level completed in `seconds`.
    pub fn new(level: u32, seconds: u64) -> Self {
        Self {
            level,
            stars: scoring::stars_for(seconds),
            best_time: seconds,
            completed: true,
            when: SystemTime::now(),
        }
    }

    /// Whether `self` should replace `existing`: strictly faster or strictly more stars.
    fn improves_on(&self, existing: &LevelProgress) -> bool {
        self.best_time < existing.best_time || self.stars > existing.stars
    }
}

/// Storage port for the level progress.
pub trait ProgressStore {
    /// Return the record for the level, if any.
    fn get(&self, level: u32) -> Option<LevelProgress>;

    /// Record a completion of `level` in `seconds`.
    ///
    /// The existing record is replaced only if the new result is better. Return the record that
    /// is kept.
    fn upsert(&mut self, level: u32, seconds: u64) -> LevelProgress;

    /// Return all the records, sorted by level.
    fn all(&self) -> Vec<LevelProgress>;

    /// Delete all the records.
    fn clear(&mut self);
}

/// In-memory list of records.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProgressBook {
    levels: Vec<LevelProgress>,
}

impl ProgressBook {
    /// Create a [`ProgressBook`] object.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl ProgressStore for ProgressBook {
    fn get(&self, level: u32) -> Option<LevelProgress> {
        self.levels.iter().find(|p| p.level == level).cloned()
    }

    fn upsert(&mut self, level: u32, seconds: u64) -> LevelProgress {
        let new_progress = LevelProgress::new(level, seconds);
        match self.levels.iter_mut().find(|p| p.level == level) {
            Some(existing) => {
                if new_progress.improves_on(existing) {
                    debug!(
                        "Level {level}: new best {}s {} (was {}s {})",
                        new_progress.best_time,
                        new_progress.stars,
                        existing.best_time,
                        existing.stars
                    );
                    *existing = new_progress.clone();
                    new_progress
                } else {
                    existing.clone()
                }
            }
            None => {
                debug!("Level {level}: first completion in {seconds}s");
                self.levels.push(new_progress.clone());
                self.levels.sort_by_key(|p| p.level);
                new_progress
            }
        }
    }

    fn all(&self) -> Vec<LevelProgress> {
        self.levels.clone()
    }

    fn clear(&mut self) {
        self.levels.clear();
    }
}

/// Progress records persisted in the data directory.
pub struct FileProgressStore {
    saver: JsonSaver<ProgressBook>,
    book: ProgressBook,
}

impl FileProgressStore {
    /// Create a [`FileProgressStore`] object and load the existing records.
    ///
    /// An unreadable file is deleted and the store starts empty.
    pub fn new(data_dir: &Path) -> Self {
        let saver: JsonSaver<ProgressBook> =
            JsonSaver::new(data_dir, PROGRESS_FILE, JsonFormat::Compact);
        let book: ProgressBook = match saver.load() {
            Ok(Some(book)) => book,
            Ok(None) => {
                debug!("No saved progress");
                ProgressBook::new()
            }
            Err(error) => {
                warn!("Error reading the saved progress: {error}");
                saver.delete();
                ProgressBook::new()
            }
        };
        Self { saver, book }
    }

    fn save(&self) {
        if let Err(error) = self.saver.save(&self.book) {
            warn!("Error saving the progress: {error}");
        }
    }
}

impl ProgressStore for FileProgressStore {
    fn get(&self, level: u32) -> Option<LevelProgress> {
        self.book.get(level)
    }

    fn upsert(&mut self, level: u32, seconds: u64) -> LevelProgress {
        let before: Option<LevelProgress> = self.book.get(level);
        let kept: LevelProgress = self.book.upsert(level, seconds);
        if before.as_ref() != Some(&kept) {
            self.save();
        }
        kept
    }

    fn all(&self) -> Vec<LevelProgress> {
        self.book.all()
    }

    fn clear(&mut self) {
        self.book.clear();
        self.saver.delete();
    }
}
