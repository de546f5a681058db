/*
launcher.rs

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

//! Start, restart, and finish sessions.
//!
//! The [`Launcher`] ties the engine to its collaborators: the catalog, the tile source, the
//! settings, and the progress store. It owns at most one [`PuzzleSession`] at a time. Starting a
//! new game drops the previous session, with its pending timers.
//!
//! When the catalog or an image cannot be loaded, the launcher ends up in the
//! [`LaunchState::Failed`] state and [`Launcher::retry`] tries again.

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogSource};
use crate::error::LoadError;
use crate::grid::GridSize;
use crate::level::{self, LevelChoice, LevelPlan};
use crate::progress::{LevelProgress, ProgressStore};
use crate::scheduler::Clock;
use crate::session::{Outcome, PuzzleSession, SessionEvent};
use crate::settings::{Settings, SettingsProvider};
use crate::splitter::{self, TileSource};
use crate::tile::TileImage;
use crate::tile_set::{SourceImage, TileSet};

/// Where the launcher stands.
pub enum LaunchState {
    /// Nothing started yet.
    Idle,

    /// The last start failed. The player can retry.
    Failed(LoadError),

    /// A session is in progress (or finished, waiting for the next game).
    Playing(PuzzleSession),
}

/// Events from the session in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The hint went away.
    HintExpired,

    /// The session is over. `record` is the level progress kept after this result, when the
    /// result is tracked.
    Completed {
        outcome: Outcome,
        record: Option<LevelProgress>,
    },
}

/// Manage the sessions.
pub struct Launcher<C: Clock + Clone + 'static> {
    catalog_source: Box<dyn CatalogSource>,
    catalog: Option<Catalog>,
    tiles: Arc<dyn TileSource>,
    settings: Box<dyn SettingsProvider>,
    progress: Box<dyn ProgressStore>,
    grid: GridSize,
    choice: LevelChoice,
    state: LaunchState,
    clock: C,
    rng: StdRng,
}

impl<C: Clock + Clone + 'static> Launcher<C> {
    /// Create a [`Launcher`] object. Nothing is loaded until [`Launcher::start`].
    pub fn new(
        catalog_source: Box<dyn CatalogSource>,
        tiles: Arc<dyn TileSource>,
        settings: Box<dyn SettingsProvider>,
        progress: Box<dyn ProgressStore>,
        grid: GridSize,
        clock: C,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog_source,
            catalog: None,
            tiles,
            settings,
            progress,
            grid,
            choice: LevelChoice::Random,
            state: LaunchState::Idle,
            clock,
            rng,
        }
    }

    pub fn state(&self) -> &LaunchState {
        &self.state
    }

    /// The session in progress.
    pub fn session(&self) -> Option<&PuzzleSession> {
        match &self.state {
            LaunchState::Playing(s) => Some(s),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut PuzzleSession> {
        match &mut self.state {
            LaunchState::Playing(s) => Some(s),
            _ => None,
        }
    }

    /// The loading error, if the last start failed.
    pub fn error(&self) -> Option<&LoadError> {
        match &self.state {
            LaunchState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// The catalog, once loaded.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn settings(&self) -> Settings {
        self.settings.settings()
    }

    /// Change the settings. The session in progress keeps the settings it started with.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings.update(settings);
    }

    pub fn progress(&self) -> &dyn ProgressStore {
        self.progress.as_ref()
    }

    pub fn progress_mut(&mut self) -> &mut dyn ProgressStore {
        self.progress.as_mut()
    }

    /// Start a session for the given choice.
    pub fn start(&mut self, choice: LevelChoice) -> &LaunchState {
        self.choice = choice;
        self.initialize();
        &self.state
    }

    /// Try again after a failure: reload the catalog if it is missing, then start the session.
    pub fn retry(&mut self) -> &LaunchState {
        debug!("Retrying {:?}", self.choice);
        self.initialize();
        &self.state
    }

    /// Replace the session in progress with a new one for the same choice.
    pub fn new_game(&mut self) -> &LaunchState {
        self.initialize();
        &self.state
    }

    /// Start the level after the current one. Return false if there is none.
    pub fn next_level(&mut self) -> bool {
        let Some(level) = self.session().and_then(PuzzleSession::level) else {
            return false;
        };
        let Some(next) = self.catalog.as_ref().and_then(|c| level::next_level(c, level)) else {
            return false;
        };
        self.start(LevelChoice::Level(next));
        true
    }

    /// Advance the session in progress, and record the level progress when it finishes.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events: Vec<SessionEvent> = match &mut self.state {
            LaunchState::Playing(session) => session.tick(),
            _ => return Vec::new(),
        };
        events
            .into_iter()
            .map(|event| match event {
                SessionEvent::HintExpired => GameEvent::HintExpired,
                SessionEvent::Finished(outcome) => GameEvent::Completed {
                    outcome,
                    record: self.record(&outcome),
                },
            })
            .collect()
    }

    /// Save the result of a tracked session.
    fn record(&mut self, outcome: &Outcome) -> Option<LevelProgress> {
        if !outcome.tracked {
            return None;
        }
        let level: u32 = outcome.level?;
        Some(self.progress.upsert(level, outcome.elapsed_secs))
    }

    fn initialize(&mut self) {
        // Drop the previous session and its timers first
        self.state = LaunchState::Idle;
        self.state = match self.build_session() {
            Ok(session) => LaunchState::Playing(session),
            Err(error) => {
                warn!("Cannot start the game: {error}");
                LaunchState::Failed(error)
            }
        };
    }

    fn build_session(&mut self) -> Result<PuzzleSession, LoadError> {
        if self.catalog.is_none() {
            self.catalog = Some(self.catalog_source.load()?);
        }
        let catalog: &Catalog = self.catalog.as_ref().ok_or(LoadError::EmptyManifest)?;
        let plan: LevelPlan = level::plan(catalog, self.choice, &mut self.rng);
        let settings: Settings = self.settings.settings();

        let pieces: Vec<Vec<TileImage>> =
            splitter::split_all(&self.tiles, &plan.images, self.grid)?;
        let mut sets: Vec<TileSet> = Vec::with_capacity(pieces.len());
        for (index, (image, images)) in plan.images.iter().zip(pieces).enumerate() {
            let source = SourceImage {
                name: image.name.clone(),
                location: image.path.display().to_string(),
            };
            let found: usize = images.len();
            let set: TileSet =
                TileSet::new(index, self.grid, source, images).ok_or_else(|| LoadError::TileCount {
                    name: image.name.clone(),
                    expected: self.grid.len(),
                    found,
                })?;
            sets.push(set);
        }

        PuzzleSession::new(
            plan.level,
            settings,
            sets,
            Box::new(self.clock.clone()),
            StdRng::from_rng(&mut self.rng),
        )
        .ok_or(LoadError::EmptyManifest)
    }
}
