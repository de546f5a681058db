/*
settings.rs

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

//! Player settings.
//!
//! The settings are read when a session starts. Changing them does not affect a session in
//! progress.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::saver::{JsonFormat, JsonSaver};

/// Name of the settings file in the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Player settings.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Whether the game is timed. Progress is only recorded for timed games.
    pub play_with_time: bool,

    /// Whether the player can ask for hints.
    pub show_hints: bool,

    /// Whether sounds are disabled.
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_with_time: true,
            show_hints: true,
            muted: false,
        }
    }
}

/// Source of the settings.
pub trait SettingsProvider {
    /// Return the current settings.
    fn settings(&self) -> Settings;

    /// Replace the settings.
    fn update(&mut self, settings: Settings);
}

/// Settings kept in memory only.
#[derive(Debug, Default)]
pub struct MemorySettings(Settings);

impl MemorySettings {
    /// Create a [`MemorySettings`] object.
    pub fn new(settings: Settings) -> Self {
        Self(settings)
    }
}

impl SettingsProvider for MemorySettings {
    fn settings(&self) -> Settings {
        self.0
    }

    fn update(&mut self, settings: Settings) {
        self.0 = settings;
    }
}

/// Settings persisted in the data directory.
///
/// Read or write failures are logged, and the in-memory value is used.
pub struct FileSettings {
    saver: JsonSaver<Settings>,
    current: Settings,
}

impl FileSettings {
    /// Create a [`FileSettings`] object and load the saved settings.
    pub fn new(data_dir: &Path) -> Self {
        let saver: JsonSaver<Settings> =
            JsonSaver::new(data_dir, SETTINGS_FILE, JsonFormat::Pretty);
        let current: Settings = match saver.load() {
            Ok(Some(s)) => {
                debug!("Settings = {s:?}");
                s
            }
            Ok(None) => Settings::default(),
            Err(error) => {
                warn!("Error reading the settings, using defaults: {error}");
                Settings::default()
            }
        };
        Self { saver, current }
    }
}

impl SettingsProvider for FileSettings {
    fn settings(&self) -> Settings {
        self.current
    }

    fn update(&mut self, settings: Settings) {
        self.current = settings;
        if let Err(error) = self.saver.save(&settings) {
            warn!("Error saving the settings: {error}");
        }
    }
}
