/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without any listing option, Jigswap starts a game in the terminal.
//!
//! # Examples
//!
//! Play the third level with the images from the `pictures` directory:
//!
//! ```
//! $ jigswap --images pictures --level 3
//! ```
//!
//! List the puzzle images:
//!
//! ```
//! $ jigswap --images pictures --ls
//!   1 Autumn Forest
//!   2 Harbor
//!   3 Old Town
//! ```
//!
//! Show the level progress:
//!
//! ```
//! $ jigswap --progress
//! Level   Stars   Best    Completed
//!     1   ***     0:08    2025-06-02 18:21
//!     3   **.     0:17    2025-06-03 09:02
//! ```

use chrono::{DateTime, Local};
use clap::Parser;
use log::{debug, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use jigswap::catalog::{CatalogSource, ManifestFile};
use jigswap::grid::GridSize;
use jigswap::level::LevelChoice;
use jigswap::progress::{FileProgressStore, LevelProgress, ProgressBook, ProgressStore};
use jigswap::scoring;
use jigswap::settings::{FileSettings, MemorySettings, Settings, SettingsProvider};

const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\nLicense GPL-3.0-or-later"
);

/// Name of the directory that stores the settings and the progress.
const DATA_DIR_NAME: &str = "jigswap";

/// Swap tiles until the picture is whole again.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the puzzle images
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Show the best time and stars for each completed level
    #[arg(short, long, default_value_t = false)]
    progress: bool,

    /// Delete the level progress
    #[arg(long, default_value_t = false)]
    clear_progress: bool,

    /// Level to play. A random image is used when not set
    #[arg(short = 'L', long)]
    level: Option<u32>,

    /// Directory with the images and their manifest.json file
    #[arg(short, long, default_value = "images")]
    images: PathBuf,

    /// Number of rows and columns
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=8))]
    grid: u8,

    /// Directory for the settings and the progress files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Time the game and record the level progress
    #[arg(long)]
    play_with_time: Option<bool>,

    /// Allow hints
    #[arg(long)]
    show_hints: Option<bool>,

    /// Do not ring the bell when a level is complete
    #[arg(long)]
    muted: Option<bool>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// What the player asked to play.
pub struct PlayOptions {
    pub choice: LevelChoice,
    pub images: PathBuf,
    pub grid: GridSize,

    /// Settings, with the command-line values applied.
    pub settings: Box<dyn SettingsProvider>,

    pub progress: Box<dyn ProgressStore>,
}

/// Result of the command-line processing.
pub enum Command {
    /// Nothing more to do, exit with the given code.
    Exit(u8),

    /// Start a game.
    Play(PlayOptions),
}

/// Parse and process command-line options.
pub fn parse() -> Command {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let data_dir: Option<PathBuf> = data_dir(args.data_dir.clone());

    //
    // Store the settings given on the command line
    //
    let mut settings: Box<dyn SettingsProvider> = settings_provider(data_dir.as_deref());
    apply_settings(
        settings.as_mut(),
        args.play_with_time,
        args.show_hints,
        args.muted,
    );

    //
    // List the images
    //
    if args.ls {
        return match ManifestFile::new(args.images.clone()).load() {
            Ok(catalog) => {
                for (i, image) in catalog.images().iter().enumerate() {
                    println!("{:3} {}", i + 1, image.name);
                }
                Command::Exit(0)
            }
            Err(e) => {
                eprintln!("{e}");
                Command::Exit(1)
            }
        };
    }

    //
    // Level progress
    //
    let mut progress: Box<dyn ProgressStore> = progress_store(data_dir.as_deref());
    if args.clear_progress {
        progress.clear();
        println!("Level progress deleted");
        if !args.progress {
            return Command::Exit(0);
        }
    }
    if args.progress {
        print_progress(&progress.all());
        return Command::Exit(0);
    }

    let side: usize = usize::from(args.grid);
    Command::Play(PlayOptions {
        choice: args.level.map_or(LevelChoice::Random, LevelChoice::Level),
        images: args.images,
        grid: GridSize::square(side),
        settings,
        progress,
    })
}

/// Return the data directory, and create it if needed.
///
/// Return None if there is no platform data directory and none was given.
fn data_dir(from_args: Option<PathBuf>) -> Option<PathBuf> {
    let dir: Option<PathBuf> =
        from_args.or_else(|| dirs_next::data_dir().map(|d| d.join(DATA_DIR_NAME)));
    let dir: PathBuf = match dir {
        Some(d) => d,
        None => {
            warn!("No data directory: the settings and the progress are not saved");
            return None;
        }
    };
    debug!("Data directory: {dir:?}");
    if let Err(e) = fs::create_dir_all(&dir) {
        // The savers report their own errors
        warn!("Cannot create {dir:?}: {e}");
    }
    Some(dir)
}

/// Settings from the data directory, or kept in memory without one.
fn settings_provider(data_dir: Option<&Path>) -> Box<dyn SettingsProvider> {
    match data_dir {
        Some(dir) => Box::new(FileSettings::new(dir)),
        None => Box::new(MemorySettings::default()),
    }
}

/// Level progress from the data directory, or kept in memory without one.
fn progress_store(data_dir: Option<&Path>) -> Box<dyn ProgressStore> {
    match data_dir {
        Some(dir) => Box::new(FileProgressStore::new(dir)),
        None => Box::new(ProgressBook::new()),
    }
}

/// Override the settings with the values given on the command line.
fn apply_settings(
    provider: &mut dyn SettingsProvider,
    play_with_time: Option<bool>,
    show_hints: Option<bool>,
    muted: Option<bool>,
) {
    if play_with_time.is_none() && show_hints.is_none() && muted.is_none() {
        return;
    }
    let current: Settings = provider.settings();
    let settings = Settings {
        play_with_time: play_with_time.unwrap_or(current.play_with_time),
        show_hints: show_hints.unwrap_or(current.show_hints),
        muted: muted.unwrap_or(current.muted),
    };
    debug!("Settings: {settings:?}");
    provider.update(settings);
}

fn print_progress(levels: &[LevelProgress]) {
    if levels.is_empty() {
        println!("No level completed yet");
        return;
    }
    println!("Level   Stars   Best    Completed");
    for p in levels {
        let when: DateTime<Local> = DateTime::from(p.when);
        println!(
            "{:5}   {}     {:<7} {}",
            p.level,
            p.stars,
            scoring::format_time(p.best_time),
            when.format("%Y-%m-%d %H:%M")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("jigswap-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn without_data_dir_everything_stays_in_memory() {
        let mut settings = settings_provider(None);
        assert_eq!(settings.settings(), Settings::default());
        apply_settings(settings.as_mut(), Some(false), None, Some(true));
        assert_eq!(
            settings.settings(),
            Settings {
                play_with_time: false,
                show_hints: true,
                muted: true,
            }
        );

        let mut progress = progress_store(None);
        assert!(progress.all().is_empty());
        assert_eq!(progress.upsert(2, 8).best_time, 8);
        assert_eq!(progress.get(2).map(|p| p.level), Some(2));
    }

    #[test]
    fn data_dir_is_created_and_used() {
        let dir = temp_dir("data");
        let created = data_dir(Some(dir.clone())).expect("the directory is given");
        assert!(created.is_dir());

        let mut settings = settings_provider(Some(&created));
        apply_settings(settings.as_mut(), None, Some(false), None);
        assert!(!settings_provider(Some(&created)).settings().show_hints);

        progress_store(Some(&created)).upsert(1, 40);
        assert_eq!(progress_store(Some(&created)).all().len(), 1);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn no_flags_leave_settings_alone() {
        let mut settings = settings_provider(None);
        apply_settings(settings.as_mut(), None, None, None);
        assert_eq!(settings.settings(), Settings::default());
    }
}
