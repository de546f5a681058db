/*
error.rs

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

//! Errors that prevent a session from starting.
//!
//! Player input never produces errors: invalid moves are ignored. Only loading the catalog or the
//! puzzle images can fail, and the player can retry.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Type of loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The manifest file cannot be read or parsed.
    Manifest { path: PathBuf, reason: String },

    /// The manifest lists no image.
    EmptyManifest,

    /// An image cannot be read or decoded.
    Image { name: String, reason: String },

    /// The image was not split in the expected number of tiles.
    TileCount {
        name: String,
        expected: usize,
        found: usize,
    },

    /// The worker splitting an image stopped without answering.
    WorkerLost { name: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Manifest { path, reason } => {
                write!(f, "cannot load the puzzle collection {path:?}: {reason}")
            }
            LoadError::EmptyManifest => write!(f, "no puzzle images available"),
            LoadError::Image { name, reason } => write!(f, "cannot load image {name}: {reason}"),
            LoadError::TileCount {
                name,
                expected,
                found,
            } => write!(f, "image {name} gave {found} tiles instead of {expected}"),
            LoadError::WorkerLost { name } => {
                write!(f, "the worker splitting image {name} stopped")
            }
        }
    }
}

impl Error for LoadError {}
