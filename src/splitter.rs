/*
splitter.rs

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

//! Cut puzzle images into tiles.
//!
//! Decoding and cropping an image takes a while, so each image is split in a worker thread. The
//! result comes back through an [`async_channel`] receiver that the caller awaits.

use image::DynamicImage;
use image::GenericImageView;
use log::debug;
use std::sync::Arc;
use std::thread;

use crate::catalog::CatalogImage;
use crate::error::LoadError;
use crate::grid::GridSize;
use crate::tile::TileImage;

/// Result of splitting one image.
pub type SplitResult = Result<Vec<TileImage>, LoadError>;

/// Provider of tile images.
pub trait TileSource: Send + Sync {
    /// Return the tiles of `image`, in row-major order.
    fn split(&self, image: &CatalogImage, grid: GridSize) -> SplitResult;
}

/// Split image files from the disk into equal rectangles.
///
/// Pixels that do not fit in a whole tile (on the right and bottom edges) are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageSplitter;

impl TileSource for ImageSplitter {
    fn split(&self, image: &CatalogImage, grid: GridSize) -> SplitResult {
        let decoded: DynamicImage = image::open(&image.path).map_err(|e| LoadError::Image {
            name: image.name.clone(),
            reason: e.to_string(),
        })?;
        crop_tiles(&decoded, &image.name, grid)
    }
}

/// Crop `source` into `grid.rows * grid.cols` tiles.
pub fn crop_tiles(source: &DynamicImage, name: &str, grid: GridSize) -> SplitResult {
    let (width, height) = source.dimensions();
    let cols = u32::try_from(grid.cols).unwrap_or(u32::MAX);
    let rows = u32::try_from(grid.rows).unwrap_or(u32::MAX);
    if grid.is_empty() || width < cols || height < rows {
        return Err(LoadError::Image {
            name: name.to_string(),
            reason: format!("{width}x{height} is too small for a {rows}x{cols} grid"),
        });
    }
    let tile_width: u32 = width / cols;
    let tile_height: u32 = height / rows;
    debug!(
        "Splitting {name} ({width}x{height}) into {rows}x{cols} tiles of {tile_width}x{tile_height}"
    );

    let mut tiles: Vec<TileImage> = Vec::with_capacity(grid.len());
    for row in 0..rows {
        for col in 0..cols {
            let piece = source
                .crop_imm(col * tile_width, row * tile_height, tile_width, tile_height)
                .to_rgba8();
            let index: u32 = row * cols + col;
            tiles.push(TileImage::new(format!("{name} #{}", index + 1), piece));
        }
    }
    Ok(tiles)
}

/// Split `image` in a worker thread.
pub fn spawn_split(
    source: Arc<dyn TileSource>,
    image: CatalogImage,
    grid: GridSize,
) -> async_channel::Receiver<SplitResult> {
    let (sender, receiver) = async_channel::bounded::<SplitResult>(1);
    thread::spawn(move || {
        let result: SplitResult = source.split(&image, grid);
        // The receiver is gone when the session was abandoned in the meantime
        let _ = sender.send_blocking(result);
    });
    receiver
}

/// Split all the images concurrently and wait for the results, in order.
///
/// Fail on the first image that cannot be split or that gives the wrong number of tiles.
pub fn split_all(
    source: &Arc<dyn TileSource>,
    images: &[CatalogImage],
    grid: GridSize,
) -> Result<Vec<Vec<TileImage>>, LoadError> {
    let receivers: Vec<(String, async_channel::Receiver<SplitResult>)> = images
        .iter()
        .map(|image| {
            (
                image.name.clone(),
                spawn_split(Arc::clone(source), image.clone(), grid),
            )
        })
        .collect();

    let mut ret: Vec<Vec<TileImage>> = Vec::with_capacity(images.len());
    for (name, receiver) in receivers {
        let tiles: Vec<TileImage> = receiver
            .recv_blocking()
            .map_err(|_| LoadError::WorkerLost { name: name.clone() })??;
        if tiles.len() != grid.len() {
            return Err(LoadError::TileCount {
                name,
                expected: grid.len(),
                found: tiles.len(),
            });
        }
        ret.push(tiles);
    }
    Ok(ret)
}
