/*
catalog.rs

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

//! Puzzle image catalog.
//!
//! The images live in a directory that also contains `manifest.json`, a JSON array of image file
//! names. The catalog order is the sorted file names, and level `n` uses image `n - 1`.

use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Name of the manifest file in the image directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One puzzle image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogImage {
    /// File name as listed in the manifest.
    pub file_name: String,

    /// Display name.
    pub name: String,

    /// Location of the image file.
    pub path: PathBuf,
}

/// Sorted list of the puzzle images.
#[derive(Debug, Clone)]
pub struct Catalog {
    images: Vec<CatalogImage>,
}

impl Catalog {
    /// Build a catalog from image file names located in `dir`.
    pub fn from_files(dir: &Path, mut file_names: Vec<String>) -> Result<Self, LoadError> {
        file_names.retain(|f| !f.trim().is_empty());
        if file_names.is_empty() {
            return Err(LoadError::EmptyManifest);
        }
        file_names.sort();
        let images: Vec<CatalogImage> = file_names
            .into_iter()
            .map(|file_name| CatalogImage {
                name: format_image_name(&file_name),
                path: dir.join(&file_name),
                file_name,
            })
            .collect();
        Ok(Self { images })
    }

    pub fn images(&self) -> &[CatalogImage] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&CatalogImage> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Source of the catalog. Loading may fail and be retried.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, LoadError>;
}

/// Catalog described by the `manifest.json` file of an image directory.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    dir: PathBuf,
}

impl ManifestFile {
    /// Create a [`ManifestFile`] object for the images in `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl CatalogSource for ManifestFile {
    fn load(&self) -> Result<Catalog, LoadError> {
        let path: PathBuf = self.dir.join(MANIFEST_FILE);
        debug!("Loading the manifest {path:?}");
        let manifest_error = |reason: String| LoadError::Manifest {
            path: path.clone(),
            reason,
        };
        let file: File = File::open(&path).map_err(|e| manifest_error(e.to_string()))?;
        let file_names: Vec<String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| manifest_error(e.to_string()))?;
        Catalog::from_files(&self.dir, file_names)
    }
}

/// Derive a display name from an image file name.
///
/// `"sunset_lake-02.jpg"` becomes `"Sunset Lake 02"`.
pub fn format_image_name(file_name: &str) -> String {
    let stem: &str = match file_name.rfind('.') {
        Some(i) if i > 0 => &file_name[..i],
        _ => file_name,
    };
    let words: Vec<String> = stem
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        return "Puzzle Image".to_string();
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn display_names() {
        assert_eq!(format_image_name("sunset_lake-02.jpg"), "Sunset Lake 02");
        assert_eq!(format_image_name("mountains.png"), "Mountains");
        assert_eq!(format_image_name("__.png"), "Puzzle Image");
        assert_eq!(format_image_name("old  town"), "Old Town");
    }

    #[test]
    fn catalog_is_sorted() {
        let catalog = Catalog::from_files(
            Path::new("/images"),
            vec!["c.png".to_string(), "a.png".to_string(), "b.png".to_string()],
        )
        .expect("the list is not empty");
        let names: Vec<&str> = catalog.images().iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
        assert_eq!(catalog.get(1).map(|i| i.path.clone()), Some(PathBuf::from("/images/b.png")));
    }

    #[test]
    fn empty_manifest_is_an_error() {
        assert_eq!(
            Catalog::from_files(Path::new("."), Vec::new()).err(),
            Some(LoadError::EmptyManifest)
        );
    }

    #[test]
    fn manifest_file_is_read() {
        let dir = std::env::temp_dir().join(format!("jigswap-manifest-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("cannot create the temporary directory");

        let source = ManifestFile::new(dir.clone());
        assert!(matches!(source.load(), Err(LoadError::Manifest { .. })));

        fs::write(dir.join(MANIFEST_FILE), r#"["b.png", "a.png"]"#)
            .expect("cannot write the manifest");
        let catalog = source.load().expect("the manifest is valid");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).map(|i| i.name.as_str()), Some("A"));

        fs::write(dir.join(MANIFEST_FILE), r#"{"images": 1}"#).expect("cannot write the manifest");
        assert!(matches!(source.load(), Err(LoadError::Manifest { .. })));
        let _ = fs::remove_dir_all(dir);
    }
}
