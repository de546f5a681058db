/*
saver.rs

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

//! Save and restore the player data in the data directory.
//!
//! Each object is serialized in JSON format by using [`serde`] into its own file, through a
//! [`JsonSaver`] object. A missing file is not an error: [`JsonSaver::load`] returns None and
//! the caller uses default values.
//!
//! The file is written to a temporary file first, and then renamed, so that an interrupted
//! save never leaves a truncated file behind.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Layout of the JSON file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JsonFormat {
    /// Single line.
    Compact,

    /// Indented, for files that the player may edit.
    Pretty,
}

/// Object to save and restore a `T` object in a JSON file.
#[derive(Debug)]
pub struct JsonSaver<T> {
    /// Absolute path to the save file.
    save_file: PathBuf,

    format: JsonFormat,
    saved: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonSaver<T> {
    /// Create a [`JsonSaver`] object for the `file_name` file in `data_dir`.
    pub fn new(data_dir: &Path, file_name: &str, format: JsonFormat) -> Self {
        let save_file: PathBuf = data_dir.join(file_name);
        debug!("Save file: {save_file:?}");
        Self {
            save_file,
            format,
            saved: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the object from the save file.
    ///
    /// Return None if the file does not exist.
    pub fn load(&self) -> Result<Option<T>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Box::new(error)),
        };
        let value: T = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Save the provided object.
    pub fn save(&self, value: &T) -> Result<(), Box<dyn Error>> {
        let tmp_file: PathBuf = self.save_file.with_extension("json.tmp");
        {
            let mut writer: BufWriter<File> = BufWriter::new(File::create(&tmp_file)?);
            match self.format {
                JsonFormat::Compact => serde_json::to_writer(&mut writer, value)?,
                JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
            }
            writer.flush()?;
        }
        fs::rename(&tmp_file, &self.save_file)?;
        Ok(())
    }

    /// Delete the save file.
    pub fn delete(&self) {
        match fs::remove_file(&self.save_file) {
            Ok(()) => debug!("Deleted {:?}", self.save_file),
            Err(error) if error.kind() == ErrorKind::NotFound => (),
            Err(error) => debug!("Cannot delete {:?}: {error}", self.save_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("jigswap-saver-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("cannot create the temporary directory");
        dir
    }

    fn sample() -> Sample {
        Sample {
            name: "harbor".to_string(),
            count: 3,
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = temp_dir("missing");
        let saver: JsonSaver<Sample> = JsonSaver::new(&dir, "sample.json", JsonFormat::Compact);
        assert!(matches!(saver.load(), Ok(None)));
        saver.delete();
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn saved_object_is_loaded_back() {
        let dir = temp_dir("saved");
        let saver: JsonSaver<Sample> = JsonSaver::new(&dir, "sample.json", JsonFormat::Compact);
        saver.save(&sample()).expect("the directory is writable");
        assert_eq!(saver.load().ok().flatten(), Some(sample()));
        assert!(!dir.join("sample.json.tmp").exists());

        saver.delete();
        assert!(!saver.path().exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn pretty_format_is_indented() {
        let dir = temp_dir("pretty");
        let saver: JsonSaver<Sample> = JsonSaver::new(&dir, "sample.json", JsonFormat::Pretty);
        saver.save(&sample()).expect("the directory is writable");
        let text = fs::read_to_string(saver.path()).expect("the file exists");
        assert!(text.contains("\n  \"name\": \"harbor\""));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        fs::write(dir.join("sample.json"), "[1, 2").expect("cannot write the test file");
        let saver: JsonSaver<Sample> = JsonSaver::new(&dir, "sample.json", JsonFormat::Compact);
        assert!(saver.load().is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_directory_fails_to_save() {
        let dir = temp_dir("nodir").join("does-not-exist");
        let saver: JsonSaver<Sample> = JsonSaver::new(&dir, "sample.json", JsonFormat::Compact);
        assert!(saver.save(&sample()).is_err());
    }
}
