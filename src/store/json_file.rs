/*
json_file.rs

Copyright 2025 Hervé Quatremain

This file is part of Booth Puzzle.

Booth Puzzle is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Booth Puzzle is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Booth Puzzle. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Key-value store saved in a JSON file.
//!
//! All the entries are loaded when the store is opened and the whole file is rewritten after each
//! change. The file is a JSON object that maps keys to the stored JSON documents.
//!
//! A change is written to a temporary file that then replaces the store file, and the in-memory
//! entries are only updated once that succeeded. A failed write leaves both the file and the
//! entries as they were.

use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::config::STORE_FILE;

/// Store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Absolute path to the store file.
    save_file: PathBuf,

    /// Entries loaded from the file.
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store in the given data directory.
    ///
    /// The directory is created if it does not exist. A missing store file is an empty store.
    pub fn open(data_dir: &Path) -> Result<Self, Box<dyn Error>> {
        fs::create_dir_all(data_dir)?;
        let save_file: PathBuf = data_dir.join(STORE_FILE);
        debug!("Store file: {save_file:?}");

        let entries: BTreeMap<String, String> = match File::open(&save_file) {
            Ok(f) => serde_json::from_reader(BufReader::new(f))?,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => BTreeMap::new(),
                _ => return Err(Box::new(error)),
            },
        };
        debug!("{} entries loaded", entries.len());
        Ok(Self { save_file, entries })
    }

    /// Path to the store file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Path to the temporary file used while saving.
    fn tmp_file(&self) -> PathBuf {
        self.save_file.with_extension("json.tmp")
    }

    /// Write the given entries to the store file.
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), Box<dyn Error>> {
        let tmp_file: PathBuf = self.tmp_file();
        let file: File = File::create(&tmp_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(&tmp_file, &self.save_file)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), Box<dyn Error>> {
        let mut entries: BTreeMap<String, String> = self.entries.clone();
        entries.insert(key.to_string(), value);
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries: BTreeMap<String, String> = self.entries.clone();
        entries.remove(key);
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            store.put("conference:a", "{}".to_string()).unwrap();
            store.put("display-mode:a", "winner".to_string()).unwrap();
            store.delete("display-mode:a").unwrap();
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("conference:a").unwrap(), Some("{}".to_string()));
        assert_eq!(store.get("display-mode:a").unwrap(), None);
        assert_eq!(store.list("conference:").unwrap(), vec!["conference:a"]);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let store = JsonFileStore::open(&data_dir).unwrap();
        assert!(data_dir.is_dir());
        assert!(store.list("").unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_replaces_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.put("conference:a", "{}".to_string()).unwrap();
        store.put("conference:b", "{}".to_string()).unwrap();
        assert!(store.path().is_file());
        assert!(!store.tmp_file().exists());
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn failed_save_keeps_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let mut store = JsonFileStore::open(&data_dir).unwrap();
        store.put("conference:a", "old".to_string()).unwrap();

        fs::remove_dir_all(&data_dir).unwrap();
        assert!(store.put("conference:a", "new".to_string()).is_err());
        assert!(store.put("conference:b", "{}".to_string()).is_err());
        assert!(store.delete("conference:a").is_err());

        assert_eq!(store.get("conference:a").unwrap(), Some("old".to_string()));
        assert_eq!(store.get("conference:b").unwrap(), None);
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "not json").unwrap();
        assert!(JsonFileStore::open(dir.path()).is_err());
    }
}
