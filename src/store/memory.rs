/*
memory.rs

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

//! In-memory key-value store.

use std::collections::BTreeMap;
use std::error::Error;

use super::KeyValueStore;

/// Store that keeps the entries in a [`BTreeMap`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty [`MemoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), Box<dyn Error>> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.entries.remove(key);
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self
            .entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_by_prefix() {
        let mut store = MemoryStore::new();
        store.put("conference:b", "2".to_string()).unwrap();
        store.put("conference:a", "1".to_string()).unwrap();
        store.put("submission:x", "3".to_string()).unwrap();
        store.put("conferencz", "4".to_string()).unwrap();

        assert_eq!(
            store.list("conference:").unwrap(),
            vec!["conference:a", "conference:b"]
        );
        assert_eq!(store.list("").unwrap().len(), 4);
        assert!(store.list("display-mode:").unwrap().is_empty());
    }

    #[test]
    fn put_get_delete() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.put("k", "v1".to_string()).unwrap();
        store.put("k", "v2".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(store.is_empty());
    }
}
