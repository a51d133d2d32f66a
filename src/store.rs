/*
store.rs

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

//! Key-value storage of conferences and submissions.
//!
//! The contest logic only needs four operations from its storage: get, put, delete, and list by
//! key prefix. Values are JSON documents.
//!
//! Two implementations are provided:
//!
//! * [`memory::MemoryStore`] keeps everything in memory. Used by the tests and for one-shot runs.
//! * [`json_file::JsonFileStore`] keeps everything in a single JSON file in a data directory, and
//!   rewrites that file after every change. Used by the command-line tool.

pub mod json_file;
pub mod memory;

use std::error::Error;

/// Storage operations required by [`crate::contest::Contest`].
pub trait KeyValueStore {
    /// Return the value stored under the key, or None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;

    /// Store the value under the key, replacing any previous value.
    fn put(&mut self, key: &str, value: String) -> Result<(), Box<dyn Error>>;

    /// Remove the key. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), Box<dyn Error>>;

    /// Return the keys that start with the prefix, in lexicographic order.
    fn list(&self, prefix: &str) -> Result<Vec<String>, Box<dyn Error>>;
}
