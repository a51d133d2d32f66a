/*
config.rs

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

//! Build-time settings.

/// Package name.
pub const PKGNAME: &str = env!("CARGO_PKG_NAME");

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text displayed by `--version` in long form.
pub const COPYRIGHT_NOTICE: &str = "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Number of constructions tried for a single clue before giving up.
pub const MAX_CLUE_ATTEMPTS: usize = 1000;

/// Name of the file that the file-backed store writes in the data directory.
pub const STORE_FILE: &str = "booth-store.json";

/// Default data directory, relative to the current directory.
pub const DEFAULT_DATA_DIR: &str = ".booth-puzzle";

/// Key prefixes in the key-value store.
pub const CONFERENCE_PREFIX: &str = "conference:";
pub const SUBMISSION_PREFIX: &str = "submission:";
pub const DISPLAY_MODE_PREFIX: &str = "display-mode:";
