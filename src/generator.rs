/*
generator.rs

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

//! Generate, score, and grade booth puzzles.
//!
//! A puzzle is represented by a [`puzzle::Puzzle`] object: a solution of three distinct digits
//! and five clues.
//! Each clue is a three-digit sequence with a hint that tells how the sequence compares with the
//! solution.
//! The comparison is computed by [`feedback::evaluate`], and the possible hints are the ones of
//! the [`feedback::Category`] enumeration.
//!
//! To create a puzzle, use [`generate`], or create a [`random_puzzle::RandomPuzzle`] object and
//! use its [`random_puzzle::RandomPuzzle::generate`] method when you need to provide the random
//! generator or to change the retry limit.
//! If a clue cannot be built within the retry limit, then the method returns an error and no
//! puzzle is produced.
//!
//! To check an answer, use [`puzzle::grade`]. Grading is a strict comparison: the three digits
//! must be in the right order.

pub mod digits;
pub mod feedback;
pub mod puzzle;
pub mod random_puzzle;

/// Generate a puzzle with the thread-local random generator.
pub fn generate() -> Result<puzzle::Puzzle, random_puzzle::GenerationError> {
    random_puzzle::RandomPuzzle::new().generate()
}
