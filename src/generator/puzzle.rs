/*
puzzle.rs

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

//! Puzzle representation, verification, and grading.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use super::digits::Digits;
use super::feedback::{CLUE_CATEGORIES, Category, Feedback, evaluate};

/// Number of clues in a puzzle.
pub const NUM_CLUES: usize = CLUE_CATEGORIES.len();

/// Type of errors returned by [`Puzzle::verify`].
#[derive(Debug, PartialEq)]
pub enum PuzzleError {
    /// The solution contains the same digit more than once.
    RepeatedDigit(Digits),

    /// The puzzle does not have [`NUM_CLUES`] clues.
    ClueCount(usize),

    /// The hint of a clue does not describe the clue's feedback.
    WrongHint {
        /// Clue number, starting at 1.
        clue: usize,
        expected: String,
        actual: String,
    },

    /// The clue is valid but does not have the category expected at its position.
    WrongCategory {
        /// Clue number, starting at 1.
        clue: usize,
        expected: Category,
        feedback: Feedback,
    },

    /// The first two clues are identical.
    DuplicateClue,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::RepeatedDigit(s) => write!(f, "solution {s} repeats a digit"),
            PuzzleError::ClueCount(n) => write!(f, "expected {NUM_CLUES} clues, got {n}"),
            PuzzleError::WrongHint {
                clue,
                expected,
                actual,
            } => write!(f, "clue {clue}: hint is \"{actual}\", expected \"{expected}\""),
            PuzzleError::WrongCategory {
                clue,
                expected,
                feedback,
            } => write!(f, "clue {clue}: expected category {expected}, got {feedback}"),
            PuzzleError::DuplicateClue => write!(f, "clues 1 and 2 are identical"),
        }
    }
}

impl Error for PuzzleError {}

/// A clue: a digit sequence and the hint displayed next to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub numbers: Digits,
    pub hint: String,
}

impl Clue {
    /// Create a clue with the canonical hint of the category.
    pub fn new(numbers: Digits, category: Category) -> Self {
        Self {
            numbers,
            hint: category.hint().to_string(),
        }
    }
}

/// Solution and clues, created together and never modified afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub solution: Digits,
    pub clues: Vec<Clue>,
}

impl Puzzle {
    /// Verify that the puzzle is logically sound.
    ///
    /// Each clue is scored against the solution and its hint is compared with the description of
    /// that score. Clues must also follow the category order used by the generator.
    pub fn verify(&self) -> Result<(), PuzzleError> {
        if !self.solution.is_distinct() {
            return Err(PuzzleError::RepeatedDigit(self.solution));
        }
        if self.clues.len() != NUM_CLUES {
            return Err(PuzzleError::ClueCount(self.clues.len()));
        }

        for (i, (clue, expected)) in self.clues.iter().zip(CLUE_CATEGORIES).enumerate() {
            let feedback: Feedback = evaluate(&clue.numbers, &self.solution);
            debug!(
                "Clue {}: {} \"{}\" -> {feedback}",
                i + 1,
                clue.numbers,
                clue.hint
            );
            let description: String = feedback.describe();
            if description != clue.hint {
                return Err(PuzzleError::WrongHint {
                    clue: i + 1,
                    expected: description,
                    actual: clue.hint.clone(),
                });
            }
            if feedback != expected.feedback() {
                return Err(PuzzleError::WrongCategory {
                    clue: i + 1,
                    expected,
                    feedback,
                });
            }
        }

        if self.clues[0].numbers == self.clues[1].numbers {
            return Err(PuzzleError::DuplicateClue);
        }
        Ok(())
    }
}

/// Whether the submitted answer is the solution, digit by digit and in order.
pub fn grade(answer: &Digits, solution: &Digits) -> bool {
    answer == solution
}
