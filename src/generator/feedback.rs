/*
feedback.rs

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

//! Score a digit sequence against the solution and map the score to a clue category.
//!
//! The scoring follows the Mastermind peg rule: a digit at the right position counts as exact,
//! and each remaining solution digit can justify at most one misplaced digit in the candidate.
//!
//! [`Category`] is the only place where the clue hints are written down. The generator, the
//! puzzle verification, and the tests all go through [`Category::hint`] and
//! [`Category::classify`].

use std::fmt;
use strum_macros::FromRepr;

use super::digits::{Digits, MAX_DIGIT, NUM_DIGITS};

/// Result of comparing a candidate sequence with the solution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    /// Digits correct in value and position.
    pub exact: usize,

    /// Digits correct in value but at another position.
    pub misplaced: usize,
}

impl Feedback {
    pub const fn new(exact: usize, misplaced: usize) -> Self {
        Self { exact, misplaced }
    }

    /// Return a readable description of the feedback.
    ///
    /// The canonical hint is returned when the feedback belongs to one of the clue categories.
    pub fn describe(&self) -> String {
        match Category::classify(*self) {
            Some(c) => c.hint().to_string(),
            None => match (self.exact, self.misplaced) {
                (1, 0) => "One number is correct and well placed".to_string(),
                (1, 1) => "One number is correct and well placed, one number is correct but wrongly placed".to_string(),
                (e, m) => format!("{e} well placed, {m} wrong place"),
            },
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} exact, {} misplaced", self.exact, self.misplaced)
    }
}

/// Compare the candidate with the solution.
pub fn evaluate(candidate: &Digits, solution: &Digits) -> Feedback {
    let mut exact: usize = 0;
    let mut misplaced: usize = 0;

    // Solution digits still available for misplaced matches
    let mut unmatched: [usize; MAX_DIGIT as usize + 1] = [0; MAX_DIGIT as usize + 1];
    for i in 0..NUM_DIGITS {
        if candidate.get(i) == solution.get(i) {
            exact += 1;
        } else {
            unmatched[solution.get(i) as usize] += 1;
        }
    }

    for i in 0..NUM_DIGITS {
        let d: usize = candidate.get(i) as usize;
        if candidate.get(i) != solution.get(i) && unmatched[d] > 0 {
            unmatched[d] -= 1;
            misplaced += 1;
        }
    }
    Feedback { exact, misplaced }
}

/// Feedback categories that clues are built for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Category {
    /// One digit in the solution, at the wrong position.
    OneMisplaced,

    /// Two digits at their exact position, nothing else.
    TwoPlaced,

    /// Two digits in the solution, both at the wrong position.
    TwoMisplaced,

    /// No digit in the solution.
    Nothing,
}

/// Categories of the five clues, in display order.
pub const CLUE_CATEGORIES: [Category; 5] = [
    Category::OneMisplaced,
    Category::OneMisplaced,
    Category::TwoPlaced,
    Category::TwoMisplaced,
    Category::Nothing,
];

impl Category {
    /// Feedback that a clue of this category must produce.
    pub const fn feedback(self) -> Feedback {
        match self {
            Category::OneMisplaced => Feedback::new(0, 1),
            Category::TwoPlaced => Feedback::new(2, 0),
            Category::TwoMisplaced => Feedback::new(0, 2),
            Category::Nothing => Feedback::new(0, 0),
        }
    }

    /// Text displayed next to a clue of this category.
    pub const fn hint(self) -> &'static str {
        match self {
            Category::OneMisplaced => "One number is correct but wrongly placed",
            Category::TwoPlaced => "Two numbers are correct and well placed",
            Category::TwoMisplaced => "Two numbers are correct but wrongly placed",
            Category::Nothing => "Nothing is correct",
        }
    }

    /// Return the category of the given feedback, or None if no clue category matches.
    pub fn classify(feedback: Feedback) -> Option<Category> {
        (0..)
            .map_while(Category::from_repr)
            .find(|c| c.feedback() == feedback)
    }

    /// Whether the candidate produces this category's feedback against the solution.
    pub fn matches(self, candidate: &Digits, solution: &Digits) -> bool {
        evaluate(candidate, solution) == self.feedback()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::OneMisplaced => write!(f, "one misplaced"),
            Category::TwoPlaced => write!(f, "two placed"),
            Category::TwoMisplaced => write!(f, "two misplaced"),
            Category::Nothing => write!(f, "nothing"),
        }
    }
}
