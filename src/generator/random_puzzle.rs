/*
random_puzzle.rs

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

//! Generate a random puzzle.
//!
//! Each clue is built by placing solution digits where its category needs them and by padding the
//! other positions with digits that are not in the solution.
//! The candidate is then scored with [`feedback::evaluate`] and rebuilt until the score matches
//! the category.

use log::debug;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::digits::{Digits, MAX_DIGIT, NUM_DIGITS};
use super::feedback::{self, CLUE_CATEGORIES, Category};
use super::puzzle::{Clue, NUM_CLUES, Puzzle};
use crate::config::MAX_CLUE_ATTEMPTS;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerationError {
    /// No valid clue was built within the allowed number of attempts.
    AttemptsExceeded {
        /// Clue number, starting at 1.
        clue: usize,
        category: Category,
        attempts: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::AttemptsExceeded {
                clue,
                category,
                attempts,
            } => write!(
                f,
                "cannot build clue {clue} ({category}) after {attempts} attempts"
            ),
        }
    }
}

impl Error for GenerationError {}

/// [`RandomPuzzle`] object.
pub struct RandomPuzzle<R: Rng> {
    /// Source of randomness.
    rng: R,

    /// Maximum number of constructions tried for each clue.
    pub max_attempts: usize,

    /// Number of clue constructions it took to generate the last puzzle.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`RandomPuzzle::duration`].
    start: Instant,
}

impl Default for RandomPuzzle<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPuzzle<ThreadRng> {
    /// Create the object, using the thread-local random generator.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl<R: Rng> RandomPuzzle<R> {
    /// Create the object with the given random generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_CLUE_ATTEMPTS,
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Change the maximum number of constructions tried for each clue.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generate and return a random puzzle.
    ///
    /// # Errors
    ///
    /// The method returns an error if a clue cannot be built within
    /// [`RandomPuzzle::max_attempts`] attempts. No partial puzzle is returned.
    pub fn generate(&mut self) -> Result<Puzzle, GenerationError> {
        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let solution: Digits = Digits::random_distinct(&mut self.rng);
        let available: Vec<u8> = solution.complement();
        debug!("Solution = {solution}  Available digits = {available:?}");

        let mut clues: Vec<Clue> = Vec::with_capacity(NUM_CLUES);
        for (i, category) in CLUE_CATEGORIES.into_iter().enumerate() {
            let res: Result<Digits, GenerationError> =
                self.find_clue(i + 1, category, &solution, &available, &clues);
            match res {
                Ok(numbers) => clues.push(Clue::new(numbers, category)),
                Err(e) => {
                    self.duration = self.start.elapsed().as_secs_f32();
                    return Err(e);
                }
            }
        }

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );
        Ok(Puzzle { solution, clues })
    }

    /// Build candidates for the category until one is accepted.
    ///
    /// A candidate is accepted when its score matches the category and it differs from all the
    /// clues already built.
    fn find_clue(
        &mut self,
        clue: usize,
        category: Category,
        solution: &Digits,
        available: &[u8],
        previous: &[Clue],
    ) -> Result<Digits, GenerationError> {
        for _ in 0..self.max_attempts {
            self.iteration += 1;
            let candidate: Option<Digits> = match category {
                Category::OneMisplaced => self.build_one_misplaced(solution, available),
                Category::TwoPlaced => self.build_two_placed(solution, available),
                Category::TwoMisplaced => self.build_two_misplaced(solution, available),
                Category::Nothing => self.fill([None; NUM_DIGITS], available),
            };
            let Some(candidate) = candidate else {
                debug!("    Clue {clue}: no room left for the solution digits");
                continue;
            };

            if !category.matches(&candidate, solution) {
                debug!(
                    "    Clue {clue}: {candidate} rejected ({})",
                    feedback::evaluate(&candidate, solution)
                );
                continue;
            }
            if previous.iter().any(|c| c.numbers == candidate) {
                debug!("    Clue {clue}: {candidate} rejected (already used)");
                continue;
            }
            debug!("Clue {clue} ({category}) = {candidate}");
            return Ok(candidate);
        }
        Err(GenerationError::AttemptsExceeded {
            clue,
            category,
            attempts: self.max_attempts,
        })
    }

    /// One solution digit moved away from its own position.
    fn build_one_misplaced(&mut self, solution: &Digits, available: &[u8]) -> Option<Digits> {
        let index: usize = self.rng.random_range(0..NUM_DIGITS);
        let position: usize = self.random_position(&[index])?;

        let mut slots: [Option<u8>; NUM_DIGITS] = [None; NUM_DIGITS];
        slots[position] = Some(solution.get(index));
        self.fill(slots, available)
    }

    /// Two solution digits kept at their own position.
    fn build_two_placed(&mut self, solution: &Digits, available: &[u8]) -> Option<Digits> {
        let free: usize = self.rng.random_range(0..NUM_DIGITS);

        let mut slots: [Option<u8>; NUM_DIGITS] = [None; NUM_DIGITS];
        for (p, slot) in slots.iter_mut().enumerate().filter(|(p, _)| *p != free) {
            *slot = Some(solution.get(p));
        }
        self.fill(slots, available)
    }

    /// Two distinct solution digits, each moved away from its own position.
    fn build_two_misplaced(&mut self, solution: &Digits, available: &[u8]) -> Option<Digits> {
        let mut indexes: [usize; NUM_DIGITS] = [0, 1, 2];
        indexes.shuffle(&mut self.rng);
        let (first, second) = (indexes[0], indexes[1]);

        let first_position: usize = self.random_position(&[first])?;
        let second_position: usize = self.random_position(&[second, first_position])?;

        let mut slots: [Option<u8>; NUM_DIGITS] = [None; NUM_DIGITS];
        slots[first_position] = Some(solution.get(first));
        slots[second_position] = Some(solution.get(second));
        self.fill(slots, available)
    }

    /// Pick a random position that is not in the excluded list.
    fn random_position(&mut self, excluded: &[usize]) -> Option<usize> {
        let positions: Vec<usize> = (0..NUM_DIGITS).filter(|p| !excluded.contains(p)).collect();
        positions.choose(&mut self.rng).copied()
    }

    /// Complete the empty slots with random digits from the available list.
    fn fill(&mut self, slots: [Option<u8>; NUM_DIGITS], available: &[u8]) -> Option<Digits> {
        let mut values: [u8; NUM_DIGITS] = [0; NUM_DIGITS];
        for (value, slot) in values.iter_mut().zip(slots) {
            *value = match slot {
                Some(d) => d,
                None => *available.choose(&mut self.rng)?,
            };
        }
        Some(Digits::from_valid(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::feedback::{Feedback, evaluate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn thousand_puzzles_are_sound() {
        let mut generator = RandomPuzzle::with_rng(StdRng::seed_from_u64(0x5eed));
        for _ in 0..1000 {
            let puzzle = generator.generate().unwrap();
            assert!(puzzle.solution.is_distinct());
            assert!(puzzle.solution.as_array().iter().all(|&d| d <= MAX_DIGIT));
            assert_eq!(puzzle.clues.len(), NUM_CLUES);
            assert_ne!(puzzle.clues[0].numbers, puzzle.clues[1].numbers);
            for (clue, category) in puzzle.clues.iter().zip(CLUE_CATEGORIES) {
                assert_eq!(
                    evaluate(&clue.numbers, &puzzle.solution),
                    category.feedback()
                );
                assert_eq!(clue.hint, category.hint());
            }
            assert_eq!(puzzle.verify(), Ok(()));
        }
    }

    #[test]
    fn two_placed_clue_scores_two_exact() {
        let mut generator = RandomPuzzle::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..100 {
            let puzzle = generator.generate().unwrap();
            assert_eq!(
                evaluate(&puzzle.clues[2].numbers, &puzzle.solution),
                Feedback::new(2, 0)
            );
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let a = RandomPuzzle::with_rng(StdRng::seed_from_u64(42))
            .generate()
            .unwrap();
        let b = RandomPuzzle::with_rng(StdRng::seed_from_u64(42))
            .generate()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_attempts_is_an_error() {
        let mut generator = RandomPuzzle::new().with_max_attempts(0);
        assert_eq!(
            generator.generate(),
            Err(GenerationError::AttemptsExceeded {
                clue: 1,
                category: Category::OneMisplaced,
                attempts: 0,
            })
        );
    }

    #[test]
    fn iterations_are_counted() {
        let mut generator = RandomPuzzle::with_rng(StdRng::seed_from_u64(1));
        generator.generate().unwrap();
        assert!(generator.iteration >= NUM_CLUES);
    }

    #[test]
    fn fill_uses_available_digits_only() {
        let mut generator = RandomPuzzle::with_rng(StdRng::seed_from_u64(3));
        let solution: Digits = "082".parse().unwrap();
        let available = solution.complement();
        for _ in 0..50 {
            let d = generator.fill([None; NUM_DIGITS], &available).unwrap();
            assert!(d.as_array().iter().all(|v| !solution.contains(*v)));
        }
        assert_eq!(generator.fill([None; NUM_DIGITS], &[]), None);
    }
}
