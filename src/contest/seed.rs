/*
seed.rs

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

//! Fill a conference with fake submissions.
//!
//! Used to rehearse the winner wheel before the booth opens. The attendee names and email
//! addresses are random combinations of the lists below.

use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::conference::Submission;
use super::{Contest, ContestError};
use crate::generator::digits::{Digits, NUM_DIGITS};
use crate::store::KeyValueStore;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Avery", "Quinn", "Blake", "Sage",
    "Cameron", "Drew", "Emery", "Finley", "Harper", "Hayden", "Kai", "Logan", "Nova", "Parker",
    "Wei", "Ming", "Mei", "Jun", "Min", "Soo", "Jin", "Carlos", "Maria", "Sofia", "Diego",
    "Joao", "Pedro", "Camila", "Ahmet", "Zeynep", "Emre", "Elif", "Omar", "Layla", "Amina",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Brown", "Garcia", "Miller", "Davis", "Wilson", "Taylor", "Lee",
    "Nguyen", "Wang", "Zhang", "Chen", "Kim", "Park", "Choi", "Silva", "Santos", "Oliveira",
    "Lopez", "Moreno", "Kaya", "Demir", "Yilmaz", "Khalil", "Mansour", "Crypto", "Cipher",
    "Binary", "Quantum",
];

const DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "outlook.com", "protonmail.com", "company.com", "tech.io",
    "cyber.net", "security.org", "conference.com", "naver.com", "uol.com.br", "yahoo.es",
];

fn random_name<R: Rng>(rng: &mut R) -> String {
    let first: &str = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last: &str = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
    format!("{first} {last}")
}

fn random_email<R: Rng>(rng: &mut R, name: &str) -> String {
    let local: String = name.to_lowercase().replace(' ', ".");
    let domain: &str = DOMAINS.choose(rng).copied().unwrap_or("gmail.com");
    if rng.random_bool(0.3) {
        format!("{local}{}@{domain}", rng.random_range(0..999))
    } else {
        format!("{local}@{domain}")
    }
}

/// Return three distinct random digits that are not the solution.
fn random_wrong_answer<R: Rng>(rng: &mut R, solution: &Digits) -> Digits {
    let mut values: [u8; NUM_DIGITS] = *Digits::random_distinct(rng).as_array();
    // Rotating distinct digits always gives another sequence
    if values == *solution.as_array() {
        values.rotate_left(1);
    }
    Digits::from_valid(values)
}

impl<S: KeyValueStore> Contest<S> {
    /// Store `count` fake submissions for the conference.
    ///
    /// `correct_ratio` (clamped to `[0, 1]`) of them carry the solution; the others carry a
    /// wrong answer.
    pub fn seed_submissions<R: Rng>(
        &mut self,
        id: &str,
        count: usize,
        correct_ratio: f64,
        rng: &mut R,
    ) -> Result<Vec<Submission>, ContestError> {
        let solution: Digits = self.conference(id)?.puzzle.solution;
        let correct: usize = (count as f64 * correct_ratio.clamp(0.0, 1.0)).floor() as usize;

        let mut submissions: Vec<Submission> = Vec::with_capacity(count);
        for i in 0..count {
            let answer: Digits = if i < correct {
                solution
            } else {
                random_wrong_answer(rng, &solution)
            };
            let name: String = random_name(rng);
            let email: String = random_email(rng, &name);
            submissions.push(self.submit(id, answer, &name, &email)?);
        }
        info!("{count} submissions added to {id} ({correct} correct)");
        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ratio_of_correct_submissions() {
        let mut contest = Contest::new(MemoryStore::new());
        contest.create_conference("Lisbon").unwrap();
        let mut rng = StdRng::seed_from_u64(68);

        let submissions = contest
            .seed_submissions("lisbon", 68, 0.8, &mut rng)
            .unwrap();
        assert_eq!(submissions.len(), 68);
        assert_eq!(submissions.iter().filter(|s| s.correct).count(), 54);
        assert_eq!(contest.submission_count("lisbon").unwrap(), 68);
        assert_eq!(contest.correct_submissions("lisbon").unwrap().len(), 54);
    }

    #[test]
    fn wrong_answers_are_never_the_solution() {
        let mut rng = StdRng::seed_from_u64(1);
        let solution: Digits = "082".parse().unwrap();
        for _ in 0..2000 {
            let answer = random_wrong_answer(&mut rng, &solution);
            assert_ne!(answer, solution);
            assert!(answer.is_distinct());
        }
    }

    #[test]
    fn emails_are_derived_from_names() {
        let mut rng = StdRng::seed_from_u64(2);
        let email = random_email(&mut rng, "Ana Silva");
        assert!(email.starts_with("ana.silva"));
        assert!(email.contains('@'));
    }

    #[test]
    fn unknown_conference() {
        let mut contest = Contest::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            contest.seed_submissions("nope", 3, 0.5, &mut rng),
            Err(ContestError::NotFound(_))
        ));
    }
}
