/*
contest.rs

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

//! Run the contest for conferences.
//!
//! The [`Contest`] object drives the whole life of a conference on top of a
//! [`KeyValueStore`]:
//!
//! * the organizer creates a conference, which gets a random puzzle. The puzzle can be replaced
//!   by a new one (reshuffle) while the contest runs.
//! * attendees submit answers. Each answer is graded when it is received.
//! * the booth screen shows either the puzzle or the winner wheel (display mode).
//! * the organizer spins the wheel, which draws a winner among the correct submissions, and then
//!   ends the contest with that winner. A finished contest can be reopened.

pub mod conference;
pub mod seed;
pub mod wheel;

use chrono::Utc;
use clap::ValueEnum;
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use uuid::Uuid;

use crate::config::{
    CONFERENCE_PREFIX, DISPLAY_MODE_PREFIX, MAX_CLUE_ATTEMPTS, SUBMISSION_PREFIX,
};
use crate::generator::digits::Digits;
use crate::generator::puzzle::Puzzle;
use crate::generator::random_puzzle::{GenerationError, RandomPuzzle};
use crate::store::KeyValueStore;
use conference::{Conference, Submission, conference_id};
use wheel::{Spin, Wheel};

/// Type of errors.
#[derive(Debug)]
pub enum ContestError {
    /// No conference with that identifier.
    NotFound(String),

    /// A conference with that identifier already exists.
    AlreadyExists(String),

    /// The name does not produce a usable identifier.
    InvalidName(String),

    /// The conference does not accept submissions anymore.
    ContestEnded(String),

    /// No correct submission to draw a winner from.
    NoParticipants(String),

    /// The submission does not exist or does not belong to the conference.
    UnknownSubmission(Uuid),

    /// The submission exists but its answer was wrong.
    NotEligible(Uuid),

    /// The puzzle could not be generated.
    Generation(GenerationError),

    /// The store failed to read or write a record.
    Store(Box<dyn Error>),
}

impl fmt::Display for ContestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContestError::NotFound(id) => write!(f, "conference {id} not found"),
            ContestError::AlreadyExists(id) => write!(f, "conference {id} already exists"),
            ContestError::InvalidName(name) => {
                write!(f, "\"{name}\" is not a valid conference name")
            }
            ContestError::ContestEnded(id) => write!(f, "the contest for {id} has ended"),
            ContestError::NoParticipants(id) => write!(f, "no correct submission for {id}"),
            ContestError::UnknownSubmission(id) => write!(f, "submission {id} not found"),
            ContestError::NotEligible(id) => write!(f, "submission {id} has a wrong answer"),
            ContestError::Generation(e) => write!(f, "puzzle generation failed: {e}"),
            ContestError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl Error for ContestError {}

impl From<GenerationError> for ContestError {
    fn from(e: GenerationError) -> Self {
        ContestError::Generation(e)
    }
}

impl From<Box<dyn Error>> for ContestError {
    fn from(e: Box<dyn Error>) -> Self {
        ContestError::Store(e)
    }
}

impl From<serde_json::Error> for ContestError {
    fn from(e: serde_json::Error) -> Self {
        ContestError::Store(Box::new(e))
    }
}

/// What the booth screen shows for a conference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum DisplayMode {
    /// The puzzle and the QR code. This is the mode when nothing is stored.
    #[default]
    Puzzle,

    /// The winner wheel.
    Winner,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayMode::Puzzle => write!(f, "puzzle"),
            DisplayMode::Winner => write!(f, "winner"),
        }
    }
}

/// Contest object.
pub struct Contest<S: KeyValueStore> {
    store: S,

    /// Retry limit passed to the puzzle generator.
    max_attempts: usize,
}

impl<S: KeyValueStore> Contest<S> {
    /// Create a [`Contest`] object that saves its records in the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: MAX_CLUE_ATTEMPTS,
        }
    }

    /// Change the retry limit used when generating puzzles.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Return the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ContestError> {
        match self.store.get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), ContestError> {
        let json: String = serde_json::to_string(value)?;
        self.store.put(key, json)?;
        Ok(())
    }

    fn new_puzzle(&self) -> Result<Puzzle, ContestError> {
        let mut generator = RandomPuzzle::new().with_max_attempts(self.max_attempts);
        let puzzle: Puzzle = generator.generate()?;
        debug!(
            "Puzzle generated in {} iterations ({}s)",
            generator.iteration, generator.duration
        );
        Ok(puzzle)
    }

    fn save_conference(&mut self, conference: &Conference) -> Result<(), ContestError> {
        self.write(&format!("{CONFERENCE_PREFIX}{}", conference.id), conference)
    }

    /// Create a conference with a new puzzle.
    ///
    /// Leading and trailing whitespace in the name is ignored.
    pub fn create_conference(&mut self, name: &str) -> Result<Conference, ContestError> {
        let name: &str = name.trim();
        let id: String = conference_id(name);
        if id.is_empty() {
            return Err(ContestError::InvalidName(name.to_string()));
        }
        if self.store.get(&format!("{CONFERENCE_PREFIX}{id}"))?.is_some() {
            return Err(ContestError::AlreadyExists(id));
        }

        let conference: Conference = Conference::new(name, self.new_puzzle()?);
        self.save_conference(&conference)?;
        info!("Conference {} created", conference.id);
        Ok(conference)
    }

    /// Return the conference.
    pub fn conference(&self, id: &str) -> Result<Conference, ContestError> {
        self.read(&format!("{CONFERENCE_PREFIX}{id}"))?
            .ok_or_else(|| ContestError::NotFound(id.to_string()))
    }

    /// Return all the conferences, oldest first.
    pub fn list_conferences(&self) -> Result<Vec<Conference>, ContestError> {
        let mut conferences: Vec<Conference> = Vec::new();
        for key in self.store.list(CONFERENCE_PREFIX)? {
            match self.read::<Conference>(&key)? {
                Some(c) => conferences.push(c),
                None => warn!("Conference {key} disappeared while listing"),
            }
        }
        conferences.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(conferences)
    }

    /// Replace the conference puzzle with a new one.
    ///
    /// Submissions already received keep the grade they got with the previous puzzle.
    pub fn reshuffle(&mut self, id: &str) -> Result<Conference, ContestError> {
        let mut conference: Conference = self.conference(id)?;
        conference.puzzle = self.new_puzzle()?;
        self.save_conference(&conference)?;
        info!("Puzzle for {id} reshuffled");
        Ok(conference)
    }

    /// Stop accepting submissions, without recording a winner.
    pub fn finish(&mut self, id: &str) -> Result<Conference, ContestError> {
        let mut conference: Conference = self.conference(id)?;
        conference.active = false;
        self.save_conference(&conference)?;
        info!("Contest for {id} finished");
        Ok(conference)
    }

    /// Accept submissions again. The winner, if any, is forgotten.
    pub fn reopen(&mut self, id: &str) -> Result<Conference, ContestError> {
        let mut conference: Conference = self.conference(id)?;
        conference.active = true;
        conference.winner = None;
        conference.ended = None;
        conference.reopened = Some(Utc::now());
        self.save_conference(&conference)?;
        self.set_display_mode(id, DisplayMode::Puzzle)?;
        info!("Contest for {id} reopened");
        Ok(conference)
    }

    /// Grade and save an answer.
    pub fn submit(
        &mut self,
        id: &str,
        answer: Digits,
        name: &str,
        email: &str,
    ) -> Result<Submission, ContestError> {
        let conference: Conference = self.conference(id)?;
        if !conference.active {
            return Err(ContestError::ContestEnded(id.to_string()));
        }

        let sequence: u64 = self
            .submissions(id)?
            .first()
            .map_or(0, |s| s.sequence)
            + 1;
        let submission: Submission = Submission::new(&conference, sequence, answer, name, email);
        self.write(&format!("{SUBMISSION_PREFIX}{}", submission.id), &submission)?;
        debug!(
            "Submission {} for {id}: {} ({})",
            submission.id,
            answer,
            if submission.correct { "correct" } else { "wrong" }
        );
        Ok(submission)
    }

    /// Return the submission.
    pub fn submission(&self, submission_id: Uuid) -> Result<Submission, ContestError> {
        self.read(&format!("{SUBMISSION_PREFIX}{submission_id}"))?
            .ok_or(ContestError::UnknownSubmission(submission_id))
    }

    /// Return the submissions for the conference, newest first.
    pub fn submissions(&self, id: &str) -> Result<Vec<Submission>, ContestError> {
        let mut submissions: Vec<Submission> = Vec::new();
        for key in self.store.list(SUBMISSION_PREFIX)? {
            match self.read::<Submission>(&key)? {
                Some(s) if s.conference_id == id => submissions.push(s),
                Some(_) => (),
                None => warn!("Submission {key} disappeared while listing"),
            }
        }
        submissions.sort_by(|a, b| (b.sequence, b.timestamp).cmp(&(a.sequence, a.timestamp)));
        Ok(submissions)
    }

    /// Number of submissions for the conference.
    pub fn submission_count(&self, id: &str) -> Result<usize, ContestError> {
        Ok(self.submissions(id)?.len())
    }

    /// Return the correct submissions for the conference, oldest first.
    pub fn correct_submissions(&self, id: &str) -> Result<Vec<Submission>, ContestError> {
        let mut correct: Vec<Submission> = self
            .submissions(id)?
            .into_iter()
            .filter(|s| s.correct)
            .collect();
        correct.reverse();
        Ok(correct)
    }

    /// Change what the booth screen shows.
    pub fn set_display_mode(&mut self, id: &str, mode: DisplayMode) -> Result<(), ContestError> {
        let key: String = format!("{DISPLAY_MODE_PREFIX}{id}");
        match mode {
            DisplayMode::Puzzle => self.store.delete(&key)?,
            DisplayMode::Winner => self.store.put(&key, mode.to_string())?,
        }
        debug!("Display mode for {id}: {mode}");
        Ok(())
    }

    /// Return what the booth screen shows.
    pub fn display_mode(&self, id: &str) -> Result<DisplayMode, ContestError> {
        let key: String = format!("{DISPLAY_MODE_PREFIX}{id}");
        match self.store.get(&key)?.as_deref() {
            Some("winner") => Ok(DisplayMode::Winner),
            Some("puzzle") | None => Ok(DisplayMode::Puzzle),
            Some(other) => {
                warn!("Unknown display mode \"{other}\" for {id}, showing the puzzle");
                Ok(DisplayMode::Puzzle)
            }
        }
    }

    /// Return the winner wheel for the conference.
    pub fn wheel(&self, id: &str) -> Result<Wheel, ContestError> {
        // Fail early on unknown conferences instead of returning an empty wheel
        self.conference(id)?;
        Ok(Wheel::new(self.correct_submissions(id)?))
    }

    /// Spin the wheel and return the drawn winner. The contest is not ended.
    pub fn spin_wheel<R: Rng>(&self, id: &str, rng: &mut R) -> Result<Spin, ContestError> {
        let spin: Spin = self
            .wheel(id)?
            .spin(rng)
            .ok_or_else(|| ContestError::NoParticipants(id.to_string()))?;
        info!(
            "Wheel for {id} stopped on {} ({})",
            spin.winner.name, spin.winner.id
        );
        Ok(spin)
    }

    /// Record the winner and stop accepting submissions.
    pub fn end_contest(
        &mut self,
        id: &str,
        submission_id: Uuid,
    ) -> Result<Conference, ContestError> {
        let mut conference: Conference = self.conference(id)?;
        let winner: Submission = self.submission(submission_id)?;
        if winner.conference_id != conference.id {
            return Err(ContestError::UnknownSubmission(submission_id));
        }
        if !winner.correct {
            return Err(ContestError::NotEligible(submission_id));
        }

        conference.winner = Some(winner);
        conference.active = false;
        conference.ended = Some(Utc::now());
        self.save_conference(&conference)?;
        self.set_display_mode(id, DisplayMode::Puzzle)?;
        info!("Contest for {id} ended");
        Ok(conference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn contest_with(name: &str) -> (Contest<MemoryStore>, Conference) {
        let mut contest = Contest::new(MemoryStore::new());
        let conference = contest.create_conference(name).unwrap();
        (contest, conference)
    }

    fn wrong_answer(solution: &Digits) -> Digits {
        let a = solution.as_array();
        Digits::new([a[1], a[2], a[0]]).unwrap()
    }

    #[test]
    fn create_and_fetch() {
        let (contest, conference) = contest_with("BSides Lisbon");
        assert_eq!(conference.id, "bsides-lisbon");
        assert!(conference.active);
        assert_eq!(conference.puzzle.verify(), Ok(()));
        assert_eq!(contest.conference("bsides-lisbon").unwrap(), conference);
        assert!(matches!(
            contest.conference("nope"),
            Err(ContestError::NotFound(_))
        ));
    }

    #[test]
    fn name_is_trimmed() {
        let (contest, conference) = contest_with(" BSides Lisbon ");
        assert_eq!(conference.id, "bsides-lisbon");
        assert_eq!(conference.name, "BSides Lisbon");
        assert_eq!(contest.conference("bsides-lisbon").unwrap().name, "BSides Lisbon");
    }

    #[test]
    fn duplicate_and_invalid_names() {
        let (mut contest, _) = contest_with("Lisbon");
        assert!(matches!(
            contest.create_conference("LISBON"),
            Err(ContestError::AlreadyExists(id)) if id == "lisbon"
        ));
        assert!(matches!(
            contest.create_conference("!!!"),
            Err(ContestError::InvalidName(_))
        ));
        assert!(matches!(
            contest.create_conference("   "),
            Err(ContestError::InvalidName(_))
        ));
    }

    #[test]
    fn generation_failure_creates_nothing() {
        let mut contest = Contest::new(MemoryStore::new()).with_max_attempts(0);
        assert!(matches!(
            contest.create_conference("Lisbon"),
            Err(ContestError::Generation(_))
        ));
        assert!(contest.list_conferences().unwrap().is_empty());
    }

    #[test]
    fn submissions_are_graded_and_sorted() {
        let (mut contest, conference) = contest_with("Lisbon");
        let solution = conference.puzzle.solution;
        let first = contest.submit("lisbon", solution, "Ana", "ana@x.io").unwrap();
        let second = contest
            .submit("lisbon", wrong_answer(&solution), "Leo", "leo@x.io")
            .unwrap();
        assert!(first.correct);
        assert!(!second.correct);

        let all = contest.submissions("lisbon").unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].timestamp >= all[1].timestamp);
        assert_eq!(contest.submission_count("lisbon").unwrap(), 2);
        assert_eq!(contest.correct_submissions("lisbon").unwrap(), vec![first]);
        assert_eq!(contest.submission_count("other").unwrap(), 0);
    }

    #[test]
    fn same_timestamp_keeps_arrival_order() {
        let (mut contest, conference) = contest_with("Lisbon");
        let solution = conference.puzzle.solution;
        let mut submissions: Vec<Submission> = (0..6)
            .map(|i| {
                contest
                    .submit("lisbon", solution, &format!("P{i}"), "p@x.io")
                    .unwrap()
            })
            .collect();
        let sequences: Vec<u64> = submissions.iter().map(|s| s.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5, 6]);

        // Arrivals within the clock resolution
        let timestamp = submissions[0].timestamp;
        for s in submissions.iter_mut() {
            s.timestamp = timestamp;
            contest
                .write(&format!("{SUBMISSION_PREFIX}{}", s.id), &*s)
                .unwrap();
        }

        let names: Vec<String> = contest
            .correct_submissions("lisbon")
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["P0", "P1", "P2", "P3", "P4", "P5"]);
        let newest = contest.submissions("lisbon").unwrap();
        assert_eq!(newest[0].name, "P5");
    }

    #[test]
    fn sequence_is_per_conference() {
        let mut contest = Contest::new(MemoryStore::new());
        let a = contest.create_conference("A").unwrap();
        let b = contest.create_conference("B").unwrap();
        contest.submit("a", a.puzzle.solution, "Ana", "ana@x.io").unwrap();
        contest.submit("a", a.puzzle.solution, "Leo", "leo@x.io").unwrap();
        let s = contest.submit("b", b.puzzle.solution, "Eva", "eva@x.io").unwrap();
        assert_eq!(s.sequence, 1);
    }

    #[test]
    fn finished_contest_rejects_submissions() {
        let (mut contest, conference) = contest_with("Lisbon");
        contest.finish("lisbon").unwrap();
        assert!(matches!(
            contest.submit("lisbon", conference.puzzle.solution, "Ana", "ana@x.io"),
            Err(ContestError::ContestEnded(_))
        ));
        contest.reopen("lisbon").unwrap();
        assert!(
            contest
                .submit("lisbon", conference.puzzle.solution, "Ana", "ana@x.io")
                .is_ok()
        );
    }

    #[test]
    fn reshuffle_replaces_the_puzzle() {
        let (mut contest, conference) = contest_with("Lisbon");
        let reshuffled = contest.reshuffle("lisbon").unwrap();
        assert_eq!(reshuffled.id, conference.id);
        assert_eq!(reshuffled.created, conference.created);
        assert_eq!(reshuffled.puzzle.verify(), Ok(()));
        assert_eq!(contest.conference("lisbon").unwrap(), reshuffled);
    }

    #[test]
    fn display_mode_defaults_to_puzzle() {
        let (mut contest, _) = contest_with("Lisbon");
        assert_eq!(contest.display_mode("lisbon").unwrap(), DisplayMode::Puzzle);
        contest
            .set_display_mode("lisbon", DisplayMode::Winner)
            .unwrap();
        assert_eq!(contest.display_mode("lisbon").unwrap(), DisplayMode::Winner);
        contest
            .set_display_mode("lisbon", DisplayMode::Puzzle)
            .unwrap();
        assert_eq!(contest.display_mode("lisbon").unwrap(), DisplayMode::Puzzle);
    }

    #[test]
    fn wheel_draws_among_correct_submissions() {
        let (mut contest, conference) = contest_with("Lisbon");
        let solution = conference.puzzle.solution;
        let mut rng = StdRng::seed_from_u64(5);

        assert!(matches!(
            contest.spin_wheel("lisbon", &mut rng),
            Err(ContestError::NoParticipants(_))
        ));

        for i in 0..3 {
            contest
                .submit("lisbon", solution, &format!("Good {i}"), "g@x.io")
                .unwrap();
            contest
                .submit("lisbon", wrong_answer(&solution), &format!("Bad {i}"), "b@x.io")
                .unwrap();
        }
        for _ in 0..50 {
            let spin = contest.spin_wheel("lisbon", &mut rng).unwrap();
            assert!(spin.winner.correct);
            assert!(spin.winner.name.starts_with("Good"));
        }
    }

    #[test]
    fn end_and_reopen() {
        let (mut contest, conference) = contest_with("Lisbon");
        let solution = conference.puzzle.solution;
        let good = contest.submit("lisbon", solution, "Ana", "ana@x.io").unwrap();
        let bad = contest
            .submit("lisbon", wrong_answer(&solution), "Leo", "leo@x.io")
            .unwrap();
        contest
            .set_display_mode("lisbon", DisplayMode::Winner)
            .unwrap();

        assert!(matches!(
            contest.end_contest("lisbon", bad.id),
            Err(ContestError::NotEligible(_))
        ));
        assert!(matches!(
            contest.end_contest("lisbon", Uuid::new_v4()),
            Err(ContestError::UnknownSubmission(_))
        ));

        let ended = contest.end_contest("lisbon", good.id).unwrap();
        assert!(!ended.active);
        assert!(ended.ended.is_some());
        assert_eq!(ended.winner, Some(good));
        assert_eq!(contest.display_mode("lisbon").unwrap(), DisplayMode::Puzzle);

        let reopened = contest.reopen("lisbon").unwrap();
        assert!(reopened.active);
        assert_eq!(reopened.winner, None);
        assert_eq!(reopened.ended, None);
        assert!(reopened.reopened.is_some());
    }

    #[test]
    fn winner_from_another_conference_is_rejected() {
        let mut contest = Contest::new(MemoryStore::new());
        let a = contest.create_conference("A").unwrap();
        contest.create_conference("B").unwrap();
        let s = contest.submit("a", a.puzzle.solution, "Ana", "ana@x.io").unwrap();
        assert!(matches!(
            contest.end_contest("b", s.id),
            Err(ContestError::UnknownSubmission(_))
        ));
    }

    #[test]
    fn conferences_are_listed_oldest_first() {
        let mut contest = Contest::new(MemoryStore::new());
        contest.create_conference("Zurich").unwrap();
        contest.create_conference("Amsterdam").unwrap();
        let ids: Vec<String> = contest
            .list_conferences()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["zurich", "amsterdam"]);
    }
}
