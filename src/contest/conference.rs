/*
conference.rs

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

//! Conference and submission records.
//!
//! Both records are saved as JSON documents in the key-value store, under the
//! `conference:<id>` and `submission:<uuid>` keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::digits::Digits;
use crate::generator::puzzle::{Puzzle, grade};

/// A conference and its current puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Conference {
    /// Identifier derived from the name. See [`conference_id`].
    pub id: String,

    /// Name as typed by the organizer.
    pub name: String,

    /// Current puzzle. A reshuffle replaces it with a new puzzle.
    pub puzzle: Puzzle,

    /// Whether the contest accepts submissions.
    pub active: bool,

    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Winning submission, once the contest has ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Submission>,

    /// When the winner was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<DateTime<Utc>>,

    /// When the contest was last reopened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reopened: Option<DateTime<Utc>>,
}

impl Conference {
    /// Create an active [`Conference`] object.
    pub fn new(name: &str, puzzle: Puzzle) -> Self {
        Self {
            id: conference_id(name),
            name: name.to_string(),
            puzzle,
            active: true,
            created: Utc::now(),
            winner: None,
            ended: None,
            reopened: None,
        }
    }
}

/// Attendee's answer for a conference puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub conference_id: String,
    pub answer: Digits,
    pub name: String,
    pub email: String,

    /// Whether the answer was the solution when it was submitted.
    pub correct: bool,

    pub timestamp: DateTime<Utc>,

    /// Arrival order within the conference, starting at 1.
    ///
    /// Two submissions received within the clock resolution share a timestamp, so the order is
    /// taken from this counter.
    #[serde(default)]
    pub sequence: u64,
}

impl Submission {
    /// Create a [`Submission`] object and grade the answer against the conference puzzle.
    pub fn new(
        conference: &Conference,
        sequence: u64,
        answer: Digits,
        name: &str,
        email: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conference_id: conference.id.clone(),
            answer,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            correct: grade(&answer, &conference.puzzle.solution),
            timestamp: Utc::now(),
            sequence,
        }
    }
}

/// Build the conference identifier from its name.
///
/// The name is lowercased, every character other than `a-z` and `0-9` becomes a dash, runs
/// of dashes are collapsed, and leading or trailing dashes are removed.
pub fn conference_id(name: &str) -> String {
    let mut id: String = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
        } else if !id.ends_with('-') {
            id.push('-');
        }
    }
    id.trim_matches('-').to_string()
}
