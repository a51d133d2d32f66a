/*
wheel.rs

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

//! Winner wheel.
//!
//! The wheel is split into equal segments, one per correct submission, laid out clockwise from
//! the top. A spin turns the wheel between 5 and 10 full turns plus a random final angle; the
//! segment that stops under the pointer wins.

use rand::Rng;

use super::conference::Submission;

/// Full turns of a spin, lower and upper bounds.
const MIN_TURNS: f64 = 5.0;
const MAX_TURNS: f64 = 10.0;

/// Result of a spin.
#[derive(Debug, Clone, PartialEq)]
pub struct Spin {
    /// Total rotation in degrees, full turns included.
    pub rotation: f64,

    /// Angle at which the wheel stops, in `[0, 360)`.
    pub final_angle: f64,

    /// Index of the winning segment.
    pub index: usize,

    /// Winning submission.
    pub winner: Submission,
}

/// Wheel object.
#[derive(Debug, Clone)]
pub struct Wheel {
    participants: Vec<Submission>,
}

impl Wheel {
    /// Create a wheel with one segment per participant.
    pub fn new(participants: Vec<Submission>) -> Self {
        Self { participants }
    }

    /// Participants in segment order.
    pub fn participants(&self) -> &[Submission] {
        &self.participants
    }

    /// Angle of one segment in degrees, or None for an empty wheel.
    pub fn segment_angle(&self) -> Option<f64> {
        if self.participants.is_empty() {
            None
        } else {
            Some(360.0 / self.participants.len() as f64)
        }
    }

    /// Return the index of the segment under the pointer when the wheel stops at the given angle.
    pub fn segment_at(&self, final_angle: f64) -> Option<usize> {
        let segment: f64 = self.segment_angle()?;
        let n: usize = self.participants.len();
        let index: usize = ((360.0 - final_angle.rem_euclid(360.0)) / segment).floor() as usize;
        Some(index % n)
    }

    /// Spin the wheel. Return None when there is no participant.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> Option<Spin> {
        if self.participants.is_empty() {
            return None;
        }
        let turns: f64 = rng.random_range(MIN_TURNS..MAX_TURNS);
        let final_angle: f64 = rng.random_range(0.0..360.0);
        let index: usize = self.segment_at(final_angle)?;

        Some(Spin {
            rotation: turns * 360.0 + final_angle,
            final_angle,
            index,
            winner: self.participants[index].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::conference::Conference;
    use crate::generator::puzzle::Puzzle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn participants(n: usize) -> Vec<Submission> {
        let conference = Conference::new(
            "Wheel",
            Puzzle {
                solution: "123".parse().unwrap(),
                clues: Vec::new(),
            },
        );
        (0..n)
            .map(|i| {
                Submission::new(
                    &conference,
                    i as u64 + 1,
                    "123".parse().unwrap(),
                    &format!("P{i}"),
                    "p@x.io",
                )
            })
            .collect()
    }

    #[test]
    fn empty_wheel_does_not_spin() {
        let wheel = Wheel::new(Vec::new());
        assert_eq!(wheel.segment_angle(), None);
        assert!(wheel.spin(&mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn segment_under_pointer() {
        let wheel = Wheel::new(participants(4));
        assert_eq!(wheel.segment_angle(), Some(90.0));
        assert_eq!(wheel.segment_at(0.0), Some(0));
        assert_eq!(wheel.segment_at(10.0), Some(3));
        assert_eq!(wheel.segment_at(100.0), Some(2));
        assert_eq!(wheel.segment_at(190.0), Some(1));
        assert_eq!(wheel.segment_at(280.0), Some(0));
        assert_eq!(wheel.segment_at(370.0), Some(3));
    }

    #[test]
    fn spin_picks_a_participant() {
        let wheel = Wheel::new(participants(5));
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let spin = wheel.spin(&mut rng).unwrap();
            assert!(spin.rotation >= MIN_TURNS * 360.0);
            assert!(spin.rotation < MAX_TURNS * 360.0 + 360.0);
            assert!((0.0..360.0).contains(&spin.final_angle));
            assert_eq!(spin.winner, wheel.participants()[spin.index]);
            seen[spin.index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
