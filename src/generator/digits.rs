/*
digits.rs

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

//! Three-digit sequences used for solutions, clues, and answers.
//!
//! [`Digits`] serializes as a plain JSON array (`[0, 8, 2]`), which is the shape the rendering
//! layer reads and the shape the submitted answers arrive in.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Number of digits in a sequence.
pub const NUM_DIGITS: usize = 3;

/// Largest digit value.
pub const MAX_DIGIT: u8 = 9;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum DigitsError {
    /// The sequence does not have exactly [`NUM_DIGITS`] digits.
    Length(usize),

    /// A character in the input string is not a decimal digit.
    NotADigit(char),

    /// A value is greater than [`MAX_DIGIT`].
    OutOfRange(u8),
}

impl fmt::Display for DigitsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DigitsError::Length(l) => write!(f, "expected {NUM_DIGITS} digits, got {l}"),
            DigitsError::NotADigit(c) => write!(f, "'{c}' is not a digit"),
            DigitsError::OutOfRange(v) => write!(f, "{v} is not between 0 and {MAX_DIGIT}"),
        }
    }
}

impl Error for DigitsError {}

/// Ordered sequence of three digits.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Digits([u8; NUM_DIGITS]);

impl Digits {
    /// Create a [`Digits`] object after checking that every value is a digit.
    pub fn new(values: [u8; NUM_DIGITS]) -> Result<Self, DigitsError> {
        if let Some(v) = values.iter().find(|&&v| v > MAX_DIGIT) {
            return Err(DigitsError::OutOfRange(*v));
        }
        Ok(Self(values))
    }

    /// Create a [`Digits`] object from values that the caller already knows are in range.
    pub(crate) fn from_valid(values: [u8; NUM_DIGITS]) -> Self {
        debug_assert!(values.iter().all(|&v| v <= MAX_DIGIT));
        Self(values)
    }

    /// Draw three distinct digits uniformly. The draw order is the position order.
    pub fn random_distinct<R: Rng>(rng: &mut R) -> Self {
        let mut values: [u8; NUM_DIGITS] = [0; NUM_DIGITS];
        let mut len: usize = 0;
        while len < NUM_DIGITS {
            let digit: u8 = rng.random_range(0..=MAX_DIGIT);
            if !values[..len].contains(&digit) {
                values[len] = digit;
                len += 1;
            }
        }
        Self(values)
    }

    /// Return the digit at the given position.
    pub fn get(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Return the underlying array.
    pub fn as_array(&self) -> &[u8; NUM_DIGITS] {
        &self.0
    }

    /// Whether the digit appears at any position.
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }

    /// Whether the three digits are pairwise distinct.
    pub fn is_distinct(&self) -> bool {
        self.0[0] != self.0[1] && self.0[0] != self.0[2] && self.0[1] != self.0[2]
    }

    /// Return the digits between 0 and 9 that are not in the sequence, in increasing order.
    pub fn complement(&self) -> Vec<u8> {
        (0..=MAX_DIGIT).filter(|d| !self.contains(*d)).collect()
    }
}

impl TryFrom<Vec<u8>> for Digits {
    type Error = DigitsError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        let values: [u8; NUM_DIGITS] = values
            .try_into()
            .map_err(|v: Vec<u8>| DigitsError::Length(v.len()))?;
        Self::new(values)
    }
}

impl From<Digits> for Vec<u8> {
    fn from(digits: Digits) -> Self {
        digits.0.to_vec()
    }
}

/// Parse strings such as `"082"`, `"0 8 2"`, or `"0,8,2"`.
impl FromStr for Digits {
    type Err = DigitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<u8> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| match c.to_digit(10) {
                Some(d) => Ok(d as u8),
                None => Err(DigitsError::NotADigit(c)),
            })
            .collect::<Result<Vec<u8>, DigitsError>>()?;
        Self::try_from(values)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parse_accepts_separators() {
        let expected = Digits::new([0, 8, 2]).unwrap();
        assert_eq!("082".parse::<Digits>().unwrap(), expected);
        assert_eq!("0 8 2".parse::<Digits>().unwrap(), expected);
        assert_eq!("0,8,2".parse::<Digits>().unwrap(), expected);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("08".parse::<Digits>(), Err(DigitsError::Length(2)));
        assert_eq!("0823".parse::<Digits>(), Err(DigitsError::Length(4)));
        assert_eq!("0a2".parse::<Digits>(), Err(DigitsError::NotADigit('a')));
    }

    #[test]
    fn new_rejects_values_above_nine() {
        assert_eq!(Digits::new([1, 10, 2]), Err(DigitsError::OutOfRange(10)));
    }

    #[test]
    fn json_is_a_plain_array() {
        let d: Digits = "271".parse().unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "[2,7,1]");
        assert_eq!(serde_json::from_str::<Digits>("[2,7,1]").unwrap(), d);
        assert!(serde_json::from_str::<Digits>("[2,7]").is_err());
        assert!(serde_json::from_str::<Digits>("[2,7,12]").is_err());
    }

    #[test]
    fn distinct_and_complement() {
        let d: Digits = "082".parse().unwrap();
        assert!(d.is_distinct());
        assert_eq!(d.complement(), vec![1, 3, 4, 5, 6, 7, 9]);
        assert!(!"118".parse::<Digits>().unwrap().is_distinct());
    }

    #[test]
    fn random_distinct_digits() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = [false; MAX_DIGIT as usize + 1];
        for _ in 0..500 {
            let d = Digits::random_distinct(&mut rng);
            assert!(d.is_distinct());
            for v in d.as_array() {
                seen[*v as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn display_concatenates_digits() {
        assert_eq!(Digits::new([3, 0, 8]).unwrap().to_string(), "308");
    }
}
