/*
lib.rs

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

//! Conference booth puzzle.
//!
//! Attendees get a three-digit solution to find from five clues, submit their answer, and a
//! winner is drawn among the correct answers.
//!
//! * [`generator`] builds and checks the puzzles.
//! * [`contest`] runs conferences, submissions, and the winner wheel on top of a [`store`].

pub mod config;
pub mod contest;
pub mod generator;
pub mod store;
