/*
cli_options.rs

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

//! Process command-line options.
//!
//! The command-line tool generates and checks puzzles, and runs the contest for the conferences
//! saved in the data directory.
//!
//! # Examples
//!
//! Generate three puzzles and print some statistics:
//!
//! ```
//! $ booth-puzzle generate -c 3 --summary
//! {"solution":[0,8,2],"clues":[{"numbers":[2,7,1],"hint":"One number is correct but wrongly placed"}, ...]}
//! ...
//! ```
//!
//! Run a contest:
//!
//! ```
//! $ booth-puzzle create "BSides Lisbon"
//! $ booth-puzzle submit bsides-lisbon 082 --name "Ana Silva" --email ana@example.com
//! $ booth-puzzle display bsides-lisbon winner
//! $ booth-puzzle spin bsides-lisbon
//! $ booth-puzzle end bsides-lisbon 5f0c9a7e-0d7b-4b43-8f43-0c5d2a3e6a11
//! ```

use clap::{Parser, Subcommand};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use booth_puzzle::config::{COPYRIGHT_NOTICE, DEFAULT_DATA_DIR, MAX_CLUE_ATTEMPTS};
use booth_puzzle::contest::conference::Conference;
use booth_puzzle::contest::{Contest, DisplayMode};
use booth_puzzle::generator::digits::Digits;
use booth_puzzle::generator::feedback::evaluate;
use booth_puzzle::generator::puzzle::{Puzzle, grade};
use booth_puzzle::generator::random_puzzle::RandomPuzzle;
use booth_puzzle::store::json_file::JsonFileStore;

/// Generate booth puzzles and run the contest.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Directory where the conferences and submissions are saved
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Enable debug messages
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate random puzzles and print them in JSON format, one per line
    Generate {
        /// Number of puzzles to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Print some statistics after generating the puzzles
        #[arg(short, long, default_value_t = false)]
        summary: bool,

        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum number of attempts for building each clue
        #[arg(long, default_value_t = MAX_CLUE_ATTEMPTS)]
        max_attempts: usize,
    },

    /// Verify a puzzle saved in a JSON file
    Verify {
        /// Puzzle file
        file: PathBuf,
    },

    /// Compare an answer with a solution
    Grade { answer: Digits, solution: Digits },

    /// Create a conference with a new puzzle
    Create {
        /// Conference name. The identifier is derived from it.
        name: String,
    },

    /// List the conferences
    List,

    /// Show a conference and its puzzle
    Show { id: String },

    /// Replace the puzzle of a conference
    Reshuffle { id: String },

    /// Stop accepting submissions
    Finish { id: String },

    /// Accept submissions again and forget the winner
    Reopen { id: String },

    /// Submit an answer
    Submit {
        id: String,
        answer: Digits,

        /// Attendee name
        #[arg(long)]
        name: String,

        /// Attendee email address
        #[arg(long)]
        email: String,
    },

    /// List the submissions of a conference, newest first
    Submissions { id: String },

    /// Show or change what the booth screen displays
    Display {
        id: String,

        /// New display mode
        #[arg(value_enum)]
        mode: Option<DisplayMode>,
    },

    /// Spin the winner wheel
    Spin {
        id: String,

        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,
    },

    /// End the contest with the given winning submission
    End { id: String, submission: Uuid },

    /// Add fake submissions to rehearse the winner wheel
    Seed {
        id: String,

        /// Number of submissions
        #[arg(short, long, default_value_t = 68)]
        count: usize,

        /// Proportion of correct answers
        #[arg(long, default_value_t = 0.8)]
        correct_ratio: f64,

        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match run(args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

fn open_contest(data_dir: &Path) -> Result<Contest<JsonFileStore>, Box<dyn Error>> {
    let store: JsonFileStore = JsonFileStore::open(data_dir)?;
    Ok(Contest::new(store))
}

fn print_conference(conference: &Conference) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(conference)?);
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::Generate {
            count,
            summary,
            seed,
            max_attempts,
        } => generate(count, summary, seed, max_attempts),

        Command::Verify { file } => {
            let reader: BufReader<File> = BufReader::new(File::open(&file)?);
            let puzzle: Puzzle = serde_json::from_reader(reader)?;
            puzzle.verify()?;
            println!("{}: the puzzle is logically sound", file.display());
            Ok(())
        }

        Command::Grade { answer, solution } => {
            let feedback = evaluate(&answer, &solution);
            if grade(&answer, &solution) {
                println!("{answer}: correct");
            } else {
                println!("{answer}: wrong ({})", feedback.describe());
            }
            Ok(())
        }

        Command::Create { name } => {
            let mut contest = open_contest(&args.data_dir)?;
            print_conference(&contest.create_conference(&name)?)
        }

        Command::List => {
            let contest = open_contest(&args.data_dir)?;
            for c in contest.list_conferences()? {
                println!(
                    "{}\t{}\t{}\t{} submissions",
                    c.id,
                    c.name,
                    if c.active { "active" } else { "closed" },
                    contest.submission_count(&c.id)?
                );
            }
            Ok(())
        }

        Command::Show { id } => {
            print_conference(&open_contest(&args.data_dir)?.conference(&id)?)
        }

        Command::Reshuffle { id } => {
            print_conference(&open_contest(&args.data_dir)?.reshuffle(&id)?)
        }

        Command::Finish { id } => {
            print_conference(&open_contest(&args.data_dir)?.finish(&id)?)
        }

        Command::Reopen { id } => {
            print_conference(&open_contest(&args.data_dir)?.reopen(&id)?)
        }

        Command::Submit {
            id,
            answer,
            name,
            email,
        } => {
            let mut contest = open_contest(&args.data_dir)?;
            let submission = contest.submit(&id, answer, &name, &email)?;
            println!(
                "{}: {}",
                submission.id,
                if submission.correct { "correct" } else { "wrong" }
            );
            Ok(())
        }

        Command::Submissions { id } => {
            let contest = open_contest(&args.data_dir)?;
            for s in contest.submissions(&id)? {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    s.timestamp.to_rfc3339(),
                    s.id,
                    s.name,
                    s.email,
                    s.answer,
                    if s.correct { "correct" } else { "wrong" }
                );
            }
            Ok(())
        }

        Command::Display { id, mode } => {
            let mut contest = open_contest(&args.data_dir)?;
            // Make sure the conference exists before changing its display
            contest.conference(&id)?;
            if let Some(m) = mode {
                contest.set_display_mode(&id, m)?;
            }
            println!("{}", contest.display_mode(&id)?);
            Ok(())
        }

        Command::Spin { id, seed } => {
            let contest = open_contest(&args.data_dir)?;
            let spin = contest.spin_wheel(&id, &mut new_rng(seed))?;
            println!(
                "Winner: {} <{}>  (submission {}, rotation {:.1} degrees)",
                spin.winner.name, spin.winner.email, spin.winner.id, spin.rotation
            );
            Ok(())
        }

        Command::End { id, submission } => {
            print_conference(&open_contest(&args.data_dir)?.end_contest(&id, submission)?)
        }

        Command::Seed {
            id,
            count,
            correct_ratio,
            seed,
        } => {
            let mut contest = open_contest(&args.data_dir)?;
            let submissions =
                contest.seed_submissions(&id, count, correct_ratio, &mut new_rng(seed))?;
            let correct: usize = submissions.iter().filter(|s| s.correct).count();
            println!("{} submissions added, {correct} correct", submissions.len());
            Ok(())
        }
    }
}

/// Generate and verify puzzles, and print them.
fn generate(
    count: usize,
    summary: bool,
    seed: Option<u64>,
    max_attempts: usize,
) -> Result<(), Box<dyn Error>> {
    let mut generator = RandomPuzzle::with_rng(new_rng(seed)).with_max_attempts(max_attempts);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut iterations: usize = 0;
    let mut errors: usize = 0;

    for i in 0..count {
        debug!("Iteration {i}");
        match generator.generate() {
            Ok(puzzle) => {
                total += generator.duration;
                if generator.duration > max {
                    max = generator.duration;
                }
                iterations += generator.iteration;

                // A generated puzzle that does not verify is a bug in the generator
                puzzle.verify()?;
                println!("{}", serde_json::to_string(&puzzle)?);
            }
            Err(e) => {
                errors += 1;
                eprintln!("Error: {e}");
            }
        }
    }

    if summary {
        let generated: usize = count - errors;
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}
            errors = {}",
            total,
            total / generated.max(1) as f32,
            max,
            iterations / generated.max(1),
            errors
        );
    }
    if errors > 0 {
        return Err(format!("{errors} puzzles could not be generated").into());
    }
    Ok(())
}
