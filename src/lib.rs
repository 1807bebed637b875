#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod words;
pub use words::Word;

pub mod strategy;
pub use strategy::{Feedback, Puzzle, Strategy, Verdict};

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

pub mod progress;
pub use progress::ProgressLog;

#[cfg(feature = "stats")]
mod stats;

#[cfg(test)]
mod mock;

/// The number of letters in every word.
pub const WORD_LEN: usize = 5;

/// Games that take more guesses than this count as failures, as in Wordle.
pub const MAX_GUESSES: usize = 6;

/// A game still unsolved after this many guesses is abandoned.
pub const ROUND_LIMIT: usize = 100;

/// A [`Result`](std::result::Result) defaulting to [`WordleError`].
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wobo` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("cannot compare a strategy with itself")]
    SelfComparison,

    #[error("samples are too small or too uniform to compare")]
    Stats,

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },

    #[cfg(feature = "serde")]
    #[error("trouble serializing the run summary")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The string provided when constructing a [`Word`] does not have
    /// exactly five letters.
    #[error("the string \"{0}\" does not have exactly five letters")]
    InvalidLength(String),

    /// The string provided when constructing a [`Word`] contains something
    /// other than ASCII letters.
    #[error("the string \"{0}\" contains characters that are not letters")]
    InvalidLetter(String),

    /// The colors provided when constructing a [`Feedback`] by hand are not
    /// five of `G`, `Y` and `g`.
    #[error("the colors \"{0}\" are not five of G, Y and g")]
    InvalidColors(String),

    /// Every candidate was eliminated before a fully correct guess. The
    /// feedback history is contradictory or the secret is not in the
    /// dictionary.
    #[error("no candidates remain before the puzzle was solved")]
    NoCandidates,

    /// A strategy was asked to play with an empty dictionary.
    #[error("the dictionary is empty")]
    EmptyDictionary,

    /// The game did not finish within [`ROUND_LIMIT`] guesses.
    #[error("the puzzle was not solved within {0} guesses")]
    RoundLimit(usize),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    #[error("no secrets have been given to the harness")]
    NoSecrets,

    /// A line of a word list is not a valid word.
    #[error("line {line} of the word list is not a valid word")]
    WordList {
        line: usize,
        #[source]
        kind: PuzzleError,
    },
}
