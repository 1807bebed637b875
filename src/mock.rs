use std::fmt::Display;

use crate::{
    strategy::{play, Feedback, GameResult, Guesser},
    PuzzleError, Puzzle, Result, Strategy, Word,
};

/// Guesses a fixed list of words in order, whatever the secret.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    guesses: Option<Vec<&'static str>>,
}

impl Mock {
    pub(crate) fn new(guesses: impl Into<Option<Vec<&'static str>>>) -> Self {
        Self {
            guesses: guesses.into(),
        }
    }
}

impl Strategy for Mock {
    fn solve(&self, puzzle: &Puzzle, _dictionary: &[Word]) -> Result<GameResult> {
        let guesses = match &self.guesses {
            None => vec!["NERDS", "TITHE", "DOUBT", "POINT", "PARKA", "SWORD"],
            Some(v) => v.clone(),
        };
        let mut script = Script {
            words: guesses
                .iter()
                .map(|w| Word::new(w))
                .collect::<Result<Vec<_>>>()?
                .into_iter(),
        };

        play(&mut script, puzzle)
    }

    fn version(&self) -> &'static str {
        "1.2.4"
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.guesses)
    }
}

struct Script {
    words: std::vec::IntoIter<Word>,
}

impl Guesser for Script {
    fn guess(&mut self) -> Result<Word> {
        self.words
            .next()
            .ok_or_else(|| PuzzleError::NoCandidates.into())
    }

    fn learn(&mut self, _feedback: &Feedback) {}
}
