//! The frequency-scoring elimination strategy.

use std::{cmp::Reverse, collections::HashSet, fmt::Display};

use itertools::Itertools;
use log::debug;

use super::{
    frequency::Frequencies, history::FeedbackHistory, play, Feedback, GameResult, Guesser, Puzzle,
    Strategy, Verdict,
};
use crate::{words::Word, PuzzleError, Result, WORD_LEN};

/// Score added for a letter already known to be correct where it stands.
const CONFIRMATION_BONUS: f64 = 0.1;

/// A Wordle strategy that guesses the word expected to reveal the most.
///
/// While many candidates remain, every dictionary word is scored by how
/// common its untested letters are among the candidates, and the best one is
/// guessed even if it cannot be the secret. Once few candidates remain, the
/// best ranked candidate is guessed instead.
///
/// # Examples
///
/// ```rust
/// use wobo::{strategy::Eliminator, words::parse_word_list, Puzzle, Strategy};
///
/// let dictionary = parse_word_list("HELLO\nDEPOT\nTENET\nCHOKE\nSHARD")?;
/// let strategy = Eliminator::new().yellow_bonus(10.0);
///
/// let result = strategy.solve(&Puzzle::new(dictionary[2]), &dictionary)?;
/// assert_eq!(result.guesses().last(), Some(&dictionary[2]));
/// #
/// # Ok::<_, wobo::WordleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Eliminator {
    yellow_bonus: f64,
    explore_threshold: usize,
}

impl Default for Eliminator {
    fn default() -> Self {
        Eliminator {
            yellow_bonus: 15.0,
            explore_threshold: 3,
        }
    }
}

impl Eliminator {
    /// Creates the strategy with a yellow bonus of 15 and an explore
    /// threshold of 3.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the multiplier applied to the frequency of a letter known to be
    /// present when it is tried in a new position.
    pub fn yellow_bonus(self, yellow_bonus: f64) -> Self {
        Eliminator {
            yellow_bonus,
            ..self
        }
    }

    /// Sets how many candidates must remain for the strategy to keep probing
    /// with the whole dictionary rather than guess a candidate.
    pub fn explore_threshold(self, explore_threshold: usize) -> Self {
        Eliminator {
            explore_threshold,
            ..self
        }
    }

    /// Creates the per-game engine for `dictionary`.
    pub fn engine<'d>(&self, dictionary: &'d [Word]) -> Engine<'d> {
        Engine {
            yellow_bonus: self.yellow_bonus,
            explore_threshold: self.explore_threshold,
            ..Engine::new(dictionary)
        }
    }
}

impl Strategy for Eliminator {
    fn solve(&self, puzzle: &Puzzle, dictionary: &[Word]) -> Result<GameResult> {
        if dictionary.is_empty() {
            return Err(PuzzleError::EmptyDictionary.into());
        }
        play(&mut self.engine(dictionary), puzzle)
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Eliminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wobo::Eliminator (yellow bonus: {})", self.yellow_bonus)
    }
}

/// The state of one [`Eliminator`] game.
///
/// The engine owns the candidates, the words still consistent with all
/// feedback so far, and the history of that feedback. Candidates are only
/// ever removed.
#[derive(Debug, Clone)]
pub struct Engine<'d> {
    dictionary: &'d [Word],
    candidates: Vec<Word>,
    history: FeedbackHistory,
    yellow_bonus: f64,
    explore_threshold: usize,
}

impl<'d> Engine<'d> {
    /// Creates an engine with the default configuration whose candidates are
    /// the whole dictionary.
    pub fn new(dictionary: &'d [Word]) -> Self {
        let config = Eliminator::default();
        Engine {
            dictionary,
            candidates: dictionary.to_vec(),
            history: FeedbackHistory::new(),
            yellow_bonus: config.yellow_bonus,
            explore_threshold: config.explore_threshold,
        }
    }

    /// The words still consistent with all feedback, best ranked first.
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    pub fn history(&self) -> &FeedbackHistory {
        &self.history
    }

    /// Letter frequencies over the current candidates.
    pub fn frequencies(&self) -> Frequencies {
        Frequencies::of(&self.candidates)
    }

    /// Narrows the candidates with `feedback` and records it.
    ///
    /// Afterwards, positions on which every remaining candidate agrees are
    /// recorded as correct, and the candidates are ranked by
    /// [`learn_score()`](Self::learn_score()).
    pub fn learn(&mut self, feedback: &Feedback) {
        let before = self.candidates.len();

        if !feedback.is_terminal() {
            let guess = feedback.word();
            self.candidates.retain(|w| *w != guess);
        }

        for (i, c, verdict) in feedback.iter() {
            match verdict {
                Verdict::Absent => {
                    let enough = feedback.colored_of(c);
                    self.candidates
                        .retain(|w| w.count(c) <= enough && w.letter(i) != c);
                }
                Verdict::Correct => self.candidates.retain(|w| w.letter(i) == c),
                Verdict::Present => self
                    .candidates
                    .retain(|w| w.contains(c) && w.letter(i) != c),
            }
        }
        self.history.record_feedback(feedback);

        self.imply_greens();
        self.rank();

        debug!(
            "{} left {} of {} candidates",
            feedback,
            self.candidates.len(),
            before
        );
    }

    /// Records a correct fact for each position on which all candidates
    /// agree.
    fn imply_greens(&mut self) {
        let first = match self.candidates.first() {
            Some(&w) => w,
            None => return,
        };

        let mut universal = [true; WORD_LEN];
        for (prev, word) in self.candidates.iter().tuple_windows() {
            for (i, agreed) in universal.iter_mut().enumerate() {
                *agreed = *agreed && prev.letter(i) == word.letter(i);
            }
            if universal.iter().all(|&agreed| !agreed) {
                return;
            }
        }

        for (i, &agreed) in universal.iter().enumerate() {
            if agreed {
                self.history.record(first.letter(i), Verdict::Correct, i);
            }
        }
    }

    /// Sorts the candidates by descending [`learn_score()`](Self::learn_score()).
    /// Equal scores keep their order.
    pub fn rank(&mut self) {
        let mut scored: Vec<_> = self
            .candidates
            .iter()
            .map(|&w| (w, self.learn_score(&w)))
            .collect();
        scored.sort_by_key(|&(_, score)| Reverse(score));
        self.candidates = scored.into_iter().map(|(w, _)| w).collect();
    }

    /// Scores how representative `word` is of the candidates.
    ///
    /// Each position adds four for every candidate sharing the letter there
    /// and one for every candidate containing the letter anywhere.
    pub fn learn_score(&self, word: &Word) -> usize {
        let hard: usize = word
            .chars()
            .enumerate()
            .map(|(i, c)| self.candidates.iter().filter(|w| w.letter(i) == c).count())
            .sum();
        let soft: usize = word
            .chars()
            .map(|c| self.candidates.iter().filter(|w| w.contains(c)).count())
            .sum();

        4 * hard + soft
    }

    /// Scores `word` by the information it is expected to reveal.
    ///
    /// Repeated letters count once. Letters whose verdict at a position is
    /// already known add nothing, except that a known correct letter adds a
    /// small confirmation bonus. An untested letter adds its total and
    /// positional frequencies among the candidates, and a letter known to be
    /// present elsewhere adds the same times the yellow bonus.
    pub fn eliminator_score(&self, word: &Word, frequencies: &Frequencies) -> f64 {
        let history = &self.history;
        let mut scored = HashSet::new();
        let mut score = 0.0;

        for (i, c) in word.chars().enumerate() {
            if history.has_seen_at(c, Verdict::Correct, i) {
                score += CONFIRMATION_BONUS;
            } else if history.has_seen_at(c, Verdict::Present, i)
                || history.has_seen_at(c, Verdict::Absent, i)
                || scored.contains(&c)
                || history.has_seen(c, Verdict::Correct)
            {
                continue;
            } else if history.has_seen(c, Verdict::Present) {
                score += f64::from(frequencies.total(c) + frequencies.positional(c, i))
                    * self.yellow_bonus;
            } else {
                score += f64::from(frequencies.total(c) + frequencies.positional(c, i));
            }
            scored.insert(c);
        }

        score
    }

    /// Finds the dictionary word with the highest
    /// [`eliminator_score()`](Self::eliminator_score()). Ties go to the
    /// earliest word in the dictionary.
    pub fn best_eliminator_word(&self) -> Option<Word> {
        let frequencies = self.frequencies();
        let mut best: Option<(Word, f64)> = None;

        for word in self.dictionary {
            let score = self.eliminator_score(word, &frequencies);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((*word, score));
            }
        }

        best.map(|(word, _)| word)
    }
}

impl<'d> Guesser for Engine<'d> {
    /// Probes with [`best_eliminator_word()`](Engine::best_eliminator_word())
    /// while more candidates remain than the explore threshold, then guesses
    /// the best ranked candidate.
    fn guess(&mut self) -> Result<Word> {
        if self.candidates.is_empty() {
            return Err(PuzzleError::NoCandidates.into());
        }

        let guess = if self.candidates.len() > self.explore_threshold {
            self.best_eliminator_word()
        } else {
            self.candidates.first().copied()
        };

        guess.ok_or_else(|| PuzzleError::EmptyDictionary.into())
    }

    fn learn(&mut self, feedback: &Feedback) {
        Engine::learn(self, feedback)
    }
}
