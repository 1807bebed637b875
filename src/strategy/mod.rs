//! The feedback oracle, the game loop, and the strategies that play it.

use std::fmt::{Debug, Display};

use log::debug;

use crate::{words::Word, PuzzleError, Result, MAX_GUESSES, ROUND_LIMIT, WORD_LEN};

pub mod eliminator;
pub use eliminator::{Eliminator, Engine};

pub mod frequency;
pub mod history;

pub mod random;
pub use random::Random;

/// A verdict that indicates the correctness of a letter in a guess.
///
/// [`Puzzle::reveal()`] produces five of these, one for each letter of the
/// guess. `Correct` means that the letter is in the correct position.
/// `Present` means that the letter is in the secret, but not in that position.
/// `Absent` means that the secret has no (more) copies of that letter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Verdict {
    /// The letter guessed is not in the secret, or all of its copies are
    /// already accounted for.
    Absent,

    /// The letter guessed is in the secret, but not there.
    Present,

    /// The letter guessed is in the correct position.
    Correct,
}

impl Verdict {
    /// The color letter for this verdict: `g` for grey, `Y` for yellow and
    /// `G` for green.
    pub fn color(self) -> char {
        match self {
            Verdict::Absent => 'g',
            Verdict::Present => 'Y',
            Verdict::Correct => 'G',
        }
    }

    pub fn from_color(c: char) -> Option<Self> {
        match c {
            'g' => Some(Verdict::Absent),
            'Y' => Some(Verdict::Present),
            'G' => Some(Verdict::Correct),
            _ => None,
        }
    }
}

/// The verdicts for one guess, together with the guess itself.
///
/// Feedback is produced once by [`Puzzle::reveal()`] and never changes
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feedback {
    word: Word,
    verdicts: [Verdict; WORD_LEN],
}

impl Feedback {
    pub fn new(word: Word, verdicts: [Verdict; WORD_LEN]) -> Self {
        Feedback { word, verdicts }
    }

    /// Builds feedback from a color string such as `"GYggG"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wobo::{Feedback, Verdict::*, Word};
    ///
    /// let feedback = Feedback::parse(Word::new("HELLO")?, "GYGgg")?;
    /// assert_eq!(feedback.verdicts(), &[Correct, Present, Correct, Absent, Absent]);
    /// assert!(Feedback::parse(Word::new("HELLO")?, "GYG").is_err());
    /// #
    /// # Ok::<_, wobo::WordleError>(())
    /// ```
    pub fn parse(word: Word, colors: &str) -> Result<Self> {
        let invalid = || PuzzleError::InvalidColors(colors.to_string());
        if colors.chars().count() != WORD_LEN {
            return Err(invalid().into());
        }

        let mut verdicts = [Verdict::Absent; WORD_LEN];
        for (slot, c) in verdicts.iter_mut().zip(colors.chars()) {
            *slot = Verdict::from_color(c).ok_or_else(invalid)?;
        }

        Ok(Feedback::new(word, verdicts))
    }

    /// The guess this feedback grades.
    pub fn word(&self) -> Word {
        self.word
    }

    pub fn verdicts(&self) -> &[Verdict; WORD_LEN] {
        &self.verdicts
    }

    /// Iterates over `(position, letter, verdict)` for each letter of the guess.
    pub fn iter(&self) -> impl Iterator<Item = (usize, char, Verdict)> + '_ {
        self.word
            .chars()
            .zip(self.verdicts.iter().copied())
            .enumerate()
            .map(|(i, (c, v))| (i, c, v))
    }

    /// Returns true if every verdict is [`Verdict::Correct`].
    pub fn is_terminal(&self) -> bool {
        self.verdicts.iter().all(|&v| v == Verdict::Correct)
    }

    /// Counts the letters equal to `c` graded [`Verdict::Correct`] or
    /// [`Verdict::Present`] anywhere in this feedback.
    pub fn colored_of(&self, c: char) -> usize {
        self.iter()
            .filter(|&(_, l, v)| l == c && v != Verdict::Absent)
            .count()
    }

    /// Renders the verdicts as a color string, e.g. `YGggY`.
    pub fn to_color_string(&self) -> String {
        self.verdicts.iter().map(|v| v.color()).collect()
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.word, self.to_color_string())
    }
}

/// A specific Wordle puzzle to solve.
///
/// The puzzle knows its secret and grades guesses against it.
///
/// # Examples
///
/// ```rust
/// use wobo::{Puzzle, Word};
///
/// let puzzle = Puzzle::new(Word::new("TENET")?);
/// let feedback = puzzle.reveal(&Word::new("EEZZN")?);
/// assert_eq!(feedback.to_color_string(), "YGggY");
/// assert!(!feedback.is_terminal());
/// #
/// # Ok::<_, wobo::WordleError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Puzzle {
    secret: Word,
}

impl Puzzle {
    /// Creates a new puzzle from a [`Word`].
    pub fn new(secret: Word) -> Self {
        Puzzle { secret }
    }

    pub fn secret(&self) -> Word {
        self.secret
    }

    /// Grades `guess` against the secret.
    ///
    /// Exact matches are graded first. Every other letter is graded
    /// [`Verdict::Present`] only while the secret holds more copies of it
    /// than the guess has already been credited with, scanning left to right,
    /// and [`Verdict::Absent`] otherwise. For instance, if the secret is
    /// `TENET` and the guess is `EEZZN`, the second `E` is correct, the first
    /// `E` is present because the secret has a second `E`, and the `N` is
    /// present.
    pub fn reveal(&self, guess: &Word) -> Feedback {
        let mut verdicts = [Verdict::Absent; WORD_LEN];

        for (i, verdict) in verdicts.iter_mut().enumerate() {
            if guess.letter(i) == self.secret.letter(i) {
                *verdict = Verdict::Correct;
            }
        }

        for i in 0..WORD_LEN {
            if verdicts[i] == Verdict::Correct {
                continue;
            }
            let c = guess.letter(i);
            let credited = (0..WORD_LEN)
                .filter(|&j| guess.letter(j) == c && verdicts[j] != Verdict::Absent)
                .count();
            if self.secret.count(c) > credited {
                verdicts[i] = Verdict::Present;
            }
        }

        Feedback::new(*guess, verdicts)
    }

    /// Grades a textual guess.
    ///
    /// Returns an error if `guess` is not a five letter word. This is a bug in
    /// the caller or the dictionary, not a game outcome.
    pub fn check(&self, guess: &str) -> Result<Feedback> {
        let guess = Word::new(guess)?;
        Ok(self.reveal(&guess))
    }
}

/// The outcome of one finished game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameResult {
    secret: Word,
    guesses: Vec<Word>,
}

impl GameResult {
    pub(crate) fn new(secret: Word, guesses: Vec<Word>) -> Self {
        GameResult { secret, guesses }
    }

    pub fn secret(&self) -> Word {
        self.secret
    }

    /// The guesses in the order they were made. The last one is the secret.
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    /// Returns true if the game took more than [`MAX_GUESSES`] guesses.
    pub fn failed(&self) -> bool {
        self.num_guesses() > MAX_GUESSES
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.guesses.split_last() {
            for word in rest {
                writeln!(f, "{}", word)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

/// The per-game state of a strategy: it proposes guesses and learns from the
/// feedback they get.
pub trait Guesser {
    /// Proposes the next guess.
    ///
    /// Returns an error if no guess is consistent with what was learned.
    fn guess(&mut self) -> Result<Word>;

    /// Learns from the feedback to the most recent guess.
    fn learn(&mut self, feedback: &Feedback);
}

/// Plays one game: the guesser proposes a guess, the puzzle reveals its
/// feedback and the guesser learns from it, until a guess is fully correct.
///
/// Returns an error if the guesser gives up or the game reaches
/// [`ROUND_LIMIT`] guesses.
pub fn play<G: Guesser + ?Sized>(guesser: &mut G, puzzle: &Puzzle) -> Result<GameResult> {
    let mut guesses = Vec::new();

    while guesses.len() < ROUND_LIMIT {
        let guess = guesser.guess()?;
        let feedback = puzzle.reveal(&guess);
        debug!(
            "{}: guess {} is {}",
            puzzle.secret(),
            guesses.len() + 1,
            feedback
        );
        guesser.learn(&feedback);
        guesses.push(guess);

        if feedback.is_terminal() {
            return Ok(GameResult::new(puzzle.secret(), guesses));
        }
    }

    Err(PuzzleError::RoundLimit(ROUND_LIMIT).into())
}

/// Trait defining a Wordle strategy.
///
/// A strategy is a configured, shareable description of how to play. The
/// [test harness](crate::Harness) hands it puzzles, possibly from several
/// threads at once, so all per-game state belongs in the [`Guesser`] that
/// [`solve()`](Strategy::solve()) creates.
///
/// The harness uses [`Display`] to format the name of the strategy, so do
/// not use linebreaks.
pub trait Strategy: Display + Debug + Sync {
    /// Plays `puzzle` to the end, guessing from `dictionary`.
    fn solve(&self, puzzle: &Puzzle, dictionary: &[Word]) -> Result<GameResult>;

    /// Provides a version for this strategy.
    ///
    /// This should change each time the logic of the strategy changes in
    /// order to produce meaningful comparisons.
    fn version(&self) -> &'static str;
}
