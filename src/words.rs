//! Words and word lists.

use std::{fmt::Display, fs, path::Path, str::FromStr};

use crate::{HarnessError, PuzzleError, Result, WordleError, WORD_LEN};

/// A Wordle word.
///
/// This struct represents a possible guess or secret. Its construction is
/// validated, so every instance holds exactly five uppercase ASCII letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    letters: [u8; WORD_LEN],
}

impl Word {
    /// Creates a new [`Word`] from a five letter string.
    ///
    /// Lowercase letters are accepted and uppercased. Returns an error if the
    /// string is not five ASCII letters long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wobo::Word;
    ///
    /// let tenet = Word::new("tenet")?;
    /// assert_eq!(tenet.to_string(), "TENET");
    ///
    /// assert!(Word::new("tene").is_err());
    /// assert!(Word::new("ten3t").is_err());
    /// #
    /// # Ok::<_, wobo::WordleError>(())
    /// ```
    pub fn new(word: &str) -> Result<Self> {
        if word.chars().count() != WORD_LEN {
            return Err(PuzzleError::InvalidLength(word.to_string()).into());
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PuzzleError::InvalidLetter(word.to_string()).into());
        }

        let mut letters = [0; WORD_LEN];
        for (slot, b) in letters.iter_mut().zip(word.bytes()) {
            *slot = b.to_ascii_uppercase();
        }

        Ok(Word { letters })
    }

    /// Returns the letter at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not less than [`WORD_LEN`].
    pub fn letter(&self, i: usize) -> char {
        self.letters[i] as char
    }

    /// Iterates over the letters of the word in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| b as char)
    }

    /// Counts the occurrences of `c` in the word.
    pub fn count(&self, c: char) -> usize {
        self.chars().filter(|&l| l == c).count()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars().any(|l| l == c)
    }

    /// Packs the letters into an integer, used to derive per-game seeds.
    pub(crate) fn packed(&self) -> u64 {
        self.letters
            .iter()
            .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b))
    }
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self> {
        Word::new(s)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.chars() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Parses a word list with one word per line.
///
/// Lines are trimmed and uppercased and blank lines are skipped. The order of
/// the list is kept, since guess scoring breaks ties by it. Any other line
/// that is not a five letter word is an error naming its (1-based) line
/// number.
pub fn parse_word_list(text: &str) -> Result<Vec<Word>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, word)| {
            Word::new(word).map_err(|e| match e {
                WordleError::Puzzle { kind } => HarnessError::WordList { line, kind }.into(),
                other => other,
            })
        })
        .collect()
}

/// Reads and parses a word list file. See [`parse_word_list()`].
pub fn read_word_list(path: impl AsRef<Path>) -> Result<Vec<Word>> {
    let text = fs::read_to_string(path)?;
    parse_word_list(&text)
}
