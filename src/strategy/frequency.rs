//! Letter statistics over a set of candidate words.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{words::Word, WORD_LEN};

/// How common one letter is among some words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterFrequency {
    /// The number of words containing the letter at least once.
    pub total: u32,
    /// The number of words with the letter at each position.
    pub positional: [u32; WORD_LEN],
}

/// Letter frequencies over a set of words, keyed by letter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frequencies {
    letters: BTreeMap<char, LetterFrequency>,
}

impl Frequencies {
    /// Counts the letters of `words`.
    ///
    /// A word with a repeated letter adds one to that letter's total, but
    /// one to each position the letter occupies.
    pub fn of(words: &[Word]) -> Self {
        let mut letters: BTreeMap<char, LetterFrequency> = BTreeMap::new();

        for word in words {
            for (i, c) in word.chars().enumerate() {
                letters.entry(c).or_default().positional[i] += 1;
            }
            for c in word.chars().unique() {
                letters.entry(c).or_default().total += 1;
            }
        }

        Frequencies { letters }
    }

    pub fn get(&self, c: char) -> Option<&LetterFrequency> {
        self.letters.get(&c)
    }

    /// The number of words containing `c`, or zero if none do.
    pub fn total(&self, c: char) -> u32 {
        self.get(c).map_or(0, |f| f.total)
    }

    /// The number of words with `c` at `position`, or zero if none do.
    pub fn positional(&self, c: char, position: usize) -> u32 {
        self.get(c).map_or(0, |f| f.positional[position])
    }

}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    fn words(list: &[&str]) -> Result<Vec<Word>> {
        list.iter().map(|w| Word::new(w)).collect()
    }

    #[test]
    fn counts_words_not_occurrences() -> Result<()> {
        let freqs = Frequencies::of(&words(&["HELLO"])?);
        for c in ['H', 'E', 'L', 'O'] {
            assert_eq!(freqs.total(c), 1, "letter {}", c);
        }
        assert_eq!(freqs.positional('L', 2), 1);
        assert_eq!(freqs.positional('L', 3), 1);
        assert_eq!(freqs.positional('L', 0), 0);
        assert_eq!(freqs.total('Z'), 0);
        assert!(freqs.get('Z').is_none());
        Ok(())
    }

    #[test]
    fn counts_across_words() -> Result<()> {
        let freqs = Frequencies::of(&words(&["HELLO", "HHHHH", "LLLLL"])?);
        let totals: Vec<_> = "HELO".chars().map(|c| freqs.total(c)).collect();
        assert_eq!(totals, [2, 1, 2, 1]);
        assert_eq!(freqs.positional('H', 0), 2);
        assert_eq!(freqs.positional('H', 1), 1);
        Ok(())
    }
}
