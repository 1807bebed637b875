//! A baseline strategy that guesses blindly among the candidates.

use std::fmt::Display;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::{play, Engine, Feedback, GameResult, Guesser, Puzzle, Strategy};
use crate::{words::Word, PuzzleError, Result};

/// A Wordle strategy that guesses a random word that could still be the
/// secret.
///
/// It narrows the candidates exactly like [`Eliminator`](super::Eliminator)
/// but never scores them, which makes it a useful baseline to compare
/// against. With a seed, every game is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Random {
    seed: Option<u64>,
}

impl Random {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the random choices. Each game mixes in its secret, so different
    /// games still make different choices.
    pub fn seed(self, seed: u64) -> Self {
        Random { seed: Some(seed) }
    }
}

impl Strategy for Random {
    fn solve(&self, puzzle: &Puzzle, dictionary: &[Word]) -> Result<GameResult> {
        if dictionary.is_empty() {
            return Err(PuzzleError::EmptyDictionary.into());
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ puzzle.secret().packed()),
            None => StdRng::from_entropy(),
        };
        let mut guesser = RandomGuesser {
            engine: Engine::new(dictionary),
            rng,
        };

        play(&mut guesser, puzzle)
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wobo::Random")?;
        if let Some(seed) = self.seed {
            write!(f, " (seed: {})", seed)?;
        }
        Ok(())
    }
}

struct RandomGuesser<'d> {
    engine: Engine<'d>,
    rng: StdRng,
}

impl<'d> Guesser for RandomGuesser<'d> {
    fn guess(&mut self) -> Result<Word> {
        self.engine
            .candidates()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| PuzzleError::NoCandidates.into())
    }

    fn learn(&mut self, feedback: &Feedback) {
        self.engine.learn(feedback);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::words::parse_word_list;

    #[test]
    fn solves_every_secret() -> Result<()> {
        let dictionary = parse_word_list("HELLO\nHALES\nHELAS\nWORLD\nDEPOT\nCHOKE\nHALED")?;
        let strategy = Random::new().seed(7);

        for &secret in &dictionary {
            let result = strategy.solve(&Puzzle::new(secret), &dictionary)?;
            assert_eq!(result.guesses().last(), Some(&secret));
            assert!(result.num_guesses() <= dictionary.len());
        }
        Ok(())
    }

    #[test]
    fn seeded_games_repeat() -> Result<()> {
        let dictionary = parse_word_list("HELLO\nHALES\nHELAS\nWORLD\nDEPOT\nCHOKE\nHALED")?;
        let puzzle = Puzzle::new(dictionary[3]);
        let strategy = Random::new().seed(42);

        let first = strategy.solve(&puzzle, &dictionary)?;
        let second = strategy.solve(&puzzle, &dictionary)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn name_includes_seed() {
        assert_eq!(Random::new().to_string(), "wobo::Random");
        assert_eq!(Random::new().seed(3).to_string(), "wobo::Random (seed: 3)");
    }
}
