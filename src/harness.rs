//! The test harness for running Wordle strategies.

use std::{ops::Deref, path::Path};

use either::Either;
#[cfg(feature = "fancy")]
use indicatif::ProgressBar;
use log::{error, info};
use rand::{rngs::StdRng, seq::index::sample, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    perf::Perf,
    progress::ProgressLog,
    strategy::{GameResult, Puzzle, Strategy},
    HarnessError, PuzzleError, Result, Summary, Word, WordleError,
};

/// A test harness that can run many strategies on many puzzles.
///
/// When you want to test your strategies, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// # Examples
///
/// ```rust
/// # use wobo::{harness::Harness, words::parse_word_list};
/// use wobo::strategy::Eliminator;
///
/// let dictionary = parse_word_list("HELLO\nHALES\nDEPOT\nCHOKE\nSHARD")?;
/// let harness = Harness::new()
///     .quiet()
///     .dictionary(dictionary)
///     .add_strategy(Box::new(Eliminator::new()))
///     .test_num(3)
///     .seed(7);
///
/// let results = harness.run()?;
/// assert_eq!(results[0].num_played(), 3);
/// # Ok::<(), wobo::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    strategies: Vec<Box<dyn Strategy>>,
    dictionary: Vec<Word>,
    secrets: Option<Vec<Word>>,
    verbose: bool,
    num_secrets: Option<usize>,
    baseline: Option<usize>,
    seed: Option<u64>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            strategies: Vec::new(),
            dictionary: Vec::new(),
            secrets: None,
            verbose: false,
            num_secrets: Some(100),
            baseline: None,
            seed: None,
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies
    /// 2. quiet mode
    /// 3. runs each strategy on 100 secrets chosen at random
    /// 4. draws secrets from the dictionary
    /// 5. does not compare against a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// With the `fancy` feature this shows a progress bar.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Sets the words every strategy guesses from.
    pub fn dictionary(self, dictionary: Vec<Word>) -> Self {
        Harness { dictionary, ..self }
    }

    /// Sets the words to draw secrets from. Without this the secrets are
    /// drawn from the dictionary.
    pub fn secrets(self, secrets: Vec<Word>) -> Self {
        Harness {
            secrets: Some(secrets),
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    pub fn add_strategy(self, strat: Box<dyn Strategy>) -> Self {
        let mut strategies = self.strategies;
        strategies.push(strat);
        Harness { strategies, ..self }
    }

    /// Adds a [`Vec`] of strategies to the harness for testing.
    pub fn add_strategies(self, strats: Vec<Box<dyn Strategy>>) -> Self {
        let mut strategies = self.strategies;
        strategies.extend(strats);
        Harness { strategies, ..self }
    }

    /// Adds a strategy to the harness for testing and sets it as the baseline
    /// for comparison.
    pub fn add_baseline(self, strat: Box<dyn Strategy>) -> Self {
        self.add_strategy(strat).and_baseline()
    }

    /// Sets the most recently added strategy as the baseline for comparisons.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: self.strategies.len().checked_sub(1),
            ..self
        }
    }

    /// Sets the harness to test each strategy on every secret.
    pub fn test_all(self) -> Self {
        Harness {
            num_secrets: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random secrets, or on
    /// every secret if there are fewer than `n`.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_secrets: Some(n),
            ..self
        }
    }

    /// Seeds the choice of random secrets so that runs can be repeated.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            seed: Some(seed),
            ..self
        }
    }

    /// Picks the secrets to play, in the order they appear in `pool`.
    fn choose_secrets<'p>(&self, pool: &'p [Word]) -> Either<&'p [Word], Vec<Word>> {
        match self.num_secrets {
            Some(n) if n < pool.len() => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let mut indices = sample(&mut rng, pool.len(), n).into_vec();
                indices.sort_unstable();
                Either::Right(indices.into_iter().map(|i| pool[i]).collect())
            }
            _ => Either::Left(pool),
        }
    }

    /// Runs the harness and produces performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness. A game that ends with an error is logged and counted
    /// as aborted; it does not stop the run.
    pub fn run(&self) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }
        if self.dictionary.is_empty() {
            return Err(PuzzleError::EmptyDictionary.into());
        }
        let pool = self.secrets.as_deref().unwrap_or(&self.dictionary);
        if pool.is_empty() {
            return Err(HarnessError::NoSecrets.into());
        }

        let secrets = self.choose_secrets(pool);
        info!(
            "running {} strategies on {} secrets with {} dictionary words",
            self.strategies.len(),
            secrets.len(),
            self.dictionary.len()
        );

        let mut perfs: Vec<_> = self
            .strategies
            .iter()
            .map(|strat| Perf::new(strat.as_ref()))
            .collect();

        for (secret, results) in self.play_secrets(&secrets) {
            for ((result, perf), strategy) in results
                .into_iter()
                .zip(perfs.iter_mut())
                .zip(&self.strategies)
            {
                match result {
                    Ok(game) => perf.games.push(game),
                    Err(e) => {
                        let reason = match e {
                            WordleError::Puzzle { kind } => kind.to_string(),
                            other => other.to_string(),
                        };
                        error!("{} aborted on {}: {}", strategy, secret, reason);
                        perf.aborted.push((secret, reason));
                    }
                }
            }
        }

        Ok(Record::new(perfs, self.baseline))
    }

    /// Plays one game of each strategy.
    fn play_secret(&self, secret: Word) -> (Word, Vec<Result<GameResult>>) {
        let puzzle = Puzzle::new(secret);
        let results = self
            .strategies
            .iter()
            .map(|strategy| strategy.solve(&puzzle, &self.dictionary))
            .collect();
        (secret, results)
    }

    #[cfg(all(feature = "parallel", feature = "fancy"))]
    fn play_secrets(&self, secrets: &[Word]) -> Vec<(Word, Vec<Result<GameResult>>)> {
        use indicatif::ParallelProgressIterator;

        let bar = self.progress_bar(secrets.len());
        let results = secrets
            .par_iter()
            .progress_with(bar.clone())
            .map(|&secret| self.play_secret(secret))
            .collect();
        bar.finish_and_clear();
        results
    }

    #[cfg(all(feature = "parallel", not(feature = "fancy")))]
    fn play_secrets(&self, secrets: &[Word]) -> Vec<(Word, Vec<Result<GameResult>>)> {
        secrets
            .par_iter()
            .map(|&secret| self.play_secret(secret))
            .collect()
    }

    #[cfg(all(not(feature = "parallel"), feature = "fancy"))]
    fn play_secrets(&self, secrets: &[Word]) -> Vec<(Word, Vec<Result<GameResult>>)> {
        use indicatif::ProgressIterator;

        let bar = self.progress_bar(secrets.len());
        let results = secrets
            .iter()
            .progress_with(bar.clone())
            .map(|&secret| self.play_secret(secret))
            .collect();
        bar.finish_and_clear();
        results
    }

    #[cfg(all(not(feature = "parallel"), not(feature = "fancy")))]
    fn play_secrets(&self, secrets: &[Word]) -> Vec<(Word, Vec<Result<GameResult>>)> {
        secrets
            .iter()
            .map(|&secret| self.play_secret(secret))
            .collect()
    }

    #[cfg(feature = "fancy")]
    fn progress_bar(&self, len: usize) -> ProgressBar {
        if self.verbose {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::hidden()
        }
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints performance
    /// summaries of each strategy.
    pub fn run_and_summarize(&self) -> Result<Record> {
        let perfs = self.run()?;
        for perf in perfs.iter() {
            println!("{}", perf);
        }
        Ok(perfs)
    }
}

/// The performances of every strategy from one harness run.
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// The performance of the baseline strategy, if one was set.
    pub fn baseline(&self) -> Option<&Perf> {
        self.baseline.and_then(|n| self.perfs.get(n))
    }

    /// Prints every summary with its histogram, compared with the baseline
    /// when there is one.
    pub fn print_report(&self) -> Result<()> {
        if let Some(baseline) = self.baseline() {
            let baseline_summary = baseline.to_summary();

            for perf in self.perfs.iter() {
                let summary = perf.to_summary();
                match summary.print(
                    Summary::print_options()
                        .compare(&baseline_summary)
                        .histogram(true),
                ) {
                    Ok(()) => {}
                    Err(WordleError::SelfComparison) | Err(WordleError::Stats) => {
                        summary.print(Summary::print_options().histogram(true))?
                    }
                    Err(e) => return Err(e),
                }
            }
        } else {
            for perf in self.perfs.iter() {
                let summary = perf.to_summary();
                summary.print(Summary::print_options().histogram(true))?;
            }
        }

        Ok(())
    }

    /// Writes the summaries of every strategy to `path` as a JSON array.
    #[cfg(feature = "serde")]
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        use std::{fs::File, io::BufWriter};

        let summaries: Vec<_> = self.perfs.iter().map(Perf::to_summary).collect();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &summaries)?;
        Ok(())
    }

    /// Appends one progress row per strategy to the CSV file at `path`.
    pub fn append_progress(&self, path: impl AsRef<Path>) -> Result<()> {
        let log = ProgressLog::new(path.as_ref());
        for perf in self.perfs.iter() {
            log.append(&perf.to_summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        mock::Mock,
        strategy::{Eliminator, Random},
        words::parse_word_list,
    };

    fn dictionary() -> Vec<Word> {
        parse_word_list("NERDS\nTITHE\nDOUBT\nPOINT\nPARKA\nSWORD\nHELLO\nDEPOT")
            .unwrap()
    }

    #[test]
    fn no_strategies() {
        let res = Harness::new().dictionary(dictionary()).run();
        assert!(matches!(
            res,
            Err(WordleError::Harness {
                kind: HarnessError::NoStrategiesAdded
            })
        ));
    }

    #[test]
    fn empty_dictionary() {
        let res = Harness::new().add_strategy(Box::new(Mock::new(None))).run();
        assert!(matches!(
            res,
            Err(WordleError::Puzzle {
                kind: PuzzleError::EmptyDictionary
            })
        ));
    }

    #[test]
    fn no_secrets() {
        let res = Harness::new()
            .dictionary(dictionary())
            .secrets(Vec::new())
            .add_strategy(Box::new(Mock::new(None)))
            .run();
        assert!(matches!(
            res,
            Err(WordleError::Harness {
                kind: HarnessError::NoSecrets
            })
        ));
    }

    #[test]
    fn runs_every_strategy_on_every_secret() -> Result<()> {
        let dictionary = dictionary();
        let record = Harness::new()
            .dictionary(dictionary.clone())
            .add_strategy(Box::new(Eliminator::new()))
            .add_baseline(Box::new(Random::new().seed(1)))
            .test_all()
            .run()?;

        assert_eq!(record.len(), 2);
        assert!(record[0].strategy_name().starts_with("wobo::Eliminator"));
        assert!(record[1].strategy_name().starts_with("wobo::Random"));
        assert_eq!(
            record.baseline().map(Perf::strategy_name),
            Some(record[1].strategy_name())
        );

        for perf in record.iter() {
            assert_eq!(perf.num_played() as usize, dictionary.len());
            assert_eq!(perf.num_aborted(), 0);
            let secrets: Vec<_> = perf.games().iter().map(GameResult::secret).collect();
            assert_eq!(secrets, dictionary);
        }
        Ok(())
    }

    #[test]
    fn samples_are_seeded() -> Result<()> {
        let harness = Harness::new()
            .dictionary(dictionary())
            .add_strategy(Box::new(Mock::new(None)))
            .test_num(3)
            .seed(11);

        let first = harness.run()?;
        let second = harness.run()?;
        // the script cannot solve every secret, so some games may abort
        assert_eq!(first[0].num_played() + first[0].num_aborted(), 3);
        assert_eq!(first[0].games(), second[0].games());
        assert_eq!(first[0].aborted(), second[0].aborted());

        let solvable = harness.secrets(dictionary()[..6].to_vec()).run()?;
        assert_eq!(solvable[0].num_played(), 3);
        assert_eq!(solvable[0].num_aborted(), 0);
        Ok(())
    }

    #[test]
    fn test_num_larger_than_pool() -> Result<()> {
        let record = Harness::new()
            .dictionary(dictionary())
            .add_strategy(Box::new(Mock::new(None)))
            .test_num(1000)
            .run()?;
        assert_eq!(record[0].num_played(), 6);
        assert_eq!(record[0].num_aborted(), 2);
        Ok(())
    }

    #[test]
    fn aborted_games_are_counted() -> Result<()> {
        let dictionary = dictionary();
        let record = Harness::new()
            .dictionary(dictionary.clone())
            .secrets(vec![dictionary[0], dictionary[6]])
            .add_strategy(Box::new(Mock::new(vec!["NERDS"])))
            .run()?;

        let perf = &record[0];
        assert_eq!(perf.num_played(), 1);
        assert_eq!(perf.num_aborted(), 1);
        assert_eq!(perf.aborted()[0].0, dictionary[6]);
        assert_eq!(perf.to_summary().mean_guesses(), 1.);
        Ok(())
    }

    #[test]
    fn baseline_needs_a_strategy() {
        let harness = Harness::new().and_baseline();
        assert_eq!(harness.baseline, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn writes_json() -> Result<()> {
        let record = Harness::new()
            .dictionary(dictionary())
            .add_strategy(Box::new(Mock::new(None)))
            .test_all()
            .run()?;

        let path = std::env::temp_dir().join(format!("wobo-record-{}.json", std::process::id()));
        record.write_json(&path)?;
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        std::fs::remove_file(&path)?;

        assert_eq!(json[0]["num_played"], 6);
        assert_eq!(json[0]["num_aborted"], 2);
        Ok(())
    }
}
