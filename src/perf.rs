//! Evaluating and comparing strategies.

use std::{fmt::Display, io::Write, ops::Deref};

#[cfg(feature = "fancy")]
use comfy_table::{Cell, Color, ColumnConstraint, Row, Table, Width};
#[cfg(feature = "stats")]
use fishers_exact::FishersExactPvalues;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "stats")]
use crate::stats::{Tails, WelchsT};
use crate::{
    strategy::{GameResult, Strategy},
    Result, Word, WordleError, MAX_GUESSES,
};

/// A record of one strategy's games after run by the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce [`Summary`] first to cache the computations.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Perf {
    pub(crate) games: Vec<GameResult>,
    pub(crate) aborted: Vec<(Word, String)>,
    strategy_name: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(strat: &dyn Strategy) -> Self {
        Perf {
            games: Vec::new(),
            aborted: Vec::new(),
            strategy_name: format!("{} v{}", strat, strat.version()),
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// The games the strategy finished, in the order the harness ran them.
    pub fn games(&self) -> &[GameResult] {
        &self.games
    }

    /// The secrets of games that were abandoned, with the reason.
    pub fn aborted(&self) -> &[(Word, String)] {
        &self.aborted
    }

    /// Gets the number of games the strategy finished.
    pub fn num_played(&self) -> u32 {
        self.games.len() as u32
    }

    /// Gets the number of games that ended with an error.
    pub fn num_aborted(&self) -> u32 {
        self.aborted.len() as u32
    }

    /// Gets the number of finished games that took more than
    /// [`MAX_GUESSES`] guesses.
    pub fn num_failed(&self) -> u32 {
        self.games.iter().filter(|g| g.failed()).count() as u32
    }

    /// Gets the number of guesses across all finished games.
    pub fn cumulative_guesses(&self) -> u32 {
        self.games.iter().map(|g| g.num_guesses() as u32).sum()
    }

    /// Gets the fewest and the most guesses any finished game took.
    pub fn best_and_worst(&self) -> Option<(u32, u32)> {
        self.games
            .iter()
            .map(|g| g.num_guesses() as u32)
            .minmax()
            .into_option()
    }

    /// Prints the strategy's summary and then a table showing the guesses
    /// for each game.
    #[cfg(feature = "fancy")]
    pub fn print(&self) {
        print!("{}", self);
        let mut table = Table::new();
        if !table.is_tty() {
            table.set_table_width(80);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        let columns = (table.get_table_width().unwrap_or(80) / 9).max(1) as usize;
        for chunk in self.games.chunks(columns) {
            let mut row = Row::new();
            for game in chunk {
                let mut cell = Cell::new(format!("{}\n-----\n{}", game.secret(), game));
                if game.failed() {
                    cell = cell.bg(Color::Red).fg(Color::Black);
                }
                row.add_cell(cell);
            }
            table.add_row(row);
        }
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5));
            columns
        ]);
        println!("{}", table);

        for (secret, reason) in &self.aborted {
            println!("aborted {}: {}", secret, reason);
        }
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary<'_> {
        let (best, worst) = self.best_and_worst().unwrap_or((0, 0));

        let mut bins = vec![0; worst as usize];
        for game in &self.games {
            bins[game.num_guesses() - 1] += 1;
        }

        Summary {
            strategy_name: &self.strategy_name,
            num_played: self.num_played(),
            num_aborted: self.num_aborted(),
            num_failed: self.num_failed(),
            cumulative_guesses: self.cumulative_guesses(),
            best,
            worst,
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let perf_summary = self.to_summary();
        write!(f, "{}", perf_summary)
    }
}

/// A summary of a strategy's performance generated by the
/// [test harness](crate::Harness).
///
/// It is recommended to convert the [`Perf`] struct to this via the
/// [`Perf::to_summary()`] method when you want to use the performance to run
/// statistics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Summary<'a> {
    strategy_name: &'a str,
    num_played: u32,
    num_aborted: u32,
    num_failed: u32,
    cumulative_guesses: u32,
    best: u32,
    worst: u32,
    histogram: Histogram,
}

impl<'a> Summary<'a> {
    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &'a str {
        self.strategy_name
    }

    /// Gets the number of games the strategy finished.
    pub fn num_played(&self) -> u32 {
        self.num_played
    }

    pub fn num_aborted(&self) -> u32 {
        self.num_aborted
    }

    /// Gets the number of finished games that took more than
    /// [`MAX_GUESSES`] guesses.
    pub fn num_failed(&self) -> u32 {
        self.num_failed
    }

    /// Gets the fraction of finished games that took more than
    /// [`MAX_GUESSES`] guesses, or zero if no game finished.
    pub fn failure_rate(&self) -> f32 {
        if self.num_played == 0 {
            return 0.;
        }
        (self.num_failed as f32) / (self.num_played as f32)
    }

    /// Gets the number of guesses across all finished games.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the average number of guesses per finished game, or zero if no
    /// game finished.
    pub fn mean_guesses(&self) -> f32 {
        if self.num_played == 0 {
            return 0.;
        }
        (self.cumulative_guesses as f32) / (self.num_played as f32)
    }

    /// Gets the fewest guesses any finished game took.
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Gets the most guesses any finished game took.
    pub fn worst(&self) -> u32 {
        self.worst
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Compares this summary with a baseline.
    ///
    /// Returns an error when `baseline` is this same summary, or when there
    /// are too few games to compare.
    #[cfg(feature = "stats")]
    pub fn compare<'b>(&self, baseline: &Summary<'b>) -> Result<Comparison<'a, 'b>> {
        if self == baseline {
            return Err(WordleError::SelfComparison);
        }

        Comparison::compare(self.clone(), baseline.clone(), 0.05)
    }

    pub fn print(&self, options: SummaryPrintOptions<'_>) -> Result<()> {
        let mut stdout = std::io::stdout();

        match options.compare {
            #[cfg(feature = "stats")]
            Some(baseline) => {
                let comparison = self.compare(&baseline)?;

                writeln!(stdout, "{:-^80}", self.strategy_name)?;
                if comparison.games_eq() {
                    writeln!(
                        stdout,
                        "Played {} games ({} aborted) and comp. with {}",
                        self.num_played(),
                        self.num_aborted(),
                        baseline.strategy_name()
                    )?;
                } else {
                    writeln!(
                        stdout,
                        "Played {} games ({} aborted) and comp. with {}, {} games",
                        self.num_played(),
                        self.num_aborted(),
                        baseline.strategy_name(),
                        baseline.num_played()
                    )?;
                }
                writeln!(
                    stdout,
                    "Best score: {}, worst score: {}",
                    self.best(),
                    self.worst()
                )?;

                let diff = comparison.failure_rate_diff();
                let verdict = significance(comparison.failures_significant());
                writeln!(
                    stdout,
                    "Failure rate: {:.3} ({}), {} (p = {:.3})",
                    self.failure_rate(),
                    highlight(format!("{:+.3}", diff), diff <= 0.),
                    verdict,
                    comparison.failures_p()
                )?;

                let diff = comparison.mean_guesses_diff();
                let verdict = significance(comparison.guesses_significant());
                writeln!(
                    stdout,
                    "Mean score: {:.2} ({}), {} (p = {:.3})",
                    self.mean_guesses(),
                    highlight(format!("{:+.2}", diff), diff <= 0.),
                    verdict,
                    comparison.guesses_p()
                )?;
            }
            _ => write!(stdout, "{}", self)?,
        }

        if options.histogram {
            write!(stdout, "{}", self.histogram)?;
        }

        Ok(())
    }

    pub fn print_options() -> SummaryPrintOptions<'a> {
        SummaryPrintOptions::default()
    }
}

#[cfg(all(feature = "stats", feature = "fancy"))]
fn significance(significant: bool) -> String {
    use owo_colors::{OwoColorize, Stream};

    if significant {
        "a sig. diff."
            .if_supports_color(Stream::Stdout, |text| text.bold())
            .to_string()
    } else {
        "not a sig. diff.".to_string()
    }
}

#[cfg(all(feature = "stats", not(feature = "fancy")))]
fn significance(significant: bool) -> String {
    if significant { "a sig. diff." } else { "not a sig. diff." }.to_string()
}

#[cfg(all(feature = "stats", feature = "fancy"))]
fn highlight(text: String, better: bool) -> String {
    use owo_colors::{AnsiColors, OwoColorize, Stream};

    let color = if better {
        AnsiColors::Green
    } else {
        AnsiColors::Red
    };
    text.if_supports_color(Stream::Stdout, |text| text.color(color))
        .to_string()
}

#[cfg(all(feature = "stats", not(feature = "fancy")))]
fn highlight(text: String, _better: bool) -> String {
    text
}

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryPrintOptions<'a> {
    compare: Option<Summary<'a>>,
    histogram: bool,
}

impl<'a> SummaryPrintOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares the summary with `baseline` when printing. Without the
    /// `stats` feature this is ignored.
    pub fn compare(self, baseline: &Summary<'a>) -> Self {
        Self {
            compare: Some(baseline.clone()),
            ..self
        }
    }

    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram, ..self }
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.strategy_name)?;
        writeln!(
            f,
            "Played {} games ({} aborted)",
            self.num_played(),
            self.num_aborted()
        )?;
        writeln!(
            f,
            "Best score: {}, worst score: {}",
            self.best(),
            self.worst()
        )?;
        writeln!(
            f,
            "Failure rate: {:.3} ({} games took more than {} guesses)",
            self.failure_rate(),
            self.num_failed(),
            MAX_GUESSES
        )?;
        writeln!(f, "Mean score: {:.2}", self.mean_guesses())?;

        Ok(())
    }
}

/// The comparison of one strategy's summary with a baseline's.
///
/// Mean guesses are compared with Welch's t-test and failure rates with
/// Fisher's exact test.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct Comparison<'a, 'b> {
    this: Summary<'a>,
    baseline: Summary<'b>,
    guesses: WelchsT<f64>,
    failures: FishersExactPvalues,
    alpha: f64,
}

#[cfg(feature = "stats")]
impl<'a, 'b> Comparison<'a, 'b> {
    pub fn compare(this: Summary<'a>, baseline: Summary<'b>, alpha: f64) -> Result<Self> {
        let guesses = WelchsT::two_sample(
            this.histogram.samples(),
            baseline.histogram.samples(),
            alpha,
            Tails::Two,
        )?;

        let failures = fishers_exact::fishers_exact(&[
            this.num_failed(),
            baseline.num_failed(),
            this.num_played() - this.num_failed(),
            baseline.num_played() - baseline.num_failed(),
        ])
        .map_err(|_| WordleError::Stats)?;

        Ok(Self {
            this,
            baseline,
            guesses,
            failures,
            alpha,
        })
    }

    pub fn games_eq(&self) -> bool {
        self.this.num_played == self.baseline.num_played
    }

    pub fn failure_rate_diff(&self) -> f32 {
        self.this.failure_rate() - self.baseline.failure_rate()
    }

    pub fn mean_guesses_diff(&self) -> f32 {
        self.this.mean_guesses() - self.baseline.mean_guesses()
    }

    /// The p-value of the difference in mean guesses.
    pub fn guesses_p(&self) -> f64 {
        self.guesses.p
    }

    pub fn guesses_significant(&self) -> bool {
        self.guesses.is_significant()
    }

    /// The two-tailed p-value of the difference in failure rates.
    pub fn failures_p(&self) -> f64 {
        self.failures.two_tail_pvalue
    }

    pub fn failures_significant(&self) -> bool {
        self.failures.two_tail_pvalue < self.alpha
    }
}

/// How many games took each number of guesses. Bin `i` counts games that
/// took `i + 1` guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Histogram {
    bins: Vec<u32>,
}

impl Histogram {
    /// Expands the histogram back into one guess count per game.
    pub fn samples(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.bins
            .iter()
            .enumerate()
            .flat_map(|(i, &n)| std::iter::repeat((i + 1) as f64).take(n as usize))
    }
}

impl From<Vec<u32>> for Histogram {
    fn from(other: Vec<u32>) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = match self.iter().max() {
            Some(&max) => max,
            None => return Ok(()),
        };
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let label = std::iter::successors(Some(self.len()), |&n| (n >= 10).then(|| n / 10)).count();
        let count_per_mark = (max as f32 / (80. - digits as f32 - label as f32 - 5.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{:>label$} |", i + 1, label = label)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:■>marks$} ({})", "", bin, marks = marks)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::strategy::eliminator::Eliminator;

    fn game(secret: &str, guesses: &[&str]) -> Result<GameResult> {
        Ok(GameResult::new(
            Word::new(secret)?,
            guesses.iter().map(|w| Word::new(w)).collect::<Result<_>>()?,
        ))
    }

    fn perf() -> Result<Perf> {
        let mut perf = Perf::new(&Eliminator::new());
        perf.games.push(game("TENET", &["HELLO", "TENET"])?);
        perf.games.push(game("DEPOT", &["HELLO", "TENET", "DEPOT", "DEPOT"])?);
        perf.games.push(game(
            "CHOKE",
            &["HELLO", "TENET", "DEPOT", "SHARD", "HALES", "HALED", "CHOKE"],
        )?);
        perf.aborted
            .push((Word::new("QUART")?, "no candidates".to_string()));
        Ok(perf)
    }

    #[test]
    fn perf_counts() -> Result<()> {
        let perf = perf()?;
        assert!(perf.strategy_name().starts_with("wobo::Eliminator"));
        assert_eq!(perf.num_played(), 3);
        assert_eq!(perf.num_aborted(), 1);
        assert_eq!(perf.num_failed(), 1);
        assert_eq!(perf.cumulative_guesses(), 13);
        assert_eq!(perf.best_and_worst(), Some((2, 7)));
        Ok(())
    }

    #[test]
    fn summary_matches_perf() -> Result<()> {
        let perf = perf()?;
        let summary = perf.to_summary();
        assert_eq!(summary.num_played(), 3);
        assert_eq!(summary.best(), 2);
        assert_eq!(summary.worst(), 7);
        assert!((summary.mean_guesses() - 13. / 3.).abs() < 1e-6);
        assert!((summary.failure_rate() - 1. / 3.).abs() < 1e-6);
        assert_eq!(&summary.histogram()[..], &[0, 1, 0, 1, 0, 0, 1]);
        assert_eq!(
            summary.histogram().samples().collect::<Vec<_>>(),
            [2., 4., 7.]
        );

        let text = summary.to_string();
        assert!(text.contains("Played 3 games (1 aborted)"));
        assert!(text.contains("Best score: 2, worst score: 7"));
        assert!(text.contains("Failure rate: 0.333"));
        Ok(())
    }

    #[test]
    fn empty_summary() {
        let perf = Perf::new(&Eliminator::new());
        let summary = perf.to_summary();
        assert_eq!(summary.mean_guesses(), 0.);
        assert_eq!(summary.failure_rate(), 0.);
        assert_eq!((summary.best(), summary.worst()), (0, 0));
        assert!(summary.histogram().is_empty());
        assert_eq!(summary.histogram().to_string(), "");
    }

    #[test]
    fn histogram_lines() {
        let histogram = Histogram::from(vec![0, 3, 1]);
        let text = histogram.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1 | (0)");
        assert_eq!(lines[1], "2 |■■■ (3)");
        assert_eq!(lines[2], "3 |■ (1)");
    }

    #[cfg(feature = "stats")]
    #[test]
    fn comparison() -> Result<()> {
        let perf = perf()?;
        let this = perf.to_summary();
        assert!(matches!(this.compare(&this), Err(WordleError::SelfComparison)));

        let mut other = Perf::new(&crate::strategy::Random::new());
        other.games.push(game("TENET", &["HELLO", "TENET"])?);
        other.games.push(game("DEPOT", &["DEPOT"])?);
        other.games.push(game("CHOKE", &["HELLO", "TENET", "CHOKE"])?);
        let baseline = other.to_summary();

        let comparison = this.compare(&baseline)?;
        assert!(comparison.games_eq());
        assert!((comparison.mean_guesses_diff() - (13. - 6.) / 3.).abs() < 1e-6);
        assert!((comparison.failure_rate_diff() - 1. / 3.).abs() < 1e-6);
        assert!(comparison.guesses_p() > 0. && comparison.guesses_p() <= 1.);
        assert!(!comparison.failures_significant());
        Ok(())
    }
}
