use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use wobo::{
    harness::Harness,
    strategy::{Eliminator, Random, Strategy},
    words::read_word_list,
    Puzzle, Result, Word,
};

/// Benchmarks the elimination engine over many simulated Wordle games.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays every strategy on many secrets and reports how they did.
    Bench(Bench),

    /// Plays a single game and prints it guess by guess.
    Play {
        /// The secret to play against.
        secret: Word,

        /// The dictionary to guess from, one word per line.
        #[clap(short, long)]
        dictionary: PathBuf,

        #[clap(short, long, default_value = "15")]
        yellow_bonus: f64,
    },
}

#[derive(Args, Debug)]
struct Bench {
    /// The dictionary to guess from, one word per line.
    #[clap(short, long)]
    dictionary: PathBuf,

    /// The secrets to play, one word per line. Defaults to the dictionary.
    #[clap(short, long)]
    secrets: Option<PathBuf>,

    /// How many secrets to play, chosen at random.
    #[clap(short, long, default_value = "100")]
    num: usize,

    /// Plays every secret instead of a random selection.
    #[clap(short, long)]
    all: bool,

    /// The yellow bonus of an Eliminator to test. Repeat to compare several;
    /// the first is the baseline.
    #[clap(short, long)]
    yellow_bonus: Vec<f64>,

    /// Compares yellow bonuses from 1 to 91 in steps of 10.
    #[clap(long)]
    sweep: bool,

    /// Also plays a strategy that guesses any remaining candidate.
    #[clap(short, long)]
    random: bool,

    /// Appends one CSV row per strategy to this file.
    #[clap(short, long)]
    progress: Option<PathBuf>,

    /// Writes the summaries to this file as JSON.
    #[clap(short, long)]
    json: Option<PathBuf>,

    /// Seeds the choice of secrets and the random strategy.
    #[clap(long)]
    seed: Option<u64>,

    /// Shows a progress bar.
    #[clap(short, long)]
    verbose: bool,
}

impl Bench {
    fn strategies(&self) -> Vec<Box<dyn Strategy>> {
        let bonuses: Vec<f64> = if self.sweep {
            (1..=91).step_by(10).map(f64::from).collect()
        } else {
            self.yellow_bonus.clone()
        };

        let mut strategies: Vec<Box<dyn Strategy>> = if bonuses.is_empty() {
            vec![Box::new(Eliminator::new())]
        } else {
            bonuses
                .into_iter()
                .map(|bonus| Box::new(Eliminator::new().yellow_bonus(bonus)) as Box<dyn Strategy>)
                .collect()
        };

        if self.random {
            let random = match self.seed {
                Some(seed) => Random::new().seed(seed),
                None => Random::new(),
            };
            strategies.push(Box::new(random));
        }
        strategies
    }

    fn run(&self) -> Result<()> {
        let dictionary = read_word_list(&self.dictionary)?;
        let strategies = self.strategies();
        let mut harness = Harness::new().dictionary(dictionary);

        if let Some(path) = &self.secrets {
            harness = harness.secrets(read_word_list(path)?);
        }
        harness = if self.all {
            harness.test_all()
        } else {
            harness.test_num(self.num)
        };
        if let Some(seed) = self.seed {
            harness = harness.seed(seed);
        }
        if self.verbose {
            harness = harness.verbose();
        }
        let compare = strategies.len() > 1;
        let mut strategies = strategies.into_iter();
        if let Some(first) = strategies.next() {
            harness = harness.add_strategy(first);
            if compare {
                harness = harness.and_baseline();
            }
        }
        harness = harness.add_strategies(strategies.collect());

        let record = harness.run()?;
        record.print_report()?;

        if let Some(path) = &self.progress {
            record.append_progress(path)?;
            info!("appended progress to {}", path.display());
        }
        if let Some(path) = &self.json {
            record.write_json(path)?;
            info!("wrote summaries to {}", path.display());
        }

        Ok(())
    }
}

fn play(secret: Word, dictionary: PathBuf, yellow_bonus: f64) -> Result<()> {
    let dictionary = read_word_list(dictionary)?;
    let puzzle = Puzzle::new(secret);
    let game = Eliminator::new()
        .yellow_bonus(yellow_bonus)
        .solve(&puzzle, &dictionary)?;

    for (i, guess) in game.guesses().iter().enumerate() {
        println!("{:>3}  {}", i + 1, puzzle.reveal(guess));
    }
    if game.failed() {
        println!("took {} guesses, more than {}", game.num_guesses(), wobo::MAX_GUESSES);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Bench(bench) => bench.run(),
        Command::Play {
            secret,
            dictionary,
            yellow_bonus,
        } => play(secret, dictionary, yellow_bonus),
    }
}
