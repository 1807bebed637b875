//! An append-only CSV log of run summaries, for tracking a strategy over
//! time.

use std::{
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use log::info;

use crate::{Result, Summary};

/// A CSV file that gets one `mean,best,worst,timestamp,failure_rate` row per
/// summary.
///
/// The file is created if it does not exist and is never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends a row for `summary`, stamped with the current time.
    pub fn append(&self, summary: &Summary<'_>) -> Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", Self::row(summary, timestamp))?;

        info!(
            "logged progress of {} to {}",
            summary.strategy_name(),
            self.path.display()
        );
        Ok(())
    }

    /// Formats the row for `summary` at `timestamp`, in seconds since the
    /// Unix epoch.
    pub fn row(summary: &Summary<'_>, timestamp: u64) -> String {
        format!(
            "{:.1},{},{},{},{:.3}",
            summary.mean_guesses(),
            summary.best(),
            summary.worst(),
            timestamp,
            summary.failure_rate()
        )
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;
    use crate::{mock::Mock, Harness, Word};

    fn summary_source() -> Result<crate::harness::Record> {
        let dictionary = ["NERDS", "TITHE", "DOUBT", "POINT", "PARKA", "SWORD"]
            .iter()
            .map(|w| Word::new(w))
            .collect::<Result<Vec<_>>>()?;

        Harness::new()
            .quiet()
            .dictionary(dictionary.clone())
            .secrets(vec![dictionary[1], dictionary[4]])
            .test_all()
            .add_strategy(Box::new(Mock::new(None)))
            .run()
    }

    #[test]
    fn row_format() -> Result<()> {
        let record = summary_source()?;
        let summary = record[0].to_summary();

        // TITHE takes 2 guesses, PARKA takes 5
        assert_eq!(
            ProgressLog::row(&summary, 1_650_000_000),
            "3.5,2,5,1650000000,0.000"
        );
        Ok(())
    }

    #[test]
    fn appends_rather_than_truncates() -> Result<()> {
        let path = std::env::temp_dir().join(format!(
            "wobo-progress-{}-{:?}.csv",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = fs::remove_file(&path);

        let record = summary_source()?;
        let summary = record[0].to_summary();
        let log = ProgressLog::new(&path);
        log.append(&summary)?;
        log.append(&summary)?;

        let text = fs::read_to_string(&path)?;
        fs::remove_file(&path)?;

        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        for row in rows {
            let fields: Vec<_> = row.split(',').collect();
            assert_eq!(fields.len(), 5);
            assert_eq!(fields[0], "3.5");
            assert_eq!(fields[4], "0.000");
        }
        Ok(())
    }
}
