//! External statistics sinks.
//!
//! The environment pushes immutable snapshots out through the `StatsSink`
//! trait; nothing in the simulation core depends on where they end up.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use super::result::TimestepResult;
use super::stats::EpisodeRecord;
use crate::core::AgentId;

/// Collaborator receiving per-tick results and end-of-episode records.
pub trait StatsSink {
    /// Called once per agent per tick, with the result handed to that agent.
    ///
    /// Default: ignore. Most sinks only care about finished episodes.
    fn record_timestep(&mut self, agent: AgentId, result: &TimestepResult) {
        let _ = (agent, result);
    }

    /// Called once per agent when that agent's episode ends.
    fn episode_end(&mut self, agent: AgentId, record: &EpisodeRecord);
}

/// CSV writer emitting one row per finished agent episode.
///
/// The header is written lazily before the first row; rows carry a leading
/// `agent` column in front of the `EpisodeRecord` columns.
pub struct CsvStatsWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    header_written: bool,
}

impl CsvStatsWriter {
    /// Create a writer at the given path, truncating any existing file.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = File::create(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            header_written: false,
        })
    }

    /// Create a writer at `snake-env-<YYYYmmdd-HHMMSS>.csv` inside `dir`.
    pub fn timestamped(dir: impl AsRef<Path>) -> io::Result<Self> {
        let name = format!("snake-env-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
        Self::create(dir.as_ref().join(name))
    }

    /// Where the rows are going.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_row(&mut self, agent: AgentId, record: &EpisodeRecord) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "agent,{}", EpisodeRecord::csv_header())?;
            self.header_written = true;
        }
        writeln!(self.writer, "{},{}", agent.index(), record.to_csv_row())?;
        self.writer.flush()
    }
}

impl StatsSink for CsvStatsWriter {
    fn episode_end(&mut self, agent: AgentId, record: &EpisodeRecord) {
        if let Err(err) = self.write_row(agent, record) {
            eprintln!(
                "snake-env: failed to write stats row to {}: {err}",
                self.path.display()
            );
        }
    }
}
