//! Run command: replay a log and print the transcript and revenue report.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use club_core::LineFormat;
use serde::Serialize;

use crate::Config;
use crate::commands::util::read_log;
use crate::parser::LogParser;
use crate::pipeline::{Outcome, replay};

/// JSON form of a finished run.
#[derive(Debug, Serialize)]
pub struct JsonRun {
    pub opened_at: String,
    pub closed_at: String,
    pub lines: Vec<String>,
    pub tables: Vec<JsonTable>,
}

/// JSON form of one revenue row.
#[derive(Debug, Serialize)]
pub struct JsonTable {
    pub table: u32,
    pub income: u64,
    pub usage: String,
    pub usage_minutes: i64,
}

impl JsonRun {
    pub fn new(outcome: &Outcome, format: &LineFormat) -> Self {
        let hours = outcome.club.hours();
        Self {
            opened_at: format.time(hours.open()),
            closed_at: format.time(hours.close()),
            lines: outcome.transcript.render(format),
            tables: outcome
                .report
                .iter()
                .map(|row| JsonTable {
                    table: row.table,
                    income: row.stats.income,
                    usage: row.stats.usage_clock(),
                    usage_minutes: row.stats.usage.num_minutes(),
                })
                .collect(),
        }
    }
}

/// Replays the log at `input`. Nothing is printed here.
pub async fn run(input: &Path, config: &Config) -> Result<Outcome> {
    let source = read_log(input).await?;
    tracing::debug!(path = %input.display(), bytes = source.len(), "read log");

    let outcome = replay(source, LogParser::new(config), config.channel_capacity).await?;
    Ok(outcome)
}

/// Writes the transcript followed by one line per billed table.
pub fn write_text<W: Write>(writer: &mut W, outcome: &Outcome, format: &LineFormat) -> Result<()> {
    for line in outcome.transcript.render(format) {
        writeln!(writer, "{line}")?;
    }
    for row in &outcome.report {
        writeln!(writer, "{}", row.render(&format.separator))?;
    }
    Ok(())
}

/// Writes the run as a pretty-printed JSON document.
pub fn write_json<W: Write>(writer: &mut W, outcome: &Outcome, format: &LineFormat) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &JsonRun::new(outcome, format))?;
    writeln!(writer)?;
    Ok(())
}
