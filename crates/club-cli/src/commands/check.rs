//! Check command: validate a log without replaying it.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::Config;
use crate::commands::util::read_log;
use crate::parser::LogParser;
use crate::pipeline::check;

pub async fn run<W: Write>(writer: &mut W, input: &Path, config: &Config) -> Result<()> {
    let source = read_log(input).await?;
    let events = check(&source, &LogParser::new(config))?;

    writeln!(writer, "{}: ok, {events} events", input.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_event_count() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("day.txt");
        std::fs::write(&path, "2\n09:00 19:00\n10\n09:00 1 a\n09:30 4 a\n").unwrap();

        let mut output = Vec::new();
        run(&mut output, &path, &Config::default()).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, format!("{}: ok, 2 events\n", path.display()));
    }

    #[tokio::test]
    async fn surfaces_first_failure() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("day.txt");
        std::fs::write(&path, "2\n09:00 19:00\nfree\n").unwrap();

        let err = run(&mut Vec::new(), &path, &Config::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "failed to parse row 3: price per hour are not integer");
    }
}
