//! Log replay: a reader task feeds parsed events to the processor through a
//! bounded channel.
//!
//! The reader stops after sending the first parse failure. The processor
//! drains strictly in order and aborts on that failure; nothing it produced
//! is returned in that case.

use club_core::{ClubConfig, EventProcessor, InputEvent, OutputEvent, TableReport, Transcript};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::parser::{HEADER_ROWS, LogParser, ParseError};

/// Replay failures.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("event reader stopped unexpectedly: {0}")]
    Reader(#[from] JoinError),
}

/// Result of a successful replay.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub club: ClubConfig,
    pub transcript: Transcript,
    pub report: Vec<TableReport>,
}

type Item = Result<InputEvent, ParseError>;

/// Replays a whole log.
pub async fn replay(source: String, parser: LogParser, capacity: usize) -> Result<Outcome, RunError> {
    let club = parser.read_header(&mut source.lines())?;
    tracing::debug!(
        tables = club.table_count(),
        price = club.price_per_hour(),
        open = %club.hours().open(),
        close = %club.hours().close(),
        "read club header"
    );

    let (tx, mut rx) = mpsc::channel::<Item>(capacity.max(1));
    let reader = tokio::spawn(read_events(source, parser, club, tx));

    let mut processor = EventProcessor::new(club);
    let mut transcript = Transcript::opened(club.hours().open());
    let mut processed = 0_usize;

    while let Some(item) = rx.recv().await {
        let event = match item {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!(row = err.row(), error = %err, "aborting replay");
                return Err(err.into());
            }
        };

        tracing::trace!(at = %event.happens_at, kind = %event.action.kind(), client = %event.action.name(), "processing event");
        let emitted = processor.process(&event);
        log_rejections(&emitted);
        transcript.received(event);
        transcript.emitted(emitted);
        processed += 1;
    }
    reader.await?;

    let forced = processor.close();
    tracing::debug!(clients = forced.len(), "closing the club");
    transcript.emitted(forced);
    transcript.closed(club.hours().close());

    let report = processor.report();
    tracing::info!(events = processed, billed_tables = report.len(), "replay finished");

    Ok(Outcome {
        club,
        transcript,
        report,
    })
}

/// Parses every row without processing; returns the number of events.
pub fn check(source: &str, parser: &LogParser) -> Result<usize, ParseError> {
    let mut lines = source.lines();
    let club = parser.read_header(&mut lines)?;

    let mut count = 0;
    for (index, line) in lines.enumerate() {
        parser.parse_event(HEADER_ROWS + index + 1, line, &club)?;
        count += 1;
    }
    Ok(count)
}

async fn read_events(source: String, parser: LogParser, club: ClubConfig, tx: mpsc::Sender<Item>) {
    for (index, line) in source.lines().enumerate().skip(HEADER_ROWS) {
        let item = parser.parse_event(index + 1, line, &club);
        let failed = item.is_err();
        if tx.send(item).await.is_err() || failed {
            break;
        }
    }
}

fn log_rejections(emitted: &[OutputEvent]) {
    for event in emitted {
        if let OutputEvent::Error { at, reason } = event {
            tracing::debug!(%at, %reason, "event rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use club_core::LineFormat;
    use insta::assert_snapshot;

    use crate::Config;

    const SAMPLE: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

    fn parser() -> LogParser {
        LogParser::new(&Config::default())
    }

    fn render(outcome: &Outcome) -> String {
        let format = LineFormat::default();
        let mut lines = outcome.transcript.render(&format);
        lines.extend(outcome.report.iter().map(|row| row.render(&format.separator)));
        lines.join("\n")
    }

    #[tokio::test]
    async fn replays_sample_day() {
        let outcome = replay(SAMPLE.to_string(), parser(), 2).await.unwrap();

        assert_snapshot!(render(&outcome), @r"
        09:00
        08:48 1 client1
        08:48 13 NotOpenYet
        09:41 1 client1
        09:48 1 client2
        09:52 3 client1
        09:52 13 ICanWaitNoLonger!
        09:54 2 client1 1
        10:25 2 client2 2
        10:58 1 client3
        10:59 2 client3 3
        11:30 1 client4
        11:35 2 client4 2
        11:35 13 PlaceIsBusy
        11:45 3 client4
        12:33 4 client1
        12:33 12 client4 1
        12:43 4 client2
        15:52 4 client4
        19:00 11 client3
        19:00
        1 70 05:58
        2 30 02:18
        3 90 08:01
        ");
    }

    #[tokio::test]
    async fn channel_capacity_does_not_change_output() {
        let narrow = replay(SAMPLE.to_string(), parser(), 1).await.unwrap();
        let wide = replay(SAMPLE.to_string(), parser(), 64).await.unwrap();

        assert_eq!(narrow.transcript, wide.transcript);
        assert_eq!(narrow.report, wide.report);
    }

    #[tokio::test]
    async fn first_bad_row_aborts() {
        let source = "1\n09:00 19:00\n10\n09:00 1 client1\n09:05 2 client1 7\n09:10 1 Bad\n";

        let err = replay(source.to_string(), parser(), 1).await.unwrap_err();

        assert_eq!(err.to_string(), "validation error at row 5: value is too big");
    }

    #[tokio::test]
    async fn header_failure_aborts_before_events() {
        let err = replay("3\n09:00\n10\n".to_string(), parser(), 4).await.unwrap_err();

        assert!(matches!(err, RunError::Parse(ParseError::Format { row: 2, .. })));
    }

    #[tokio::test]
    async fn empty_event_list_still_opens_and_closes() {
        let outcome = replay("2\n10:00 22:00\n5\n".to_string(), parser(), 4).await.unwrap();

        assert_snapshot!(render(&outcome), @r"
        10:00
        22:00
        ");
        assert!(outcome.report.is_empty());
    }

    #[test]
    fn check_counts_events() {
        assert_eq!(check(SAMPLE, &parser()), Ok(14));
    }

    #[test]
    fn check_reports_first_failure() {
        let err = check("3\n09:00 19:00\n10\n08:48 1 client1\n08:49 9 client1\n", &parser()).unwrap_err();

        assert_eq!(err.to_string(), "validation error at row 5: unknown event type");
    }
}
