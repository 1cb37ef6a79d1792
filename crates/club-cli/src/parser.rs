//! Parsing of the club log text into validated events.
//!
//! The first three rows are the header (table count, working hours, price
//! per hour); every following row is one event. Rows are numbered from 1.

use chrono::NaiveTime;
use club_core::types::positive;
use club_core::{ClientAction, ClientName, ClubConfig, InputEvent, InputKind, UnknownEventKind, ValidationError, WorkingHours};
use thiserror::Error;

use crate::Config;

/// Number of header rows before the first event.
pub const HEADER_ROWS: usize = 3;

const EVENT_FIELDS: usize = 3;

/// Malformed row contents.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    #[error("tables count are not specified")]
    TablesCountMissing,
    #[error("tables count are not integer")]
    TablesCountNotInteger,
    #[error("price per hour are not specified")]
    PriceMissing,
    #[error("price per hour are not integer")]
    PriceNotInteger,
    #[error("working time are not specified")]
    WorkingTimeMissing,
    #[error("working time are not time interval")]
    WorkingTimeNotInterval,
    #[error("failed to parse start time")]
    StartTime,
    #[error("failed to parse end time")]
    EndTime,
    #[error("event must be in format: <time> <event-type> <client-data>")]
    EventShape,
    #[error("failed to parse event happened time")]
    EventTime,
    #[error("failed to parse event type")]
    EventKind,
    #[error("invalid client data format for event type")]
    ClientDataShape,
    #[error("failed to parse client table number")]
    TableNumber,
}

/// Well-formed rows whose values break a rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error(transparent)]
    Value(#[from] ValidationError),
    #[error(transparent)]
    Kind(#[from] UnknownEventKind),
}

/// The first failure in a log. Fatal to the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to parse row {row}: {issue}")]
    Format { row: usize, issue: FormatIssue },

    #[error("validation error at row {row}: {violation}")]
    Validation { row: usize, violation: Violation },
}

impl ParseError {
    /// Row the failure was found on.
    pub const fn row(&self) -> usize {
        match self {
            Self::Format { row, .. } | Self::Validation { row, .. } => *row,
        }
    }
}

const fn malformed(row: usize, issue: FormatIssue) -> ParseError {
    ParseError::Format { row, issue }
}

fn invalid(row: usize, violation: impl Into<Violation>) -> ParseError {
    ParseError::Validation {
        row,
        violation: violation.into(),
    }
}

fn client_name(row: usize, raw: &str) -> Result<ClientName, ParseError> {
    ClientName::new(raw).map_err(|err| invalid(row, err))
}

fn read_number<T: TryFrom<i64>>(
    line: Option<&str>,
    row: usize,
    missing: FormatIssue,
    not_integer: FormatIssue,
) -> Result<T, ParseError> {
    let line = line.filter(|l| !l.is_empty()).ok_or(malformed(row, missing))?;
    let value: i64 = line.parse().map_err(|_| malformed(row, not_integer))?;
    positive(value).map_err(|err| invalid(row, err))
}

/// Reads club logs written with the configured time format and separators.
#[derive(Debug, Clone)]
pub struct LogParser {
    time_format: String,
    hours_separator: String,
    field_separator: String,
}

impl LogParser {
    pub fn new(config: &Config) -> Self {
        Self {
            time_format: config.time_format.clone(),
            hours_separator: config.hours_separator.clone(),
            field_separator: config.field_separator.clone(),
        }
    }

    /// Reads the three header rows from `lines`.
    pub fn read_header<'a>(&self, lines: &mut impl Iterator<Item = &'a str>) -> Result<ClubConfig, ParseError> {
        let table_count: u32 = read_number(
            lines.next(),
            1,
            FormatIssue::TablesCountMissing,
            FormatIssue::TablesCountNotInteger,
        )?;
        let hours = self.read_hours(lines.next(), 2)?;
        let price: u64 = read_number(lines.next(), 3, FormatIssue::PriceMissing, FormatIssue::PriceNotInteger)?;

        ClubConfig::new(table_count, price, hours).map_err(|err| invalid(HEADER_ROWS, err))
    }

    /// Parses event row number `row`.
    pub fn parse_event(&self, row: usize, line: &str, club: &ClubConfig) -> Result<InputEvent, ParseError> {
        let fields: Vec<&str> = line.splitn(EVENT_FIELDS, self.field_separator.as_str()).collect();
        let [time, kind, payload] = fields.as_slice() else {
            return Err(malformed(row, FormatIssue::EventShape));
        };

        let happens_at = self.parse_time(time).ok_or(malformed(row, FormatIssue::EventTime))?;
        let code: i64 = kind.parse().map_err(|_| malformed(row, FormatIssue::EventKind))?;
        let kind = InputKind::try_from(code).map_err(|err| invalid(row, err))?;
        let action = self.parse_action(row, kind, payload, club)?;

        Ok(InputEvent::new(happens_at, action))
    }

    fn parse_action(&self, row: usize, kind: InputKind, payload: &str, club: &ClubConfig) -> Result<ClientAction, ParseError> {
        let content: Vec<&str> = payload.split(self.field_separator.as_str()).collect();
        if content.len() != kind.payload_arity() {
            return Err(malformed(row, FormatIssue::ClientDataShape));
        }

        let action = match kind {
            InputKind::Sit => {
                // Table number syntax is checked before the name.
                let raw: i64 = content[1]
                    .parse()
                    .map_err(|_| malformed(row, FormatIssue::TableNumber))?;
                let name = client_name(row, content[0])?;
                let table = club.table(raw).map_err(|err| invalid(row, err))?;
                ClientAction::Sit { name, table }
            }
            InputKind::Arrive => ClientAction::Arrive {
                name: client_name(row, content[0])?,
            },
            InputKind::Wait => ClientAction::Wait {
                name: client_name(row, content[0])?,
            },
            InputKind::Leave => ClientAction::Leave {
                name: client_name(row, content[0])?,
            },
        };
        Ok(action)
    }

    fn read_hours(&self, line: Option<&str>, row: usize) -> Result<WorkingHours, ParseError> {
        let line = line
            .filter(|l| !l.is_empty())
            .ok_or(malformed(row, FormatIssue::WorkingTimeMissing))?;
        let parts: Vec<&str> = line.split(self.hours_separator.as_str()).collect();
        let [open, close] = parts.as_slice() else {
            return Err(malformed(row, FormatIssue::WorkingTimeNotInterval));
        };

        let open = self.parse_time(open).ok_or(malformed(row, FormatIssue::StartTime))?;
        let close = self.parse_time(close).ok_or(malformed(row, FormatIssue::EndTime))?;
        Ok(WorkingHours::new(open, close))
    }

    fn parse_time(&self, text: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(text, &self.time_format).ok()
    }
}
