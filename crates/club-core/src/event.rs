//! Input actions read from the log and the events the club emits in reply.

use std::fmt;

use chrono::NaiveTime;
use thiserror::Error;

use crate::types::{ClientName, TableNumber};

/// Numeric kind codes of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Arrive,
    Sit,
    Wait,
    Leave,
}

impl InputKind {
    /// Wire code written in the log.
    pub const fn code(self) -> u8 {
        match self {
            Self::Arrive => 1,
            Self::Sit => 2,
            Self::Wait => 3,
            Self::Leave => 4,
        }
    }

    /// Number of payload fields the kind carries.
    pub const fn payload_arity(self) -> usize {
        match self {
            Self::Sit => 2,
            Self::Arrive | Self::Wait | Self::Leave => 1,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<i64> for InputKind {
    type Error = UnknownEventKind;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Arrive),
            2 => Ok(Self::Sit),
            3 => Ok(Self::Wait),
            4 => Ok(Self::Leave),
            _ => Err(UnknownEventKind(code)),
        }
    }
}

/// Error for kind codes outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown event type")]
pub struct UnknownEventKind(pub i64);

/// What a client does, with the payload that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    Arrive { name: ClientName },
    Sit { name: ClientName, table: TableNumber },
    Wait { name: ClientName },
    Leave { name: ClientName },
}

impl ClientAction {
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Arrive { .. } => InputKind::Arrive,
            Self::Sit { .. } => InputKind::Sit,
            Self::Wait { .. } => InputKind::Wait,
            Self::Leave { .. } => InputKind::Leave,
        }
    }

    pub const fn name(&self) -> &ClientName {
        match self {
            Self::Arrive { name } | Self::Sit { name, .. } | Self::Wait { name } | Self::Leave { name } => {
                name
            }
        }
    }

    /// Payload text: `name`, or `name<sep>table` for [`ClientAction::Sit`].
    pub fn render(&self, separator: &str) -> String {
        match self {
            Self::Sit { name, table } => format!("{name}{separator}{table}"),
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for ClientAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(" "))
    }
}

/// A validated log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// Clock time of the row. May fall outside working hours.
    pub happens_at: NaiveTime,
    pub action: ClientAction,
}

impl InputEvent {
    pub const fn new(happens_at: NaiveTime, action: ClientAction) -> Self {
        Self { happens_at, action }
    }
}

/// Business-rule rejection. Display is the wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    /// The client is already inside.
    #[error("YouShallNotPass")]
    AlreadyPresent,

    /// Arrival outside working hours.
    #[error("NotOpenYet")]
    NotOpenYet,

    /// The client is not inside.
    #[error("ClientUnknown")]
    UnknownClient,

    /// The requested table is occupied.
    #[error("PlaceIsBusy")]
    TableBusy,

    /// Waiting while a table is free.
    #[error("ICanWaitNoLonger!")]
    CannotWaitLonger,
}

/// Numeric kind codes of emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    ClientLeft,
    ClientSat,
    Error,
}

impl OutputKind {
    pub const fn code(self) -> u8 {
        match self {
            Self::ClientLeft => 11,
            Self::ClientSat => 12,
            Self::Error => 13,
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An event the club produces while replaying the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// The client left, either forced at closing or turned away from a full queue.
    ClientLeft { at: NaiveTime, name: ClientName },

    /// A queued client took a freed table.
    ClientSat {
        at: NaiveTime,
        name: ClientName,
        table: TableNumber,
    },

    /// A rejected input row.
    Error { at: NaiveTime, reason: Rejection },
}

impl OutputEvent {
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::ClientLeft { .. } => OutputKind::ClientLeft,
            Self::ClientSat { .. } => OutputKind::ClientSat,
            Self::Error { .. } => OutputKind::Error,
        }
    }

    pub const fn happens_at(&self) -> NaiveTime {
        match self {
            Self::ClientLeft { at, .. } | Self::ClientSat { at, .. } | Self::Error { at, .. } => *at,
        }
    }

    /// Payload text: client, `client<sep>table`, or the rejection code.
    pub fn render_payload(&self, separator: &str) -> String {
        match self {
            Self::ClientLeft { name, .. } => name.to_string(),
            Self::ClientSat { name, table, .. } => format!("{name}{separator}{table}"),
            Self::Error { reason, .. } => reason.to_string(),
        }
    }
}
