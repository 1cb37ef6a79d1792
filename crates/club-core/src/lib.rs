//! Core domain logic for the computer club ledger.
//!
//! This crate contains the fundamental types and logic for:
//! - Presence, table occupancy and the waiting queue
//! - The event-processing state machine and the closing procedure
//! - Per-table billing, rounded up to whole hours

mod club;
pub mod event;
mod processor;
pub mod revenue;
pub mod storage;
pub mod time;
mod transcript;
pub mod types;

pub use club::{ClubConfig, MAX_PRICE_PER_HOUR};
pub use event::{ClientAction, InputEvent, InputKind, OutputEvent, OutputKind, Rejection, UnknownEventKind};
pub use processor::{EventProcessor, Occupancy, Seat};
pub use revenue::{RevenueStats, TableReport};
pub use time::{Timeline, WorkingHours};
pub use transcript::{Line, LineFormat, Transcript};
pub use types::{ClientName, TableNumber, ValidationError};
