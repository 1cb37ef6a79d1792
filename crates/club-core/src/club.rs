//! Fixed parameters of one club run.

use crate::time::WorkingHours;
use crate::types::{TableNumber, ValidationError, bounded};

/// Highest accepted price per hour.
pub const MAX_PRICE_PER_HOUR: u64 = 1_000_000_000;

/// Table count, hourly price and working hours. Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubConfig {
    table_count: TableNumber,
    price_per_hour: u64,
    hours: WorkingHours,
}

impl ClubConfig {
    /// Creates a config, rejecting a zero table count and a zero or
    /// oversized price.
    pub fn new(table_count: TableNumber, price_per_hour: u64, hours: WorkingHours) -> Result<Self, ValidationError> {
        if table_count == 0 {
            return Err(ValidationError::NotPositive { value: 0 });
        }
        if price_per_hour == 0 {
            return Err(ValidationError::NotPositive { value: 0 });
        }
        if price_per_hour > MAX_PRICE_PER_HOUR {
            return Err(ValidationError::TooBig {
                value: i64::try_from(price_per_hour).unwrap_or(i64::MAX),
                max: i64::try_from(MAX_PRICE_PER_HOUR).unwrap_or(i64::MAX),
            });
        }
        Ok(Self {
            table_count,
            price_per_hour,
            hours,
        })
    }

    pub const fn table_count(&self) -> TableNumber {
        self.table_count
    }

    pub const fn price_per_hour(&self) -> u64 {
        self.price_per_hour
    }

    pub const fn hours(&self) -> WorkingHours {
        self.hours
    }

    /// Validates a raw table number against this club.
    pub fn table(&self, value: i64) -> Result<TableNumber, ValidationError> {
        bounded(value, self.table_count)
    }

    /// Table numbers `1..=table_count`.
    pub fn tables(&self) -> impl Iterator<Item = TableNumber> {
        1..=self.table_count
    }

    /// Table count as a collection size.
    pub fn table_total(&self) -> usize {
        usize::try_from(self.table_count).unwrap_or(usize::MAX)
    }

    /// Queue capacity; equal to the table count.
    pub fn queue_capacity(&self) -> usize {
        self.table_total()
    }
}
