//! Per-table income and usage accounting.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::types::TableNumber;

const SECONDS_PER_HOUR: u64 = 3600;

/// Income and usage time accumulated for one table.
///
/// Income is billed per started hour; usage time is kept unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueStats {
    /// Money earned from the table.
    pub income: u64,

    /// Total time the table was occupied.
    pub usage: Duration,
}

impl Default for RevenueStats {
    fn default() -> Self {
        Self {
            income: 0,
            usage: Duration::zero(),
        }
    }
}

impl RevenueStats {
    /// Adds one finished occupancy to the totals.
    ///
    /// A release before the seating time counts as zero usage. Income
    /// saturates at `u64::MAX` instead of wrapping.
    pub fn accrue(&mut self, seated_at: NaiveDateTime, released_at: NaiveDateTime, price_per_hour: u64) {
        let span = (released_at - seated_at).max(Duration::zero());
        let charge = billed_hours(span).saturating_mul(price_per_hour);
        self.income = self.income.saturating_add(charge);
        self.usage += span;
    }

    /// Usage time as `HH:MM`.
    pub fn usage_clock(&self) -> String {
        let minutes = self.usage.num_minutes();
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl fmt::Display for RevenueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.income, self.usage_clock())
    }
}

/// Hours charged for `span`, rounded up to the next whole hour.
pub fn billed_hours(span: Duration) -> u64 {
    let seconds = u64::try_from(span.num_seconds()).unwrap_or(0);
    seconds.div_ceil(SECONDS_PER_HOUR)
}

/// One row of the final revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    pub table: TableNumber,
    pub stats: RevenueStats,
}

impl TableReport {
    /// Renders `<table><sep><income><sep><HH:MM>`.
    pub fn render(&self, separator: &str) -> String {
        format!(
            "{}{separator}{}{separator}{}",
            self.table,
            self.stats.income,
            self.stats.usage_clock()
        )
    }
}
