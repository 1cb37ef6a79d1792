//! The club state machine.
//!
//! A client's state is the combination of three facts: whether they are in
//! the presence store, whether a table in the occupancy store is theirs, and
//! whether they sit in the waiting queue. Valid combinations:
//!
//! - absent
//! - present without a table
//! - present at table `N`
//! - present without a table and queued
//!
//! Rejections never change state. The only cascade is in [`EventProcessor::process`]
//! for a leave: a freed table is handed to at most one queued client.

use chrono::NaiveDateTime;

use crate::club::ClubConfig;
use crate::event::{ClientAction, InputEvent, OutputEvent, Rejection};
use crate::revenue::{RevenueStats, TableReport};
use crate::storage::{InMemoryQueue, InMemoryStore, Queue, Store};
use crate::time::Timeline;
use crate::types::{ClientName, TableNumber};

/// Table a present client holds; `None` while they have no table.
pub type Seat = Option<TableNumber>;

/// Who holds a table and since when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub client: ClientName,
    pub seated_at: NaiveDateTime,
}

/// Whether a leave is announced with a `ClientLeft` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notify {
    Silent,
    Announce,
}

/// Replays validated events one at a time.
#[derive(Debug)]
pub struct EventProcessor {
    config: ClubConfig,
    timeline: Timeline,
    clients: InMemoryStore<ClientName, Seat>,
    tables: InMemoryStore<TableNumber, Occupancy>,
    revenue: InMemoryStore<TableNumber, RevenueStats>,
    queue: InMemoryQueue<ClientName>,
}

impl EventProcessor {
    pub fn new(config: ClubConfig) -> Self {
        Self {
            config,
            timeline: Timeline::new(config.hours()),
            clients: InMemoryStore::new(),
            tables: InMemoryStore::new(),
            revenue: InMemoryStore::new(),
            queue: InMemoryQueue::new(),
        }
    }

    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Applies one input event and returns what the club emits in reply.
    ///
    /// A rejected event yields a single [`OutputEvent::Error`] and leaves
    /// state untouched.
    pub fn process(&mut self, event: &InputEvent) -> Vec<OutputEvent> {
        let at = self.timeline.anchor(event.happens_at);
        let mut emitted = Vec::new();

        let outcome = match &event.action {
            ClientAction::Arrive { name } => self.arrive(name, at),
            ClientAction::Sit { name, table } => self.sit(name, *table, at),
            ClientAction::Wait { name } => self.wait(name, at, &mut emitted),
            ClientAction::Leave { name } => self.leave(name, at, Notify::Silent, &mut emitted),
        };

        if let Err(reason) = outcome {
            emitted.push(OutputEvent::Error {
                at: event.happens_at,
                reason,
            });
        }
        emitted
    }

    /// Closing procedure: every present or queued client leaves at closing
    /// time, in name order.
    ///
    /// The queue is drained first, so no table freed here is re-assigned.
    /// Each name is announced once even if the client was both present and
    /// queued; queued names with no presence entry are skipped.
    pub fn close(&mut self) -> Vec<OutputEvent> {
        let at = self.config.hours().closes_at();
        let mut names: Vec<ClientName> = self.clients.entries().into_iter().map(|(name, _)| name.clone()).collect();
        names.extend(self.queue.drain_all());
        names.sort();
        names.dedup();

        let mut emitted = Vec::with_capacity(names.len());
        for name in names {
            // Absent names are queue leftovers of clients who already left.
            if let Some(seat) = self.clients.delete(&name) {
                self.depart(name, seat, at, Notify::Announce, &mut emitted);
            }
        }
        emitted
    }

    /// Revenue per billed table, ascending by table number.
    pub fn report(&self) -> Vec<TableReport> {
        self.config
            .tables()
            .filter_map(|table| {
                self.revenue
                    .get(&table)
                    .map(|stats| TableReport { table, stats: *stats })
            })
            .collect()
    }

    /// Totals for one table, if it was ever released.
    pub fn revenue(&self, table: TableNumber) -> Option<&RevenueStats> {
        self.revenue.get(&table)
    }

    /// Table the client holds, `Some(None)` if present without one.
    pub fn seat_of(&self, name: &ClientName) -> Option<Seat> {
        self.clients.get(name).copied()
    }

    /// Current occupant of `table`.
    pub fn occupant(&self, table: TableNumber) -> Option<&Occupancy> {
        self.tables.get(&table)
    }

    pub fn occupied_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    fn arrive(&mut self, name: &ClientName, at: NaiveDateTime) -> Result<(), Rejection> {
        if !self.config.hours().contains(at) {
            return Err(Rejection::NotOpenYet);
        }
        if self.clients.get(name).is_some() {
            return Err(Rejection::AlreadyPresent);
        }
        self.clients.set(name.clone(), None);
        Ok(())
    }

    fn sit(&mut self, name: &ClientName, table: TableNumber, at: NaiveDateTime) -> Result<(), Rejection> {
        let Some(seat) = self.seat_of(name) else {
            return Err(Rejection::UnknownClient);
        };
        if self.tables.get(&table).is_some() {
            return Err(Rejection::TableBusy);
        }

        if let Some(previous) = seat {
            self.release(previous, at);
        }
        self.tables.set(
            table,
            Occupancy {
                client: name.clone(),
                seated_at: at,
            },
        );
        self.clients.set(name.clone(), Some(table));
        Ok(())
    }

    fn wait(&mut self, name: &ClientName, at: NaiveDateTime, emitted: &mut Vec<OutputEvent>) -> Result<(), Rejection> {
        let Some(seat) = self.seat_of(name) else {
            return Err(Rejection::UnknownClient);
        };
        // Only tableless clients not yet queued may wait.
        if seat.is_some() || self.queue.contains(name) {
            return Err(Rejection::AlreadyPresent);
        }
        if self.tables.len() < self.config.table_total() {
            return Err(Rejection::CannotWaitLonger);
        }
        if self.queue.len() >= self.config.queue_capacity() {
            // Turned away; the presence entry stays until they leave or the club closes.
            emitted.push(OutputEvent::ClientLeft {
                at: at.time(),
                name: name.clone(),
            });
            return Ok(());
        }
        self.queue.push(name.clone());
        Ok(())
    }

    fn leave(
        &mut self,
        name: &ClientName,
        at: NaiveDateTime,
        notify: Notify,
        emitted: &mut Vec<OutputEvent>,
    ) -> Result<(), Rejection> {
        let Some(seat) = self.clients.delete(name) else {
            return Err(Rejection::UnknownClient);
        };
        self.depart(name.clone(), seat, at, notify, emitted);
        Ok(())
    }

    /// Finishes a leave whose presence entry was already removed: frees the
    /// table and hands it to the head of the queue.
    fn depart(
        &mut self,
        name: ClientName,
        seat: Seat,
        at: NaiveDateTime,
        notify: Notify,
        emitted: &mut Vec<OutputEvent>,
    ) {
        if notify == Notify::Announce {
            emitted.push(OutputEvent::ClientLeft { at: at.time(), name });
        }

        let Some(table) = seat else {
            return;
        };
        self.release(table, at);

        if let Ok(next) = self.queue.pop() {
            self.clients.set(next.clone(), None);
            match self.sit(&next, table, at) {
                Ok(()) => emitted.push(OutputEvent::ClientSat {
                    at: at.time(),
                    name: next,
                    table,
                }),
                Err(reason) => emitted.push(OutputEvent::Error { at: at.time(), reason }),
            }
        }
    }

    /// Frees `table` and bills the ended occupancy up to `at`.
    fn release(&mut self, table: TableNumber, at: NaiveDateTime) {
        let Some(occupancy) = self.tables.delete(&table) else {
            return;
        };
        let mut stats = self.revenue.get(&table).copied().unwrap_or_default();
        stats.accrue(occupancy.seated_at, at, self.config.price_per_hour());
        self.revenue.set(table, stats);
    }
}
