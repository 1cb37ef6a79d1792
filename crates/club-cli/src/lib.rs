//! Computer club ledger CLI library.
//!
//! This crate reads club logs, replays them through `club-core`, and renders
//! the result.

mod cli;
pub mod commands;
mod config;
pub mod parser;
pub mod pipeline;

pub use cli::{Cli, Commands};
pub use config::{Config, ConfigError};
