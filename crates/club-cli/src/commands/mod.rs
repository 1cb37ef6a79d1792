//! CLI subcommand implementations.

pub mod check;
pub mod run;
pub mod util;
