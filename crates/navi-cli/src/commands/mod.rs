//! CLI subcommand implementations.

pub mod calendar;
pub mod check;
pub mod session;
pub mod util;
