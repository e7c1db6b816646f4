//! Command-line interface for repo-census
//!
//! # Implementation Model
//!
//! The `run` function parses the command line with clap and routes to the
//! matching command handler. There is a single command today:
//!
//! - **scrape**: collect the top-starred GitHub repositories along with today's
//!   commit authors, print a console report, and optionally save a JSON report
//!
//! The `common` module holds the options shared by commands (logging and color
//! handling). All output goes through the [`Host`] trait so commands can be
//! exercised without touching the real terminal.

mod common;
mod host;
mod run;
mod scrape;

pub use common::{ColorMode, LogLevel};
pub use host::Host;
pub use run::run;
pub use scrape::{ScrapeArgs, scrape};
