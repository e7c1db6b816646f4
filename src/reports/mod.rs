//! Report generation for collected repositories
//!
//! Two generators are provided, each accessed through a `generate` function that
//! writes into any `core::fmt::Write`:
//! - **Console**: a ranked table with optional ANSI colors and a summary
//! - **JSON**: machine-readable data, including the repositories that were dropped

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
