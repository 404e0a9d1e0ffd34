//! Output formatting helpers for the CLI.
//!
//! Tables for interactive use, JSON for scripting.

mod json;
mod table;

pub use json::{entries_json, entry_json, history_json, totals_json};
pub use table::{entries_table, history_table, print_totals};
