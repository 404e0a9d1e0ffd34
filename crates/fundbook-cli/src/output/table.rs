//! Table and totals rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use fundbook_core::store::{Entry, EntryKind, HistoryEntry, Totals, DATE_FORMAT, TIMESTAMP_FORMAT};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Render one store's entries.
pub fn entries_table(kind: EntryKind, entries: &[Entry]) -> Table {
    let mut table = base_table();
    table.set_header(["Id", kind.primary_column(), "Amount", "Date"]);
    for entry in entries {
        table.add_row(entry.to_fields());
    }
    table
}

/// Render one store's audit trail, oldest first.
pub fn history_table(kind: EntryKind, rows: &[HistoryEntry]) -> Table {
    let mut table = base_table();
    table.set_header([
        "Action",
        "Timestamp",
        "Username",
        "Id",
        kind.primary_column(),
        "Amount",
        "Date",
    ]);
    for row in rows {
        table.add_row([
            row.action.as_str().to_string(),
            row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            row.username.clone(),
            row.snapshot.id.to_string(),
            row.snapshot.label.clone(),
            row.snapshot.amount.to_string(),
            row.snapshot.date.format(DATE_FORMAT).to_string(),
        ]);
    }
    table
}

/// Print the three summary figures, balance colored by sign.
pub fn print_totals(totals: &Totals) {
    println!("{} {}", "Total collected:".bold(), totals.collected);
    println!("{} {}", "Total spent:".bold(), totals.spent);
    if totals.balance < Decimal::ZERO {
        println!("{} {}", "Remaining:".bold(), totals.balance.red());
    } else {
        println!("{} {}", "Remaining:".bold(), totals.balance.green());
    }
}
