//! `fundbook report`: totals plus both stores.

use fundbook_core::store::EntryKind;

use crate::context::AppContext;
use crate::output;

pub fn run(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let service = ctx.service();
    let totals = service.totals()?;
    let collections = service.entries(EntryKind::Collection)?;
    let expenses = service.entries(EntryKind::Expense)?;

    if json {
        let value = serde_json::json!({
            "totals": output::totals_json(&totals),
            "collections": output::entries_json(EntryKind::Collection, &collections),
            "expenses": output::entries_json(EntryKind::Expense, &expenses),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::print_totals(&totals);
    if ctx.quiet {
        return Ok(());
    }

    println!("\nCollections");
    println!("{}", output::entries_table(EntryKind::Collection, &collections));
    println!("\nExpenses");
    println!("{}", output::entries_table(EntryKind::Expense, &expenses));
    Ok(())
}
