//! `fundbook history`: one store's audit trail, oldest first.

use fundbook_core::store::EntryKind;

use crate::cli::HistoryArgs;
use crate::context::AppContext;
use crate::output;

pub fn run(ctx: &AppContext, args: &HistoryArgs) -> anyhow::Result<()> {
    let kind: EntryKind = args.kind.into();
    let rows = ctx.service().history(kind)?;

    if args.json {
        let value = serde_json::Value::Array(output::history_json(kind, &rows));
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if rows.is_empty() {
        if !ctx.quiet {
            println!("No history records yet.");
        }
        return Ok(());
    }
    println!("{}", output::history_table(kind, &rows));
    Ok(())
}
