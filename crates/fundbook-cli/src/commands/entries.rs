//! Entry commands: add, list, edit, delete.
//!
//! Mutating commands authenticate first and carry the session username into
//! the audit trail. Values missing from the command line are prompted for
//! unless interactive input is disabled.

use std::collections::BTreeSet;

use chrono::Local;
use dialoguer::{Confirm, Input};

use fundbook_core::store::{Entry, EntryKind, NewEntry, DATE_FORMAT};
use fundbook_core::EditOutcome;

use crate::cli::{AddArgs, Cli, DeleteArgs, EditArgs, ListArgs};
use crate::context::AppContext;
use crate::helpers::{parse_amount, parse_date};
use crate::output;
use crate::session;

pub fn add(ctx: &AppContext, cli: &Cli, args: &AddArgs) -> anyhow::Result<()> {
    let kind: EntryKind = args.kind.into();
    let credentials = ctx.credentials()?;
    let session = session::login(&credentials, cli.user.as_deref(), args.no_input)?;

    let label = match args.label.as_deref() {
        Some(value) => value.to_string(),
        None if args.no_input => {
            return Err(anyhow::anyhow!(
                "No {} provided. Use --label.",
                kind.primary_column().to_lowercase()
            ));
        }
        None => Input::new()
            .with_prompt(kind.primary_column())
            .interact_text()?,
    };

    let amount = match args.amount.as_deref() {
        Some(value) => parse_amount(value)?,
        None if args.no_input => {
            return Err(anyhow::anyhow!("No amount provided. Use --amount."));
        }
        None => parse_amount(&Input::<String>::new().with_prompt("Amount").interact_text()?)?,
    };

    let today = Local::now().date_naive();
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None if args.no_input => today,
        None => parse_date(
            &Input::<String>::new()
                .with_prompt("Date")
                .default(today.format(DATE_FORMAT).to_string())
                .interact_text()?,
        )?,
    };

    let entry = ctx
        .service()
        .add(kind, session.username(), &NewEntry::new(label, amount, date))?;
    if !ctx.quiet {
        println!(
            "Added {} {}: {} {} on {}",
            kind,
            entry.id,
            entry.label,
            entry.amount,
            entry.date.format(DATE_FORMAT)
        );
    }
    Ok(())
}

pub fn list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let service = ctx.service();
    let kinds: Vec<EntryKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => vec![EntryKind::Collection, EntryKind::Expense],
    };

    if args.json {
        let value = if let [kind] = kinds[..] {
            serde_json::Value::Array(output::entries_json(kind, &service.entries(kind)?))
        } else {
            serde_json::json!({
                "collections": output::entries_json(
                    EntryKind::Collection,
                    &service.entries(EntryKind::Collection)?,
                ),
                "expenses": output::entries_json(
                    EntryKind::Expense,
                    &service.entries(EntryKind::Expense)?,
                ),
            })
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for kind in kinds {
        let entries = service.entries(kind)?;
        if entries.is_empty() {
            if !ctx.quiet {
                println!("No {} records found.", kind);
            }
            continue;
        }
        println!("{}", output::entries_table(kind, &entries));
    }
    Ok(())
}

pub fn edit(ctx: &AppContext, cli: &Cli, args: &EditArgs) -> anyhow::Result<()> {
    let kind: EntryKind = args.kind.into();
    let credentials = ctx.credentials()?;
    let session = session::login(&credentials, cli.user.as_deref(), args.no_input)?;

    let service = ctx.service();
    let current = find_entry(&service.entries(kind)?, kind, args.id)?;

    let label = match args.label.as_deref() {
        Some(value) => value.to_string(),
        None if args.no_input => current.label.clone(),
        None => Input::new()
            .with_prompt(kind.primary_column())
            .default(current.label.clone())
            .interact_text()?,
    };
    let amount = match args.amount.as_deref() {
        Some(value) => parse_amount(value)?,
        None if args.no_input => current.amount,
        None => parse_amount(
            &Input::<String>::new()
                .with_prompt("Amount")
                .default(current.amount.to_string())
                .interact_text()?,
        )?,
    };
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None if args.no_input => current.date,
        None => parse_date(
            &Input::<String>::new()
                .with_prompt("Date")
                .default(current.date.format(DATE_FORMAT).to_string())
                .interact_text()?,
        )?,
    };

    let outcome = service.edit(
        kind,
        session.username(),
        args.id,
        &NewEntry::new(label, amount, date),
    )?;
    if !ctx.quiet {
        match outcome {
            EditOutcome::Unchanged => println!("No changes for {} {}", kind, args.id),
            EditOutcome::Updated(entry) => println!(
                "Updated {} {}: {} {} on {}",
                kind,
                entry.id,
                entry.label,
                entry.amount,
                entry.date.format(DATE_FORMAT)
            ),
        }
    }
    Ok(())
}

pub fn delete(ctx: &AppContext, cli: &Cli, args: &DeleteArgs) -> anyhow::Result<()> {
    let kind: EntryKind = args.kind.into();
    let credentials = ctx.credentials()?;
    // --yes doubles as the non-interactive flag here.
    let session = session::login(&credentials, cli.user.as_deref(), args.yes)?;

    if !args.yes {
        let prompt = format!(
            "Delete {} {} {}?",
            args.ids.len(),
            kind,
            plural(args.ids.len())
        );
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            if !ctx.quiet {
                println!("Aborted.");
            }
            return Ok(());
        }
    }

    let service = ctx.service();
    let ids: BTreeSet<u64> = args.ids.iter().copied().collect();
    let deleted = if let [id] = args.ids[..] {
        service.delete(kind, session.username(), id)?;
        1
    } else {
        service.bulk_delete(kind, session.username(), &ids)?
    };

    if !ctx.quiet {
        println!("Deleted {} {}.", deleted, plural(deleted));
    }
    Ok(())
}

fn find_entry(entries: &[Entry], kind: EntryKind, id: u64) -> anyhow::Result<Entry> {
    entries
        .iter()
        .find(|entry| entry.id == id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No {} entry with id {}", kind, id))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}
