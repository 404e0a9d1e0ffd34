//! Ledger service: coordinates the record stores and their audit logs.
//!
//! One `RecordStore` + `HistoryLog` pair exists per entry kind. Every
//! mutating operation follows the same ordering contract: validate, write
//! the audit row, then mutate the record store. No transaction spans the two
//! files; a failure between the writes is surfaced to the caller, never
//! rolled back or masked.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{FundError, Result};
use crate::store::{
    next_id, Entry, EntryKind, HistoryAction, HistoryEntry, HistoryLog, NewEntry, RecordStore,
    Totals,
};

/// File names under the data directory.
pub const COLLECTIONS_FILE: &str = "collections.csv";
pub const EXPENSES_FILE: &str = "expenses.csv";
pub const COLLECTIONS_HISTORY_FILE: &str = "collections_history.csv";
pub const EXPENSES_HISTORY_FILE: &str = "expenses_history.csv";

/// Result of an edit request.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Submitted values equal the stored entry; nothing was written and no
    /// history row was appended.
    Unchanged,
    /// The entry was replaced with this post-image.
    Updated(Entry),
}

/// Coordinator for the collection and expense stores and their history logs.
///
/// Owns the backing files exclusively; no concurrent writer is assumed.
pub struct LedgerService {
    collections: RecordStore,
    expenses: RecordStore,
    collections_history: HistoryLog,
    expenses_history: HistoryLog,
}

impl LedgerService {
    /// Open a ledger rooted at `data_dir`. The backing files are expected to
    /// exist already; operations on a missing file fail with a storage error.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            collections: RecordStore::new(dir.join(COLLECTIONS_FILE), EntryKind::Collection),
            expenses: RecordStore::new(dir.join(EXPENSES_FILE), EntryKind::Expense),
            collections_history: HistoryLog::new(
                dir.join(COLLECTIONS_HISTORY_FILE),
                EntryKind::Collection,
            ),
            expenses_history: HistoryLog::new(
                dir.join(EXPENSES_HISTORY_FILE),
                EntryKind::Expense,
            ),
        }
    }

    /// Create the data directory and any header-only backing files that are
    /// absent, then open the ledger. Existing files are left untouched.
    pub fn init(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let service = Self::open(dir);
        service.collections.create_if_missing()?;
        service.expenses.create_if_missing()?;
        service.collections_history.create_if_missing()?;
        service.expenses_history.create_if_missing()?;
        Ok(service)
    }

    fn pair(&self, kind: EntryKind) -> (&RecordStore, &HistoryLog) {
        match kind {
            EntryKind::Collection => (&self.collections, &self.collections_history),
            EntryKind::Expense => (&self.expenses, &self.expenses_history),
        }
    }

    /// Record a new entry: validate, append the ADD audit row (post-image,
    /// with the assigned id), then append to the record store.
    pub fn add(&self, kind: EntryKind, username: &str, new: &NewEntry) -> Result<Entry> {
        new.validate(kind)?;
        let (store, log) = self.pair(kind);
        let mut entries = store.load()?;
        let entry = Entry::assign(next_id(&entries), new);
        log.append(HistoryAction::Add, username, &entry.to_fields())?;
        entries.push(entry.clone());
        store.save(&entries)?;
        Ok(entry)
    }

    /// Replace the entry carrying `id` with the submitted values.
    ///
    /// An edit that changes nothing is a no-op: no store write, no history
    /// row. Otherwise the EDIT audit row (post-image) is written first.
    pub fn edit(
        &self,
        kind: EntryKind,
        username: &str,
        id: u64,
        new: &NewEntry,
    ) -> Result<EditOutcome> {
        new.validate(kind)?;
        let (store, log) = self.pair(kind);
        let mut entries = store.load()?;
        let position = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(FundError::UnknownEntry(id))?;
        if entries[position].matches(new) {
            return Ok(EditOutcome::Unchanged);
        }

        let post_image = Entry::assign(id, new);
        log.append(HistoryAction::Edit, username, &post_image.to_fields())?;
        entries[position] = post_image.clone();
        store.save(&entries)?;
        Ok(EditOutcome::Updated(post_image))
    }

    /// Remove the entry carrying `id`, writing the DELETE audit row
    /// (pre-image) first. Returns the removed entry.
    pub fn delete(&self, kind: EntryKind, username: &str, id: u64) -> Result<Entry> {
        let (store, log) = self.pair(kind);
        let mut entries = store.load()?;
        let position = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(FundError::UnknownEntry(id))?;
        let removed = entries[position].clone();
        log.append(HistoryAction::Delete, username, &removed.to_fields())?;
        entries.remove(position);
        store.save(&entries)?;
        Ok(removed)
    }

    /// Delete several entries in one snapshot rewrite, returning the count.
    ///
    /// Every id is resolved up front: a single stale id fails the whole
    /// request before any audit row or store write happens. Entries are
    /// matched by id, never by position, so there is no ordering hazard.
    pub fn bulk_delete(
        &self,
        kind: EntryKind,
        username: &str,
        ids: &BTreeSet<u64>,
    ) -> Result<usize> {
        let (store, log) = self.pair(kind);
        let mut entries = store.load()?;
        for &id in ids {
            if !entries.iter().any(|entry| entry.id == id) {
                return Err(FundError::UnknownEntry(id));
            }
        }

        for entry in entries.iter().filter(|entry| ids.contains(&entry.id)) {
            log.append(HistoryAction::Delete, username, &entry.to_fields())?;
        }
        entries.retain(|entry| !ids.contains(&entry.id));
        store.save(&entries)?;
        Ok(ids.len())
    }

    /// Current contents of one store, in insertion order.
    pub fn entries(&self, kind: EntryKind) -> Result<Vec<Entry>> {
        self.pair(kind).0.load()
    }

    /// Aggregate totals, recomputed from the stores on every call. Nothing
    /// is cached: a mutate-then-reread always observes the change.
    pub fn totals(&self) -> Result<Totals> {
        let collected = self.collections.aggregate_amount()?;
        let spent = self.expenses.aggregate_amount()?;
        Ok(Totals {
            collected,
            spent,
            balance: collected - spent,
        })
    }

    /// Full audit history of one store, oldest first.
    pub fn history(&self, kind: EntryKind) -> Result<Vec<HistoryEntry>> {
        self.pair(kind).1.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    use crate::store::DATE_FORMAT;

    fn new_entry(label: &str, amount: i64, date: &str) -> NewEntry {
        NewEntry::new(
            label,
            Decimal::new(amount, 0),
            NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
        )
    }

    fn service(dir: &Path) -> LedgerService {
        LedgerService::init(dir).unwrap()
    }

    #[test]
    fn test_add_grows_store_and_history() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());

        let entry = ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();
        assert_eq!(entry.id, 1);

        let totals = ledger.totals().unwrap();
        assert_eq!(totals.collected, Decimal::new(500, 0));

        let history = ledger.history(EntryKind::Collection).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, HistoryAction::Add);
        assert_eq!(history[0].username, "asha");
        assert_eq!(history[0].snapshot, entry);
    }

    #[test]
    fn test_add_rejects_invalid_input_before_writing() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());

        let err = ledger
            .add(EntryKind::Expense, "asha", &new_entry("", 40, "2024-09-02"))
            .unwrap_err();
        assert!(matches!(err, FundError::Validation(_)));
        assert!(ledger.entries(EntryKind::Expense).unwrap().is_empty());
        assert!(ledger.history(EntryKind::Expense).unwrap().is_empty());
    }

    #[test]
    fn test_edit_unchanged_is_a_no_op() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        let entry = ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();

        let outcome = ledger
            .edit(
                EntryKind::Collection,
                "asha",
                entry.id,
                &new_entry("Asha", 500, "2024-09-01"),
            )
            .unwrap();
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(ledger.history(EntryKind::Collection).unwrap().len(), 1);
    }

    #[test]
    fn test_edit_logs_post_image() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        let entry = ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();

        let outcome = ledger
            .edit(
                EntryKind::Collection,
                "ravi",
                entry.id,
                &new_entry("Asha", 600, "2024-09-01"),
            )
            .unwrap();
        let updated = match outcome {
            EditOutcome::Updated(updated) => updated,
            EditOutcome::Unchanged => panic!("edit should have applied"),
        };
        assert_eq!(updated.amount, Decimal::new(600, 0));

        let history = ledger.history(EntryKind::Collection).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, HistoryAction::Edit);
        assert_eq!(history[1].username, "ravi");
        assert_eq!(history[1].snapshot.amount, Decimal::new(600, 0));
    }

    #[test]
    fn test_delete_logs_pre_image() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        let entry = ledger
            .add(EntryKind::Expense, "asha", &new_entry("Lights", 40, "2024-09-02"))
            .unwrap();

        let removed = ledger.delete(EntryKind::Expense, "asha", entry.id).unwrap();
        assert_eq!(removed, entry);
        assert!(ledger.entries(EntryKind::Expense).unwrap().is_empty());

        let history = ledger.history(EntryKind::Expense).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, HistoryAction::Delete);
        assert_eq!(history[1].snapshot, entry);
    }

    #[test]
    fn test_bulk_delete_by_id() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        for i in 1..=10 {
            ledger
                .add(
                    EntryKind::Collection,
                    "asha",
                    &new_entry(&format!("Donor {i}"), 100 * i, "2024-09-01"),
                )
                .unwrap();
        }

        let ids: BTreeSet<u64> = [3, 6, 8].into_iter().collect();
        let deleted = ledger
            .bulk_delete(EntryKind::Collection, "asha", &ids)
            .unwrap();
        assert_eq!(deleted, 3);

        let remaining = ledger.entries(EntryKind::Collection).unwrap();
        assert_eq!(remaining.len(), 7);
        // Removed by value, not by post-shift position; survivors keep ids.
        assert!(remaining.iter().all(|entry| !ids.contains(&entry.id)));
        assert!(remaining
            .iter()
            .all(|entry| !["Donor 3", "Donor 6", "Donor 8"].contains(&entry.label.as_str())));

        let history = ledger.history(EntryKind::Collection).unwrap();
        assert_eq!(history.len(), 13); // 10 ADD + 3 DELETE
    }

    #[test]
    fn test_bulk_delete_stale_id_writes_nothing() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();

        let ids: BTreeSet<u64> = [1, 42].into_iter().collect();
        let err = ledger
            .bulk_delete(EntryKind::Collection, "asha", &ids)
            .unwrap_err();
        assert!(matches!(err, FundError::UnknownEntry(42)));
        assert_eq!(ledger.entries(EntryKind::Collection).unwrap().len(), 1);
        assert_eq!(ledger.history(EntryKind::Collection).unwrap().len(), 1);
    }

    #[test]
    fn test_totals_balance_recomputed() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();
        ledger
            .add(EntryKind::Expense, "asha", &new_entry("Lights", 120, "2024-09-02"))
            .unwrap();

        let totals = ledger.totals().unwrap();
        assert_eq!(totals.balance, totals.collected - totals.spent);
        assert_eq!(totals.balance, Decimal::new(380, 0));

        ledger
            .add(EntryKind::Expense, "asha", &new_entry("Prasad", 80, "2024-09-03"))
            .unwrap();
        assert_eq!(ledger.totals().unwrap().balance, Decimal::new(300, 0));
    }

    #[test]
    fn test_add_edit_delete_scenario() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());

        ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();
        assert_eq!(ledger.totals().unwrap().collected, Decimal::new(500, 0));

        ledger
            .edit(
                EntryKind::Collection,
                "asha",
                1,
                &new_entry("Asha", 600, "2024-09-01"),
            )
            .unwrap();
        assert_eq!(ledger.totals().unwrap().collected, Decimal::new(600, 0));
        assert_eq!(ledger.history(EntryKind::Collection).unwrap().len(), 2);

        ledger.delete(EntryKind::Collection, "asha", 1).unwrap();
        assert!(ledger.entries(EntryKind::Collection).unwrap().is_empty());

        let actions: Vec<_> = ledger
            .history(EntryKind::Collection)
            .unwrap()
            .into_iter()
            .map(|row| row.action)
            .collect();
        assert_eq!(
            actions,
            vec![HistoryAction::Add, HistoryAction::Edit, HistoryAction::Delete]
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempdir().unwrap();
        let ledger = service(dir.path());
        ledger
            .add(EntryKind::Collection, "asha", &new_entry("Asha", 500, "2024-09-01"))
            .unwrap();

        let reopened = LedgerService::init(dir.path()).unwrap();
        assert_eq!(reopened.entries(EntryKind::Collection).unwrap().len(), 1);
    }
}
